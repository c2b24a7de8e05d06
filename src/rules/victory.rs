//! Win detection.

use crate::core::{GameState, Phase, PlayerId};

/// First player, in turn order, with at least `threshold` bug-free modules.
#[must_use]
pub fn find_winner(state: &GameState, threshold: usize) -> Option<PlayerId> {
    state
        .players
        .iter()
        .find(|p| p.bug_free_modules() >= threshold)
        .map(|p| p.id.clone())
}

/// Finish the game if someone has won.
///
/// Returns true if the game is (now) finished.
pub fn settle(state: &mut GameState, threshold: usize) -> bool {
    if state.phase == Phase::Finished {
        return true;
    }
    match find_winner(state, threshold) {
        Some(winner) => {
            tracing::info!(room = %state.code, winner = %winner, turn = state.turn, "game won");
            state.winner = Some(winner);
            state.phase = Phase::Finished;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Color, ModuleInstance, ModuleState};
    use crate::core::{Player, RoomCode, RoomSettings};

    fn player_with(id: &str, healthy: u32, bugged: u32) -> Player {
        let mut player = Player::human(PlayerId::new(id), id);
        let colors = [Color::Backend, Color::Frontend, Color::Mobile, Color::DataScience, Color::Multicolor];
        for (n, color) in colors.iter().take((healthy + bugged) as usize).enumerate() {
            let mut module = ModuleInstance::new(Card::module(CardId::new(n as u32 + 1), *color));
            if (n as u32) >= healthy {
                module.bugs.push_back(Card::bug(CardId::new(100 + n as u32), *color));
                module.set_state(ModuleState::Bugged);
            }
            player.modules.push_back(module);
        }
        player
    }

    fn state(players: Vec<Player>) -> GameState {
        let mut state = GameState::new(RoomCode::new("WIN001"), RoomSettings::default());
        state.players = players.into_iter().collect();
        state.phase = Phase::InProgress;
        state
    }

    #[test]
    fn test_no_winner_with_bugs() {
        let state = state(vec![player_with("a", 3, 1), player_with("b", 2, 0)]);
        assert_eq!(find_winner(&state, 4), None);
    }

    #[test]
    fn test_four_healthy_wins_regardless_of_state() {
        let mut s = state(vec![player_with("a", 4, 1), player_with("b", 0, 0)]);
        s.players[0].modules[0].set_state(ModuleState::Stabilized);
        s.players[0].modules[1].set_state(ModuleState::Patched);

        assert!(settle(&mut s, 4));
        assert_eq!(s.winner, Some(PlayerId::new("a")));
        assert_eq!(s.phase, Phase::Finished);
    }

    #[test]
    fn test_first_in_turn_order_wins() {
        let state = state(vec![player_with("a", 1, 0), player_with("b", 4, 0), player_with("c", 4, 0)]);
        assert_eq!(find_winner(&state, 4), Some(PlayerId::new("b")));
    }
}
