//! Read-only board assessment for the AI.
//!
//! Everything here is a small tag computed from public state, so the policy
//! can branch on plain enums.

use crate::core::{GameState, Player, PlayerId};

/// How far the game has progressed, by the largest module count on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GamePhase {
    /// No one has more than one module.
    Early,
    /// No one has more than two.
    Mid,
    Late,
}

/// Pressure from the strongest opponent, by stabilized modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Threat {
    Low,
    Medium,
    High,
}

/// Everything the hard tier branches on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assessment {
    pub phase: GamePhase,
    pub threat: Threat,
    /// We hold enough modules that a single play could complete a winning
    /// project: a new module, a stolen one, or bugs phished away.
    pub can_win_soon: bool,
    /// Some opponent is one bug-free module short of winning.
    pub rival_close: Option<PlayerId>,
    /// Opponent with the most stabilized modules.
    pub leader: Option<PlayerId>,
}

impl Assessment {
    /// Assess the table from `me`'s point of view.
    #[must_use]
    pub fn of(state: &GameState, me: &PlayerId, winning_modules: usize) -> Self {
        let near = winning_modules.saturating_sub(1);
        let can_win_soon = state.player(me).is_some_and(|p| p.modules.len() >= near);
        let rival_close = state
            .opponents(me)
            .filter(|p| p.bug_free_modules() >= near)
            .max_by_key(|p| p.bug_free_modules())
            .map(|p| p.id.clone());

        Self {
            phase: game_phase(state),
            threat: threat(state, me),
            can_win_soon,
            rival_close,
            leader: leader(state, me),
        }
    }
}

#[must_use]
pub fn game_phase(state: &GameState) -> GamePhase {
    let most = state.players.iter().map(|p| p.modules.len()).max().unwrap_or(0);
    match most {
        0 | 1 => GamePhase::Early,
        2 => GamePhase::Mid,
        _ => GamePhase::Late,
    }
}

#[must_use]
pub fn threat(state: &GameState, me: &PlayerId) -> Threat {
    let most = state
        .opponents(me)
        .map(Player::stabilized_modules)
        .max()
        .unwrap_or(0);
    match most {
        0 | 1 => Threat::Low,
        2 => Threat::Medium,
        _ => Threat::High,
    }
}

/// The opponent with the most stabilized modules, ties broken by bug-free
/// modules and then by turn order.
#[must_use]
pub fn leader(state: &GameState, me: &PlayerId) -> Option<PlayerId> {
    let mut best: Option<&Player> = None;
    for player in state.opponents(me) {
        let better = match best {
            None => true,
            Some(current) => {
                (player.stabilized_modules(), player.bug_free_modules())
                    > (current.stabilized_modules(), current.bug_free_modules())
            }
        };
        if better {
            best = Some(player);
        }
    }
    best.map(|p| p.id.clone())
}

/// Rough progress score. Bug-free modules count double; stabilized ones
/// add one more.
#[must_use]
pub fn progress(player: &Player) -> usize {
    player.bug_free_modules() * 2 + player.stabilized_modules()
}
