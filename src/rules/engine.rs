//! The game state machine.
//!
//! `GameStateMachine` owns one room's state and RNG. Every entry point
//! resolves against a clone of the state and commits only on success, so a
//! rejected action leaves the room exactly as it was.
//!
//! ## Turn flow
//!
//! 1. Validate turn ownership and the payload
//! 2. Apply the card / discard / pass
//! 3. Draw replacements (recycling the discard pile as needed)
//! 4. Check for a winner; stop here if there is one
//! 5. Advance the turn pointer past players with skip credits
//! 6. While the new current player is an AI, decide and apply its action

use tracing::{debug, info, warn};

use super::interactions;
use super::victory;
use crate::ai;
use crate::cards::{CardKind, DeckFactory, OperationKind};
use crate::core::{
    Action, ActionKind, EngineConfig, GameRng, GameState, LifecycleError, Phase, PlayPayload, Player,
    PlayerId, RoomCode, RoomSettings, Target, ValidationError,
};
use crate::effects::{resolve_operation, TargetResolver};
use crate::zones::Piles;

/// One room's authoritative game.
#[derive(Clone, Debug)]
pub struct GameStateMachine {
    state: GameState,
    rng: GameRng,
    config: EngineConfig,
}

impl GameStateMachine {
    /// Create an empty room in the lobby.
    #[must_use]
    pub fn new(code: RoomCode, settings: RoomSettings, config: EngineConfig, rng: GameRng) -> Self {
        Self::from_state(GameState::new(code, settings), config, rng)
    }

    /// Wrap an existing state.
    #[must_use]
    pub fn from_state(state: GameState, config: EngineConfig, rng: GameRng) -> Self {
        Self { state, rng, config }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Snapshot of the current state (O(1)).
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Lobby ===

    /// Seat a player. Re-seating someone already present is a no-op.
    pub fn seat(&mut self, player: Player) -> Result<(), LifecycleError> {
        if self.state.player_index(&player.id).is_some() {
            return Ok(());
        }
        if self.state.phase != Phase::Waiting {
            return Err(LifecycleError::GameInProgress);
        }
        if self.state.player_count() >= self.state.settings.max_players {
            return Err(LifecycleError::RoomFull);
        }

        info!(room = %self.state.code, player = %player.id, ai = player.is_ai, "player seated");
        self.state.players.push_back(player);
        Ok(())
    }

    /// Remove a player from the room.
    ///
    /// Mid-game, their hand and modules go to the discard pile and the turn
    /// moves on if it was theirs. The host role passes to the first
    /// remaining human.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, LifecycleError> {
        let seat = self.state.player_index(id).ok_or(LifecycleError::PlayerNotInRoom)?;
        let mut next = self.state.clone();
        let mut rng = self.rng.clone();

        let mut leaving = next.players.remove(seat);
        if leaving.is_host {
            if let Some(heir) = next.players.iter_mut().find(|p| !p.is_ai) {
                heir.is_host = true;
            }
        }

        if next.phase == Phase::InProgress {
            next.piles.discard_all(std::mem::take(&mut leaving.hand));
            for module in std::mem::take(&mut leaving.modules) {
                next.piles.discard_all(module.into_cards());
            }

            if next.player_count() < self.config.min_players {
                next.phase = Phase::Finished;
                next.winner = next.players.front().map(|p| p.id.clone());
                info!(room = %next.code, "game ended: not enough players");
            } else if seat < next.current_player_index {
                next.current_player_index -= 1;
            } else if seat == next.current_player_index {
                // The seat now holds the next player; step onto it properly.
                let count = next.player_count();
                next.current_player_index = (seat + count - 1) % count;
                advance_turn(&mut next, &mut rng, &self.config);
                if seat == 0 {
                    // Stepping back from seat 0 wrapped the pointer without a real new round.
                    next.turn = next.turn.saturating_sub(1);
                }
                run_ai_turns(&mut next, &mut rng, &self.config, 0);
            }
        }

        info!(room = %next.code, player = %id, "player left");
        self.state = next;
        self.rng = rng;
        Ok(leaving)
    }

    /// Start (or restart) the game: fresh shuffled deck, full hands.
    pub fn start(&mut self, by: &PlayerId) -> Result<GameState, LifecycleError> {
        let host = self.state.player(by).ok_or(LifecycleError::PlayerNotInRoom)?;
        if !host.is_host {
            return Err(LifecycleError::NotHost);
        }
        if self.state.phase == Phase::InProgress {
            return Err(LifecycleError::GameInProgress);
        }
        if self.state.player_count() < self.config.min_players {
            return Err(LifecycleError::NotEnoughPlayers(self.config.min_players));
        }

        let mut next = self.state.clone();
        let mut rng = self.rng.clone();

        next.piles = Piles::new(DeckFactory::shuffled(&self.config.deck, &mut rng));
        for player in next.players.iter_mut() {
            player.hand.clear();
            player.modules.clear();
            player.skip_turns = 0;
        }
        for seat in 0..next.player_count() {
            let dealt = next.piles.draw_many(self.config.hand_size, &mut rng);
            next.players[seat].hand.extend(dealt);
        }
        next.current_player_index = 0;
        next.turn = 1;
        next.winner = None;
        next.phase = Phase::InProgress;

        info!(room = %next.code, players = next.player_count(), "game started");
        run_ai_turns(&mut next, &mut rng, &self.config, 0);

        self.state = next;
        self.rng = rng;
        Ok(self.snapshot())
    }

    /// Replace a player's transport identity, keeping everything they own.
    pub fn rebind_identity(&mut self, old: &PlayerId, new: PlayerId) -> Result<(), LifecycleError> {
        if old == &new {
            return self.set_connected(old, true);
        }
        if self.state.player_index(&new).is_some() {
            return Err(LifecycleError::IdentityInUse);
        }
        let player = self.state.player_mut(old).ok_or(LifecycleError::PlayerNotInRoom)?;
        player.id = new.clone();
        player.connected = true;
        if self.state.winner.as_ref() == Some(old) {
            self.state.winner = Some(new.clone());
        }

        info!(room = %self.state.code, old = %old, new = %new, "identity rebound");
        Ok(())
    }

    /// Mark a player connected or disconnected.
    pub fn set_connected(&mut self, id: &PlayerId, connected: bool) -> Result<(), LifecycleError> {
        let player = self.state.player_mut(id).ok_or(LifecycleError::PlayerNotInRoom)?;
        player.connected = connected;
        Ok(())
    }

    // === Play ===

    /// Apply a player action, then any AI turns it leads to.
    ///
    /// Returns the new snapshot. On error the state is unchanged.
    pub fn process_action(&mut self, action: &Action) -> Result<GameState, ValidationError> {
        let mut next = self.state.clone();
        let mut rng = self.rng.clone();

        apply_action(&mut next, &mut rng, &self.config, action)?;
        run_ai_turns(&mut next, &mut rng, &self.config, action.timestamp);

        self.state = next;
        self.rng = rng;
        Ok(self.snapshot())
    }
}

/// Check that `player` may act now. Returns their seat.
pub fn check_turn(state: &GameState, player: &PlayerId) -> Result<usize, ValidationError> {
    match state.phase {
        Phase::Finished => return Err(ValidationError::GameFinished),
        Phase::Waiting => return Err(ValidationError::GameNotInProgress),
        Phase::InProgress => {}
    }
    let seat = state.player_index(player).ok_or(ValidationError::PlayerNotFound)?;
    if seat != state.current_player_index {
        return Err(ValidationError::NotYourTurn);
    }
    Ok(seat)
}

/// Apply one action in place, including draws, win check and turn advance.
///
/// May leave `state` partly modified on error; callers work on a clone.
pub fn apply_action(
    state: &mut GameState,
    rng: &mut GameRng,
    config: &EngineConfig,
    action: &Action,
) -> Result<(), ValidationError> {
    let seat = check_turn(state, &action.player_id)?;

    match &action.kind {
        ActionKind::PlayCard(payload) => {
            resolve_play(state, seat, payload)?;
            if let Some(card) = state.piles.draw(rng) {
                state.players[seat].hand.push_back(card);
            }
        }
        ActionKind::DiscardCards { card_ids } => {
            let before = state.players[seat].hand.len();
            discard_cards(state, seat, card_ids, config.max_discard)?;
            let missing = before.saturating_sub(state.players[seat].hand.len());
            let drawn = state.piles.draw_many(missing, rng);
            state.players[seat].hand.extend(drawn);
            debug!(room = %state.code, player = %action.player_id, count = card_ids.len(), "discarded");
        }
        ActionKind::PassTurn => {
            debug!(room = %state.code, player = %action.player_id, "passed");
        }
    }

    if !victory::settle(state, config.winning_module_count) {
        advance_turn(state, rng, config);
    }
    Ok(())
}

/// Play a card from hand: validate, take it, resolve its effect.
///
/// Does not draw or advance the turn. Used both for real plays and for
/// legality dry runs.
pub fn resolve_play(state: &mut GameState, seat: usize, payload: &PlayPayload) -> Result<(), ValidationError> {
    let actor = state.players[seat].id.clone();
    let card = state.players[seat]
        .take_from_hand(payload.card_id)
        .ok_or(ValidationError::CardNotInHand)?;

    match card.kind {
        CardKind::Operation {
            effect: OperationKind::InternalPhishing,
        } => {
            let destinations: Vec<Target> = payload.transfers.iter().map(|t| t.to.clone()).collect();
            TargetResolver::validate(&card, &destinations, state, &actor)?;
        }
        _ => TargetResolver::validate(&card, &payload.targets, state, &actor)?,
    }

    let card_id = card.id;
    let outcome = match card.kind {
        CardKind::Module { .. } => interactions::play_module(state, seat, card)?,
        CardKind::Bug { .. } => interactions::apply_bug(state, card, first_target(payload)?)?,
        CardKind::Patch { .. } => interactions::apply_patch(state, card, first_target(payload)?)?,
        CardKind::Operation { effect } => {
            resolve_operation(state, seat, effect, payload)?;
            state.piles.discard(card);
            debug!(room = %state.code, player = %actor, card = %card_id, ?effect, "operation resolved");
            return Ok(());
        }
    };

    debug!(room = %state.code, player = %actor, card = %card_id, ?outcome, "card played");
    Ok(())
}

fn first_target(payload: &PlayPayload) -> Result<&Target, ValidationError> {
    payload.targets.first().ok_or(ValidationError::MissingTarget)
}

/// Move 1..=`max` named cards from hand to the discard pile, in order.
pub fn discard_cards(
    state: &mut GameState,
    seat: usize,
    card_ids: &[crate::cards::CardId],
    max: usize,
) -> Result<(), ValidationError> {
    if card_ids.is_empty() || card_ids.len() > max {
        return Err(ValidationError::InvalidDiscardCount(card_ids.len()));
    }
    for &id in card_ids {
        let card = state.players[seat]
            .take_from_hand(id)
            .ok_or(ValidationError::CardNotInHand)?;
        state.piles.discard(card);
    }
    Ok(())
}

/// Move the turn pointer to the next player who is not skipping.
///
/// Consumes one skip credit per skipped seat and gives up after one full lap,
/// so a table where everyone is skipping still terminates. The player landed
/// on is topped up to a full hand.
pub fn advance_turn(state: &mut GameState, rng: &mut GameRng, config: &EngineConfig) {
    let count = state.player_count();
    if count == 0 {
        return;
    }

    let mut idx = state.current_player_index;
    for _ in 0..count {
        idx = (idx + 1) % count;
        if idx == 0 {
            state.turn += 1;
        }
        let player = &mut state.players[idx];
        if player.skip_turns == 0 {
            break;
        }
        player.skip_turns -= 1;
        debug!(room = %state.code, player = %player.id, "turn skipped");
    }
    state.current_player_index = idx;

    let missing = config.hand_size.saturating_sub(state.players[idx].hand.len());
    let drawn = state.piles.draw_many(missing, rng);
    state.players[idx].hand.extend(drawn);

    debug!(room = %state.code, player = %state.players[idx].id, turn = state.turn, "turn advanced");
}

/// Play out AI turns until a human is up or the game ends.
pub fn run_ai_turns(state: &mut GameState, rng: &mut GameRng, config: &EngineConfig, timestamp: u64) {
    let tier = state.settings.ai_difficulty;

    for _ in 0..config.ai_cascade_limit {
        if state.phase != Phase::InProgress {
            return;
        }
        let Some(ai_id) = state.current_player().filter(|p| p.is_ai).map(|p| p.id.clone()) else {
            return;
        };

        let action = ai::decide(state, &ai_id, tier, rng, config).at(timestamp);
        let mut scratch = state.clone();
        match apply_action(&mut scratch, rng, config, &action) {
            Ok(()) => *state = scratch,
            Err(err) => {
                warn!(room = %state.code, player = %ai_id, %err, "AI action rejected, passing");
                if let Err(err) = apply_action(state, rng, config, &Action::pass(ai_id).at(timestamp)) {
                    warn!(room = %state.code, %err, "AI pass rejected");
                    return;
                }
            }
        }
    }

    if state.phase == Phase::InProgress && state.current_player().is_some_and(|p| p.is_ai) {
        warn!(room = %state.code, limit = config.ai_cascade_limit, "AI cascade limit reached");
    }
}
