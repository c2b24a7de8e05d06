//! AI decision policy.
//!
//! `decide` always picks from `legal_actions`, so whatever a tier prefers,
//! the result passes the same checks a human action does.
//!
//! - `Easy`: uniform over the legal set
//! - `Normal`: fixed priority list
//! - `Hard`: branches on the board assessment, falling back to `Normal`

use tracing::debug;

use super::assess::{progress, Assessment, GamePhase, Threat};
use crate::cards::{Card, CardFamily, ModuleState, OperationKind};
use crate::core::{
    Action, ActionKind, AiDifficulty, EngineConfig, GameRng, GameState, PlayPayload, PlayerId, Target,
};
use crate::rules::engine::resolve_play;
use crate::rules::legal_actions;

/// Choose an action for the AI player `me`.
///
/// Falls back to a pass when `me` cannot act (not their turn, game over).
#[must_use]
pub fn decide(
    state: &GameState,
    me: &PlayerId,
    tier: AiDifficulty,
    rng: &mut GameRng,
    config: &EngineConfig,
) -> Action {
    let legal = legal_actions(state, me, config);
    let fallback = || Action::pass(me.clone());
    if legal.is_empty() {
        return fallback();
    }

    let chosen = match tier {
        AiDifficulty::Easy => rng.choose(&legal).cloned(),
        AiDifficulty::Normal => Some(normal(state, me, &legal, rng, config)),
        AiDifficulty::Hard => Some(hard(state, me, &legal, rng, config)),
    }
    .unwrap_or_else(fallback);

    debug!(room = %state.code, player = %me, ?tier, action = ?chosen.kind, "AI decided");
    chosen
}

/// Priority list:
/// 1. play a module
/// 2. patch one of our bugged modules
/// 3. bug the leader
/// 4. a beneficial operation
/// 5. bug anyone
/// 6. discard when holding more than a full hand
/// 7. anything legal
fn normal(state: &GameState, me: &PlayerId, legal: &[Action], rng: &mut GameRng, config: &EngineConfig) -> Action {
    let view = Plays::new(state, me, legal);

    if let Some(action) = view.first(|card, _| card.family() == CardFamily::Module) {
        return action;
    }

    if let Some(action) = view.first(|card, payload| {
        card.family() == CardFamily::Patch
            && payload.targets.first().is_some_and(|t| {
                t.module_id
                    .and_then(|id| state.module(me, id))
                    .is_some_and(|m| m.state == ModuleState::Bugged)
            })
    }) {
        return action;
    }

    if let Some(leader) = super::assess::leader(state, me) {
        if let Some(action) = view.first(|card, payload| is_bug_on(card, payload, &leader)) {
            return action;
        }
    }

    if let Some(action) = view.first(|card, payload| {
        card.operation_kind()
            .is_some_and(|op| operation_is_beneficial(state, me, op, payload))
    }) {
        return action;
    }

    if let Some(action) = view.first(|card, _| card.family() == CardFamily::Bug) {
        return action;
    }

    let hand_size = state.player(me).map_or(0, |p| p.hand.len());
    if hand_size > config.hand_size {
        let discards: Vec<&Action> = legal
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::DiscardCards { .. }))
            .collect();
        if let Some(action) = rng.choose(&discards) {
            return (*action).clone();
        }
    }

    random(me, legal, rng)
}

fn hard(state: &GameState, me: &PlayerId, legal: &[Action], rng: &mut GameRng, config: &EngineConfig) -> Action {
    let assessment = Assessment::of(state, me, config.winning_module_count);
    let view = Plays::new(state, me, legal);

    if assessment.phase == GamePhase::Early {
        let weights: Vec<f32> = legal
            .iter()
            .map(|action| match view.card_of(action).map(Card::family) {
                Some(CardFamily::Module) => 8.0,
                Some(_) => 1.0,
                None if action.is_pass() => 0.1,
                None => 0.25,
            })
            .collect();
        return rng
            .pick_weighted(&weights)
            .and_then(|i| legal.get(i).cloned())
            .unwrap_or_else(|| normal(state, me, legal, rng, config));
    }

    if assessment.can_win_soon {
        if let Some(action) = view.first(|_, payload| wins_immediately(state, me, payload, config)) {
            return action;
        }
    }

    let under_pressure = assessment.threat == Threat::High || assessment.rival_close.is_some();
    if assessment.phase == GamePhase::Late && under_pressure {
        let victim = assessment
            .rival_close
            .clone()
            .or_else(|| assessment.leader.clone())
            .or_else(|| strongest_opponent(state, me));
        if let Some(victim) = victim {
            if let Some(action) = view.first(|card, payload| is_bug_on(card, payload, &victim)) {
                return action;
            }
        }
    }

    normal(state, me, legal, rng, config)
}

/// Uniform choice, with a pass if `legal` is somehow empty.
fn random(me: &PlayerId, legal: &[Action], rng: &mut GameRng) -> Action {
    rng.choose(legal).cloned().unwrap_or_else(|| Action::pass(me.clone()))
}

/// Legal card plays joined with the cards they play.
struct Plays<'a> {
    state: &'a GameState,
    me: &'a PlayerId,
    plays: Vec<(&'a Action, &'a Card, &'a PlayPayload)>,
}

impl<'a> Plays<'a> {
    fn new(state: &'a GameState, me: &'a PlayerId, legal: &'a [Action]) -> Self {
        let hand = state.player(me).map(|p| &p.hand);
        let plays = legal
            .iter()
            .filter_map(|action| match &action.kind {
                ActionKind::PlayCard(payload) => hand
                    .and_then(|h| h.iter().find(|c| c.id == payload.card_id))
                    .map(|card| (action, card, payload)),
                _ => None,
            })
            .collect();
        Self { state, me, plays }
    }

    fn card_of(&self, action: &Action) -> Option<&'a Card> {
        let id = action.played_card()?;
        self.state.player(self.me)?.hand.iter().find(|c| c.id == id)
    }

    fn first(&self, mut pred: impl FnMut(&Card, &PlayPayload) -> bool) -> Option<Action> {
        self.plays
            .iter()
            .find(|(_, card, payload)| pred(card, payload))
            .map(|(action, _, _)| (*action).clone())
    }
}

fn is_bug_on(card: &Card, payload: &PlayPayload, victim: &PlayerId) -> bool {
    card.family() == CardFamily::Bug && payload.targets.first().is_some_and(|t| &t.player_id == victim)
}

/// Whether an operation play improves our position.
fn operation_is_beneficial(state: &GameState, me: &PlayerId, op: OperationKind, payload: &PlayPayload) -> bool {
    match op {
        OperationKind::RecruitAce => true,
        OperationKind::InternalPhishing => !payload.transfers.is_empty(),
        OperationKind::EndYearParty => state.opponents(me).any(|p| !p.hand.is_empty()),
        OperationKind::ProjectSwap => {
            let mine = state.player(me).map_or(0, progress);
            payload
                .targets
                .first()
                .and_then(|t| state.player(&t.player_id))
                .is_some_and(|other| progress(other) > mine)
        }
        OperationKind::ArchitectChange => {
            // Good when we hand over a bugged module for a bug-free one.
            let [first, second] = payload.targets.as_slice() else {
                return false;
            };
            let (ours, theirs) = if &first.player_id == me {
                (first, second)
            } else if &second.player_id == me {
                (second, first)
            } else {
                return false;
            };
            if ours.player_id == theirs.player_id {
                return false;
            }
            let module_of = |t: &Target| t.module_id.and_then(|id| state.module(&t.player_id, id));
            match (module_of(ours), module_of(theirs)) {
                (Some(give), Some(get)) => !give.bugs.is_empty() && get.bugs.is_empty(),
                _ => false,
            }
        }
    }
}

/// Whether playing `payload` gives us enough bug-free modules to win.
fn wins_immediately(state: &GameState, me: &PlayerId, payload: &PlayPayload, config: &EngineConfig) -> bool {
    let Some(seat) = state.player_index(me) else {
        return false;
    };
    let mut scratch = state.clone();
    resolve_play(&mut scratch, seat, payload).is_ok()
        && scratch
            .player(me)
            .is_some_and(|p| p.bug_free_modules() >= config.winning_module_count)
}

fn strongest_opponent(state: &GameState, me: &PlayerId) -> Option<PlayerId> {
    state
        .opponents(me)
        .max_by_key(|p| progress(p))
        .map(|p| p.id.clone())
}
