//! Legal action enumeration.
//!
//! Candidates are generated from `TargetResolver` and then proven by a dry
//! run of the real resolution code on a scratch copy, so anything listed
//! here is accepted by `GameStateMachine::process_action`.

use smallvec::SmallVec;

use super::engine::{check_turn, resolve_play};
use crate::cards::{Card, CardId, CardKind, ModuleState, OperationKind};
use crate::core::{Action, ActionKind, BugTransfer, EngineConfig, GameState, PlayerId, Target, ValidationError};
use crate::effects::TargetResolver;

/// Every legal action for `player` right now.
///
/// Plays come first (hand order, then target order), then discards by
/// increasing size. `PassTurn` is listed only when nothing else is legal.
/// Empty when it is not the player's turn.
#[must_use]
pub fn legal_actions(state: &GameState, player: &PlayerId, config: &EngineConfig) -> Vec<Action> {
    let Ok(seat) = check_turn(state, player) else {
        return Vec::new();
    };
    let hand: Vec<Card> = state.players[seat].hand.iter().cloned().collect();

    let mut actions: Vec<Action> = hand
        .iter()
        .flat_map(|card| candidate_plays(state, player, card))
        .filter(|action| check_action(state, action).is_ok())
        .collect();

    let ids: Vec<CardId> = hand.iter().map(|c| c.id).collect();
    for size in 1..=config.max_discard.min(ids.len()) {
        for combo in combinations(&ids, size) {
            actions.push(Action::discard(player.clone(), &combo));
        }
    }

    if actions.is_empty() {
        actions.push(Action::pass(player.clone()));
    }
    actions
}

/// Every legal card play for `player`, without discards or pass.
#[must_use]
pub fn legal_plays(state: &GameState, player: &PlayerId) -> Vec<Action> {
    if check_turn(state, player).is_err() {
        return Vec::new();
    }
    let Some(acting) = state.player(player) else {
        return Vec::new();
    };
    acting
        .hand
        .iter()
        .flat_map(|card| candidate_plays(state, player, card))
        .filter(|action| check_action(state, action).is_ok())
        .collect()
}

/// Dry-run an action against a scratch copy.
///
/// Checks turn ownership, hand membership, targets and the effect itself.
/// Draws, win checks and turn advance are not simulated.
pub fn check_action(state: &GameState, action: &Action) -> Result<(), ValidationError> {
    let seat = check_turn(state, &action.player_id)?;
    let mut scratch = state.clone();

    match &action.kind {
        ActionKind::PlayCard(payload) => resolve_play(&mut scratch, seat, payload),
        ActionKind::DiscardCards { card_ids } => {
            if card_ids.is_empty() {
                return Err(ValidationError::InvalidDiscardCount(0));
            }
            let hand = &state.players[seat].hand;
            let mut seen: SmallVec<[CardId; 3]> = SmallVec::new();
            for id in card_ids {
                if seen.contains(id) || !hand.iter().any(|c| c.id == *id) {
                    return Err(ValidationError::CardNotInHand);
                }
                seen.push(*id);
            }
            Ok(())
        }
        ActionKind::PassTurn => Ok(()),
    }
}

/// Whether `action` would be accepted.
#[must_use]
pub fn is_legal(state: &GameState, action: &Action) -> bool {
    check_action(state, action).is_ok()
}

/// Greedy bug transfer plan for Internal Phishing.
///
/// Walks the actor's bugs in module order and sends each to the first
/// opponent module that is free, color-compatible and not already chosen.
#[must_use]
pub fn phishing_plan(state: &GameState, actor: &PlayerId) -> Vec<BugTransfer> {
    let Some(acting) = state.player(actor) else {
        return Vec::new();
    };

    let mut taken: Vec<(PlayerId, CardId)> = Vec::new();
    let mut plan = Vec::new();

    for bug in acting.modules.iter().flat_map(|m| m.bugs.iter()) {
        let Some(bug_color) = bug.color() else { continue };
        let destination = state.opponents(actor).find_map(|owner| {
            owner
                .modules
                .iter()
                .find(|m| {
                    m.state == ModuleState::Free
                        && bug_color.compatible_with(m.color())
                        && !taken.iter().any(|(p, id)| p == &owner.id && *id == m.id())
                })
                .map(|m| (owner.id.clone(), m.id()))
        });

        if let Some((owner, module_id)) = destination {
            taken.push((owner.clone(), module_id));
            plan.push(BugTransfer {
                bug_id: bug.id,
                to: Target::module(owner, module_id),
            });
        }
    }
    plan
}

/// Unverified play candidates for one card.
fn candidate_plays(state: &GameState, player: &PlayerId, card: &Card) -> Vec<Action> {
    let base = || Action::play(player.clone(), card.id);
    let singles = || {
        TargetResolver::valid_targets(card, state, player)
            .into_iter()
            .filter(|d| d.is_valid)
            .map(|d| base().with_target(d.target()))
            .collect::<Vec<_>>()
    };

    match card.kind {
        CardKind::Module { .. } => vec![base()],
        CardKind::Bug { .. } | CardKind::Patch { .. } => singles(),
        CardKind::Operation { effect } => match effect {
            OperationKind::RecruitAce | OperationKind::ProjectSwap => singles(),
            OperationKind::EndYearParty => vec![base()],
            OperationKind::InternalPhishing => {
                let mut action = base();
                for transfer in phishing_plan(state, player) {
                    action = action.transferring(transfer.bug_id, transfer.to);
                }
                vec![action]
            }
            OperationKind::ArchitectChange => {
                let targets: Vec<Target> = TargetResolver::valid_targets(card, state, player)
                    .into_iter()
                    .filter(|d| d.is_valid)
                    .map(|d| d.target())
                    .collect();
                let mut pairs = Vec::new();
                for (i, first) in targets.iter().enumerate() {
                    for second in &targets[i + 1..] {
                        pairs.push(base().with_target(first.clone()).with_target(second.clone()));
                    }
                }
                pairs
            }
        },
    }
}

/// All `size`-element combinations of `items`, in lexicographic order.
fn combinations(items: &[CardId], size: usize) -> Vec<Vec<CardId>> {
    if size == 0 {
        return vec![Vec::new()];
    }
    if items.len() < size {
        return Vec::new();
    }

    let mut out = Vec::new();
    for (i, &head) in items.iter().enumerate() {
        for mut tail in combinations(&items[i + 1..], size - 1) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}
