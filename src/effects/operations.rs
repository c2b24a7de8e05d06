//! The five operation effects.
//!
//! A closed set, so one `match` dispatches them all. Each effect either
//! mutates the state or returns a `ValidationError`; the caller resolves on a
//! scratch copy, so a half-applied effect never escapes.

use im::Vector;

use crate::cards::{Color, ModuleInstance, ModuleState, OperationKind};
use crate::core::{colors_unique, BugTransfer, GameState, PlayPayload, PlayerId, Target, ValidationError};

/// Apply an operation played by the player at `seat`.
pub fn resolve_operation(
    state: &mut GameState,
    seat: usize,
    effect: OperationKind,
    payload: &PlayPayload,
) -> Result<(), ValidationError> {
    match effect {
        OperationKind::ArchitectChange => match payload.targets.as_slice() {
            [first, second] => architect_change(state, first, second),
            _ => Err(ValidationError::MissingTarget),
        },
        OperationKind::RecruitAce => {
            let target = payload.targets.first().ok_or(ValidationError::MissingTarget)?;
            recruit_ace(state, seat, target)
        }
        OperationKind::InternalPhishing => {
            internal_phishing(state, seat, &payload.transfers).map(|moved| {
                tracing::debug!(moved, "phishing resolved");
            })
        }
        OperationKind::EndYearParty => {
            end_year_party(state, seat);
            Ok(())
        }
        OperationKind::ProjectSwap => {
            let target = payload.targets.first().ok_or(ValidationError::MissingTarget)?;
            project_swap(state, seat, &target.player_id)
        }
    }
}

/// Swap two modules between their owners.
///
/// Stabilized modules may be swapped. Two modules of one owner only trade
/// places in that owner's project.
pub fn architect_change(state: &mut GameState, first: &Target, second: &Target) -> Result<(), ValidationError> {
    let (seat_a, slot_a) = locate(state, first)?;
    let (seat_b, slot_b) = locate(state, second)?;
    if seat_a == seat_b {
        state.players[seat_a].modules.swap(slot_a, slot_b);
        return Ok(());
    }

    let module_a = state.players[seat_a].modules[slot_a].clone();
    let module_b = state.players[seat_b].modules[slot_b].clone();

    let after_a = swapped(&state.players[seat_a].modules, slot_a, &module_b);
    let after_b = swapped(&state.players[seat_b].modules, slot_b, &module_a);
    if !colors_unique(&after_a) || !colors_unique(&after_b) {
        return Err(ValidationError::DuplicateColorsAfterSwap);
    }

    state.players[seat_a].modules = after_a;
    state.players[seat_b].modules = after_b;
    Ok(())
}

/// Take an opponent's module.
pub fn recruit_ace(state: &mut GameState, seat: usize, target: &Target) -> Result<(), ValidationError> {
    let (owner_seat, slot) = locate(state, target)?;
    if owner_seat == seat {
        return Err(ValidationError::InvalidTarget(
            "must target another player's module".to_string(),
        ));
    }

    let module = &state.players[owner_seat].modules[slot];
    if module.is_stabilized {
        return Err(ValidationError::StabilizedTarget);
    }
    if state.players[seat].has_module_color(module.color()) {
        return Err(ValidationError::DuplicateColor);
    }

    let module = state.players[owner_seat].modules.remove(slot);
    state.players[seat].modules.push_back(module);
    Ok(())
}

/// Move bugs from the actor's modules onto opponents' free modules.
///
/// A transfer whose destination is no longer free, or whose colors do not
/// match, is skipped and the bug stays put. Returns how many bugs moved.
pub fn internal_phishing(
    state: &mut GameState,
    seat: usize,
    transfers: &[BugTransfer],
) -> Result<usize, ValidationError> {
    let mut moved = 0;

    for transfer in transfers {
        let (source_slot, bug_pos) =
            find_own_bug(&state.players[seat].modules, transfer).ok_or(ValidationError::UnknownBug)?;
        let (dest_seat, dest_slot) = locate(state, &transfer.to)?;
        if dest_seat == seat {
            return Err(ValidationError::InvalidTarget(
                "bugs must move to another player's module".to_string(),
            ));
        }

        let bug_color = state.players[seat].modules[source_slot].bugs[bug_pos]
            .color()
            .unwrap_or(Color::Multicolor);
        let dest = &state.players[dest_seat].modules[dest_slot];
        if dest.state != ModuleState::Free || !bug_color.compatible_with(dest.color()) {
            tracing::debug!(bug = %transfer.bug_id, "phishing transfer skipped");
            continue;
        }

        let source = &mut state.players[seat].modules[source_slot];
        let bug = source.bugs.remove(bug_pos);
        if source.bugs.is_empty() && source.state == ModuleState::Bugged {
            source.set_state(ModuleState::Free);
        }

        let dest = &mut state.players[dest_seat].modules[dest_slot];
        dest.bugs.push_back(bug);
        dest.set_state(ModuleState::Bugged);
        moved += 1;
    }

    Ok(moved)
}

/// Every other player discards their hand and gains a skip-turn credit.
pub fn end_year_party(state: &mut GameState, seat: usize) {
    for idx in 0..state.players.len() {
        if idx == seat {
            continue;
        }
        let hand = std::mem::take(&mut state.players[idx].hand);
        state.piles.discard_all(hand);
        state.players[idx].skip_turns += 1;
    }
}

/// Exchange whole module collections with an opponent.
pub fn project_swap(state: &mut GameState, seat: usize, opponent: &PlayerId) -> Result<(), ValidationError> {
    let other = state.player_index(opponent).ok_or(ValidationError::PlayerNotFound)?;
    if other == seat {
        return Err(ValidationError::InvalidTarget("must target another player".to_string()));
    }

    let mine = std::mem::take(&mut state.players[seat].modules);
    let theirs = std::mem::replace(&mut state.players[other].modules, mine);
    state.players[seat].modules = theirs;
    Ok(())
}

fn locate(state: &GameState, target: &Target) -> Result<(usize, usize), ValidationError> {
    let module_id = target.module_id.ok_or(ValidationError::MissingTarget)?;
    state
        .find_module(&target.player_id, module_id)
        .ok_or(ValidationError::ModuleNotFound)
}

fn swapped(modules: &Vector<ModuleInstance>, slot: usize, incoming: &ModuleInstance) -> Vector<ModuleInstance> {
    let mut after = modules.clone();
    after[slot] = incoming.clone();
    after
}

fn find_own_bug(modules: &Vector<ModuleInstance>, transfer: &BugTransfer) -> Option<(usize, usize)> {
    modules.iter().enumerate().find_map(|(slot, module)| {
        module
            .bugs
            .iter()
            .position(|b| b.id == transfer.bug_id)
            .map(|pos| (slot, pos))
    })
}
