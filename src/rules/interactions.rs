//! Module, bug and patch interactions.
//!
//! | Module state | + Bug | + Patch |
//! |--------------|-------|---------|
//! | FREE | BUGGED | PATCHED |
//! | PATCHED | FREE, bug and patches discarded | STABILIZED |
//! | BUGGED | destroyed, everything discarded | FREE, bugs and patch discarded |
//! | STABILIZED | rejected | rejected |
//!
//! Targets arrive already checked by `TargetResolver`; these functions only
//! re-check what they need to avoid corrupting state.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, ModuleInstance, ModuleState};
use crate::core::{GameState, Target, ValidationError};

/// What a module/bug/patch play did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// A new module entered play.
    Installed,
    /// The card stayed attached to its target.
    Attached,
    /// Bug and patch cancelled out; the module is free again.
    Cancelled,
    /// The module was destroyed.
    Destroyed,
    /// The module became stabilized.
    Stabilized,
}

/// Put a module card into play for the player at `seat`.
pub fn play_module(state: &mut GameState, seat: usize, card: Card) -> Result<Outcome, ValidationError> {
    let color = card
        .color()
        .ok_or_else(|| ValidationError::InvalidTarget("not a module".to_string()))?;
    let player = state.players.get_mut(seat).ok_or(ValidationError::PlayerNotFound)?;

    if player.has_module_color(color) {
        return Err(ValidationError::DuplicateColor);
    }

    player.modules.push_back(ModuleInstance::new(card));
    Ok(Outcome::Installed)
}

/// Resolve a bug against its target module.
pub fn apply_bug(state: &mut GameState, bug: Card, target: &Target) -> Result<Outcome, ValidationError> {
    let (seat, slot) = locate(state, target)?;
    let module = &mut state.players[seat].modules[slot];
    if module.is_stabilized {
        return Err(ValidationError::StabilizedTarget);
    }

    match module.state {
        ModuleState::Free => {
            module.bugs.push_back(bug);
            module.set_state(ModuleState::Bugged);
            Ok(Outcome::Attached)
        }
        ModuleState::Patched => {
            let patches = std::mem::take(&mut module.patches);
            module.set_state(ModuleState::Free);
            state.piles.discard_all(patches);
            state.piles.discard(bug);
            Ok(Outcome::Cancelled)
        }
        ModuleState::Bugged => {
            let destroyed = state.players[seat].modules.remove(slot);
            state.piles.discard_all(destroyed.into_cards());
            state.piles.discard(bug);
            Ok(Outcome::Destroyed)
        }
        ModuleState::Stabilized => Err(ValidationError::StabilizedTarget),
    }
}

/// Resolve a patch against its target module.
pub fn apply_patch(state: &mut GameState, patch: Card, target: &Target) -> Result<Outcome, ValidationError> {
    let (seat, slot) = locate(state, target)?;
    let module = &mut state.players[seat].modules[slot];

    match module.state {
        ModuleState::Free => {
            module.patches.push_back(patch);
            module.set_state(ModuleState::Patched);
            Ok(Outcome::Attached)
        }
        ModuleState::Bugged => {
            let bugs = std::mem::take(&mut module.bugs);
            module.set_state(ModuleState::Free);
            state.piles.discard_all(bugs);
            state.piles.discard(patch);
            Ok(Outcome::Cancelled)
        }
        ModuleState::Patched => {
            module.patches.push_back(patch);
            module.set_state(ModuleState::Stabilized);
            Ok(Outcome::Stabilized)
        }
        ModuleState::Stabilized => Err(ValidationError::StabilizedTarget),
    }
}

fn locate(state: &GameState, target: &Target) -> Result<(usize, usize), ValidationError> {
    let module_id = target.module_id.ok_or(ValidationError::MissingTarget)?;
    state
        .find_module(&target.player_id, module_id)
        .ok_or(ValidationError::ModuleNotFound)
}
