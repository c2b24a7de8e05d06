//! Target resolution.
//!
//! `TargetResolver` answers two questions for a card about to be played:
//! - which (player, module) targets exist, and is each currently legal?
//! - is a submitted target list acceptable?
//!
//! The second is the gate the state machine runs before mutating anything
//! for a targeted card, so both share one set of eligibility rules:
//!
//! | Card | Candidates | Excluded when |
//! |------|------------|---------------|
//! | Bug | opponents' modules | stabilized, color mismatch |
//! | Patch | own modules | stabilized, color mismatch |
//! | Architect Change | every module | never |
//! | Recruit an Ace | opponents' modules | stabilized, actor already has the color |
//! | Internal Phishing | opponents' modules | not free |
//! | Project Swap | opponents | never |

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardKind, Color, ModuleInstance, OperationKind};
use crate::core::{GameState, Player, PlayerId, Target, ValidationError};

/// A candidate target and whether it is currently legal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub player_id: PlayerId,
    pub module_id: Option<CardId>,
    pub is_valid: bool,
    /// Why the target is not legal.
    pub reason: Option<ValidationError>,
}

impl TargetDescriptor {
    fn for_module(owner: &Player, module: &ModuleInstance, reason: Option<ValidationError>) -> Self {
        Self {
            player_id: owner.id.clone(),
            module_id: Some(module.id()),
            is_valid: reason.is_none(),
            reason,
        }
    }

    fn for_player(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            module_id: None,
            is_valid: true,
            reason: None,
        }
    }

    /// Check whether this descriptor describes `target`.
    #[must_use]
    pub fn matches(&self, target: &Target) -> bool {
        self.player_id == target.player_id && self.module_id == target.module_id
    }

    /// As a submittable target.
    #[must_use]
    pub fn target(&self) -> Target {
        Target {
            player_id: self.player_id.clone(),
            module_id: self.module_id,
        }
    }
}

/// How many targets a card takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRule {
    pub min: usize,
    pub max: usize,
}

impl TargetRule {
    const NONE: TargetRule = TargetRule { min: 0, max: 0 };
    const ONE: TargetRule = TargetRule { min: 1, max: 1 };
    const TWO: TargetRule = TargetRule { min: 2, max: 2 };

    fn check(self, got: usize) -> Result<(), ValidationError> {
        if got == 0 && self.min > 0 {
            return Err(ValidationError::MissingTarget);
        }
        if got < self.min || got > self.max {
            return Err(ValidationError::TargetCount {
                min: self.min,
                max: self.max,
                got,
            });
        }
        Ok(())
    }
}

/// Computes and validates targets.
pub struct TargetResolver;

impl TargetResolver {
    /// Target count bounds for a card in the current state.
    #[must_use]
    pub fn target_rule(card: &Card, state: &GameState, actor: &PlayerId) -> TargetRule {
        match card.kind {
            CardKind::Module { .. } => TargetRule::NONE,
            CardKind::Bug { .. } | CardKind::Patch { .. } => TargetRule::ONE,
            CardKind::Operation { effect } => match effect {
                OperationKind::ArchitectChange => TargetRule::TWO,
                OperationKind::RecruitAce | OperationKind::ProjectSwap => TargetRule::ONE,
                OperationKind::EndYearParty => TargetRule::NONE,
                OperationKind::InternalPhishing => TargetRule {
                    min: 0,
                    max: own_bug_count(state, actor),
                },
            },
        }
    }

    /// Every candidate target for `card`, each tagged legal or not.
    #[must_use]
    pub fn valid_targets(card: &Card, state: &GameState, actor: &PlayerId) -> Vec<TargetDescriptor> {
        let Some(acting) = state.player(actor) else {
            return Vec::new();
        };

        match card.kind {
            CardKind::Module { .. } => Vec::new(),
            CardKind::Bug { color } => module_targets(state.opponents(actor), |_, module| {
                colored_card_issue(color, module)
            }),
            CardKind::Patch { color } => {
                module_targets(std::iter::once(acting), |_, module| colored_card_issue(color, module))
            }
            CardKind::Operation { effect } => match effect {
                OperationKind::ArchitectChange => module_targets(state.players.iter(), |_, _| None),
                OperationKind::RecruitAce => module_targets(state.opponents(actor), |_, module| {
                    if module.is_stabilized {
                        Some(ValidationError::StabilizedTarget)
                    } else if acting.has_module_color(module.color()) {
                        Some(ValidationError::DuplicateColor)
                    } else {
                        None
                    }
                }),
                // Busy or mismatched destinations are skipped at resolution.
                OperationKind::InternalPhishing => module_targets(state.opponents(actor), |_, _| None),
                OperationKind::EndYearParty => Vec::new(),
                OperationKind::ProjectSwap => state
                    .opponents(actor)
                    .map(TargetDescriptor::for_player)
                    .collect(),
            },
        }
    }

    /// Check a submitted target list.
    ///
    /// Every target must appear, legal, in `valid_targets`, and the count
    /// must sit within `target_rule`.
    pub fn validate(
        card: &Card,
        targets: &[Target],
        state: &GameState,
        actor: &PlayerId,
    ) -> Result<(), ValidationError> {
        Self::target_rule(card, state, actor).check(targets.len())?;

        let candidates = Self::valid_targets(card, state, actor);
        for target in targets {
            match candidates.iter().find(|d| d.matches(target)) {
                Some(d) if d.is_valid => {}
                Some(d) => {
                    return Err(d
                        .reason
                        .clone()
                        .unwrap_or_else(|| ValidationError::InvalidTarget("not allowed".to_string())))
                }
                None => return Err(missing_target_error(card, target, state)),
            }
        }

        Ok(())
    }
}

/// Stabilized and color checks shared by bugs and patches.
fn colored_card_issue(color: Color, module: &ModuleInstance) -> Option<ValidationError> {
    if module.is_stabilized {
        Some(ValidationError::StabilizedTarget)
    } else if !color.compatible_with(module.color()) {
        Some(ValidationError::ColorMismatch)
    } else {
        None
    }
}

fn module_targets<'a>(
    owners: impl Iterator<Item = &'a Player>,
    issue: impl Fn(&Player, &ModuleInstance) -> Option<ValidationError>,
) -> Vec<TargetDescriptor> {
    owners
        .flat_map(|owner| {
            owner
                .modules
                .iter()
                .map(|module| TargetDescriptor::for_module(owner, module, issue(owner, module)))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn own_bug_count(state: &GameState, actor: &PlayerId) -> usize {
    state
        .player(actor)
        .map(|p| p.modules.iter().map(|m| m.bugs.len()).sum())
        .unwrap_or(0)
}

/// Error for a target that is not even a candidate.
fn missing_target_error(card: &Card, target: &Target, state: &GameState) -> ValidationError {
    if state.player(&target.player_id).is_none() {
        return ValidationError::PlayerNotFound;
    }
    if let Some(module_id) = target.module_id {
        if state.module(&target.player_id, module_id).is_none() {
            return ValidationError::ModuleNotFound;
        }
    }

    let reason = match card.kind {
        CardKind::Bug { .. } => "bugs must target another player's module",
        CardKind::Patch { .. } => "patches can only target your own modules",
        CardKind::Operation {
            effect: OperationKind::ProjectSwap,
        } => "must target another player",
        CardKind::Operation { .. } if target.module_id.is_none() => "a module is required",
        CardKind::Operation { .. } => "must target another player's module",
        CardKind::Module { .. } => "modules take no targets",
    };
    ValidationError::InvalidTarget(reason.to_string())
}
