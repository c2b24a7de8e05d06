//! Deck construction.
//!
//! `DeckComposition` says how many of each card the pool holds;
//! `DeckFactory` turns it into concrete cards with sequential ids and
//! English display text, then shuffles them into a draw pile.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, CardKind, Color, OperationKind};
use crate::core::GameRng;

/// Card counts for the pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckComposition {
    /// Modules per concrete color.
    pub modules_per_color: usize,
    pub multicolor_modules: usize,
    /// Bugs per concrete color.
    pub bugs_per_color: usize,
    pub multicolor_bugs: usize,
    /// Patches per concrete color.
    pub patches_per_color: usize,
    pub multicolor_patches: usize,
    pub architect_change: usize,
    pub recruit_ace: usize,
    pub internal_phishing: usize,
    pub end_year_party: usize,
    pub project_swap: usize,
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self {
            modules_per_color: 5,
            multicolor_modules: 1,
            bugs_per_color: 4,
            multicolor_bugs: 1,
            patches_per_color: 4,
            multicolor_patches: 4,
            architect_change: 3,
            recruit_ace: 3,
            internal_phishing: 2,
            end_year_party: 1,
            project_swap: 1,
        }
    }
}

impl DeckComposition {
    /// Total number of cards in the pool.
    #[must_use]
    pub fn total(&self) -> usize {
        let colors = Color::CONCRETE.len();
        (self.modules_per_color + self.bugs_per_color + self.patches_per_color) * colors
            + self.multicolor_modules
            + self.multicolor_bugs
            + self.multicolor_patches
            + OperationKind::ALL.iter().map(|&op| self.operation_count(op)).sum::<usize>()
    }

    /// Copies of one operation.
    #[must_use]
    pub fn operation_count(&self, op: OperationKind) -> usize {
        match op {
            OperationKind::ArchitectChange => self.architect_change,
            OperationKind::RecruitAce => self.recruit_ace,
            OperationKind::InternalPhishing => self.internal_phishing,
            OperationKind::EndYearParty => self.end_year_party,
            OperationKind::ProjectSwap => self.project_swap,
        }
    }
}

/// Builds card pools.
pub struct DeckFactory;

impl DeckFactory {
    /// Build the unshuffled pool, ids starting at 1.
    #[must_use]
    pub fn build_pool(composition: &DeckComposition) -> Vec<Card> {
        let mut kinds = Vec::with_capacity(composition.total());

        for color in Color::CONCRETE {
            push_n(&mut kinds, composition.modules_per_color, CardKind::Module { color });
            push_n(&mut kinds, composition.bugs_per_color, CardKind::Bug { color });
            push_n(&mut kinds, composition.patches_per_color, CardKind::Patch { color });
        }

        let wild = Color::Multicolor;
        push_n(&mut kinds, composition.multicolor_modules, CardKind::Module { color: wild });
        push_n(&mut kinds, composition.multicolor_bugs, CardKind::Bug { color: wild });
        push_n(&mut kinds, composition.multicolor_patches, CardKind::Patch { color: wild });

        for effect in OperationKind::ALL {
            push_n(&mut kinds, composition.operation_count(effect), CardKind::Operation { effect });
        }

        kinds
            .into_iter()
            .zip(1u32..)
            .map(|(kind, id)| {
                let (name, description) = english_text(kind);
                Card::new(CardId::new(id), kind).with_text("en", name, description)
            })
            .collect()
    }

    /// Build the pool and shuffle it into a draw pile.
    #[must_use]
    pub fn shuffled(composition: &DeckComposition, rng: &mut GameRng) -> Vector<Card> {
        rng.shuffled(Self::build_pool(composition))
    }
}

fn push_n(kinds: &mut Vec<CardKind>, count: usize, kind: CardKind) {
    kinds.extend(std::iter::repeat(kind).take(count));
}

fn english_text(kind: CardKind) -> (String, String) {
    match kind {
        CardKind::Module { color } => (
            format!("{} Module", color.label()),
            "Add this module to your project.".to_string(),
        ),
        CardKind::Bug { color } => (
            format!("{} Bug", color.label()),
            "Break a rival's module of the same color.".to_string(),
        ),
        CardKind::Patch { color } => (
            format!("{} Patch", color.label()),
            "Fix or protect one of your modules of the same color.".to_string(),
        ),
        CardKind::Operation { effect } => {
            let description = match effect {
                OperationKind::ArchitectChange => "Swap two modules between two players.",
                OperationKind::RecruitAce => "Take a module from a rival.",
                OperationKind::InternalPhishing => {
                    "Pass your bugs on to rivals' free modules."
                }
                OperationKind::EndYearParty => {
                    "Every rival discards their hand and skips a turn."
                }
                OperationKind::ProjectSwap => "Trade your whole project with a rival.",
            };
            (effect.label().to_string(), description.to_string())
        }
    }
}
