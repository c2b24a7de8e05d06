//! Module instances - module cards in play.
//!
//! A `ModuleInstance` wraps the module card it was played from and tracks
//! the bug/patch state machine on top of it:
//!
//! ```text
//! FREE --bug--> BUGGED --bug--> (destroyed)
//!   |             |
//! patch         patch
//!   v             v
//! PATCHED       FREE
//!   |  \--bug--> FREE
//! patch
//!   v
//! STABILIZED (terminal)
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, Color};

/// State of a module in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleState {
    Free,
    Patched,
    Bugged,
    Stabilized,
}

/// A module card owned by a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInstance {
    /// The module card itself.
    pub card: Card,
    pub state: ModuleState,
    /// Attached bug cards, oldest first.
    pub bugs: Vector<Card>,
    /// Attached patch cards, oldest first.
    pub patches: Vector<Card>,
    /// True iff `state == Stabilized`.
    pub is_stabilized: bool,
}

impl ModuleInstance {
    /// Put a module card into play in the `Free` state.
    #[must_use]
    pub fn new(card: Card) -> Self {
        Self {
            card,
            state: ModuleState::Free,
            bugs: Vector::new(),
            patches: Vector::new(),
            is_stabilized: false,
        }
    }

    /// Module id (the id of its module card).
    #[must_use]
    pub fn id(&self) -> CardId {
        self.card.id
    }

    /// Module color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.card.color().unwrap_or(Color::Multicolor)
    }

    /// Transition to a new state, keeping `is_stabilized` in sync.
    pub fn set_state(&mut self, state: ModuleState) {
        self.state = state;
        self.is_stabilized = state == ModuleState::Stabilized;
    }

    /// Detach every bug and patch.
    ///
    /// Returns the detached cards, bugs first.
    pub fn strip(&mut self) -> Vector<Card> {
        let mut cards = std::mem::take(&mut self.bugs);
        cards.append(std::mem::take(&mut self.patches));
        cards
    }

    /// Take the module apart: the module card followed by everything attached.
    #[must_use]
    pub fn into_cards(mut self) -> Vector<Card> {
        let attached = self.strip();
        let mut cards = Vector::unit(self.card);
        cards.append(attached);
        cards
    }
}
