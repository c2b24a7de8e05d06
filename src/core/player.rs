//! Player identification and per-player table state.
//!
//! ## PlayerId
//!
//! Transport-assigned identifier. It changes when a client reconnects, so
//! nothing in the engine relies on it being stable; `rebind` swaps it in place.
//!
//! ## Player
//!
//! Seat at the table: hand, modules in play and pending skip-turn credits.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Color, ModuleInstance};

/// Player identifier assigned by the transport layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A seat at the table.
///
/// Hands and module collections are `im` vectors so whole-state snapshots
/// stay cheap to clone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    pub is_host: bool,
    pub connected: bool,
    /// Cards in hand, in draw order.
    pub hand: Vector<Card>,
    /// Modules in play. At most one non-multicolor module per color.
    pub modules: Vector<ModuleInstance>,
    /// Upcoming turns this player will skip.
    pub skip_turns: u32,
}

impl Player {
    /// Create a human player.
    #[must_use]
    pub fn human(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_ai: false,
            is_host: false,
            connected: true,
            hand: Vector::new(),
            modules: Vector::new(),
            skip_turns: 0,
        }
    }

    /// Create an AI-controlled player.
    #[must_use]
    pub fn ai(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            is_ai: true,
            ..Self::human(id, name)
        }
    }

    /// Mark as host (builder pattern).
    #[must_use]
    pub fn as_host(mut self) -> Self {
        self.is_host = true;
        self
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn hand_position(&self, card_id: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card_id)
    }

    /// Check whether a card is in hand.
    #[must_use]
    pub fn holds(&self, card_id: CardId) -> bool {
        self.hand_position(card_id).is_some()
    }

    /// Remove a card from hand.
    ///
    /// Returns the card if it was found.
    pub fn take_from_hand(&mut self, card_id: CardId) -> Option<Card> {
        let pos = self.hand_position(card_id)?;
        Some(self.hand.remove(pos))
    }

    /// Position of a module in play.
    #[must_use]
    pub fn module_position(&self, module_id: CardId) -> Option<usize> {
        self.modules.iter().position(|m| m.id() == module_id)
    }

    /// Get a module in play.
    #[must_use]
    pub fn module(&self, module_id: CardId) -> Option<&ModuleInstance> {
        self.modules.iter().find(|m| m.id() == module_id)
    }

    /// Check for a non-multicolor module of the given color.
    ///
    /// Always false for `Color::Multicolor`: wildcards never collide.
    #[must_use]
    pub fn has_module_color(&self, color: Color) -> bool {
        color != Color::Multicolor
            && self.modules.iter().any(|m| m.color() == color)
    }

    /// Modules with no bug attached, whatever their state.
    #[must_use]
    pub fn bug_free_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.bugs.is_empty()).count()
    }

    /// Modules in the stabilized state.
    #[must_use]
    pub fn stabilized_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.is_stabilized).count()
    }
}

/// Check that a module collection holds at most one module per concrete color.
#[must_use]
pub fn colors_unique<'a>(modules: impl IntoIterator<Item = &'a ModuleInstance>) -> bool {
    let mut seen = Vec::with_capacity(4);
    for color in modules.into_iter().map(ModuleInstance::color) {
        if color == Color::Multicolor {
            continue;
        }
        if seen.contains(&color) {
            return false;
        }
        seen.push(color);
    }
    true
}
