//! Card definitions - the printed face of every card.
//!
//! A `Card` is a tagged union over four families. Modules, bugs and patches
//! carry a `Color`; operations carry one of five named effects instead.
//! Display text is a locale map the engine never reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unique identifier for a physical card in the pool.
///
/// Every card in a room's pool has a distinct id, so a module instance is
/// addressed by the id of the module card it was played from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Module color. `Multicolor` is a wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Backend,
    Frontend,
    Mobile,
    DataScience,
    Multicolor,
}

impl Color {
    /// The four concrete colors.
    pub const CONCRETE: [Color; 4] = [
        Color::Backend,
        Color::Frontend,
        Color::Mobile,
        Color::DataScience,
    ];

    /// Check whether a card of this color may act on a module of `other`.
    #[must_use]
    pub fn compatible_with(self, other: Color) -> bool {
        self == Color::Multicolor || other == Color::Multicolor || self == other
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Color::Backend => "Backend",
            Color::Frontend => "Frontend",
            Color::Mobile => "Mobile",
            Color::DataScience => "Data Science",
            Color::Multicolor => "Multicolor",
        }
    }
}

/// The five operation effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    /// Swap two modules between two players.
    ArchitectChange,
    /// Steal one module from an opponent.
    RecruitAce,
    /// Move bugs from own modules onto opponents' free modules.
    InternalPhishing,
    /// Every opponent discards their hand and skips a turn.
    EndYearParty,
    /// Exchange whole module collections with one opponent.
    ProjectSwap,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::ArchitectChange,
        OperationKind::RecruitAce,
        OperationKind::InternalPhishing,
        OperationKind::EndYearParty,
        OperationKind::ProjectSwap,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::ArchitectChange => "Architect Change",
            OperationKind::RecruitAce => "Recruit an Ace",
            OperationKind::InternalPhishing => "Internal Phishing",
            OperationKind::EndYearParty => "End of Year Party",
            OperationKind::ProjectSwap => "Project Swap",
        }
    }
}

/// Card family, for dispatch and for clients that only need the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardFamily {
    Module,
    Bug,
    Patch,
    Operation,
}

/// Family-specific payload of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Module { color: Color },
    Bug { color: Color },
    Patch { color: Color },
    Operation { effect: OperationKind },
}

/// Localized display text. Opaque to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardText {
    pub name: String,
    pub description: String,
}

/// A physical card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(flatten)]
    pub kind: CardKind,
    /// Display text keyed by locale tag ("en", "es", ...).
    #[serde(default)]
    pub text: BTreeMap<String, CardText>,
}

impl Card {
    /// Create a card with no display text.
    #[must_use]
    pub fn new(id: CardId, kind: CardKind) -> Self {
        Self {
            id,
            kind,
            text: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn module(id: CardId, color: Color) -> Self {
        Self::new(id, CardKind::Module { color })
    }

    #[must_use]
    pub fn bug(id: CardId, color: Color) -> Self {
        Self::new(id, CardKind::Bug { color })
    }

    #[must_use]
    pub fn patch(id: CardId, color: Color) -> Self {
        Self::new(id, CardKind::Patch { color })
    }

    #[must_use]
    pub fn operation(id: CardId, effect: OperationKind) -> Self {
        Self::new(id, CardKind::Operation { effect })
    }

    /// Add display text for a locale (builder pattern).
    #[must_use]
    pub fn with_text(
        mut self,
        locale: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.text.insert(
            locale.into(),
            CardText {
                name: name.into(),
                description: description.into(),
            },
        );
        self
    }

    /// Get the card family.
    #[must_use]
    pub fn family(&self) -> CardFamily {
        match self.kind {
            CardKind::Module { .. } => CardFamily::Module,
            CardKind::Bug { .. } => CardFamily::Bug,
            CardKind::Patch { .. } => CardFamily::Patch,
            CardKind::Operation { .. } => CardFamily::Operation,
        }
    }

    /// Get the card color. `None` for operations.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self.kind {
            CardKind::Module { color } | CardKind::Bug { color } | CardKind::Patch { color } => {
                Some(color)
            }
            CardKind::Operation { .. } => None,
        }
    }

    /// Get the operation effect. `None` for colored cards.
    #[must_use]
    pub fn operation_kind(&self) -> Option<OperationKind> {
        match self.kind {
            CardKind::Operation { effect } => Some(effect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_compatibility() {
        assert!(Color::Backend.compatible_with(Color::Backend));
        assert!(!Color::Backend.compatible_with(Color::Frontend));
        assert!(Color::Multicolor.compatible_with(Color::Mobile));
        assert!(Color::DataScience.compatible_with(Color::Multicolor));
    }

    #[test]
    fn test_card_family_and_color() {
        let module = Card::module(CardId::new(1), Color::Backend);
        let op = Card::operation(CardId::new(2), OperationKind::ProjectSwap);

        assert_eq!(module.family(), CardFamily::Module);
        assert_eq!(module.color(), Some(Color::Backend));
        assert_eq!(module.operation_kind(), None);

        assert_eq!(op.family(), CardFamily::Operation);
        assert_eq!(op.color(), None);
        assert_eq!(op.operation_kind(), Some(OperationKind::ProjectSwap));
    }

    #[test]
    fn test_card_text() {
        let card = Card::bug(CardId::new(3), Color::Mobile)
            .with_text("en", "Mobile Bug", "Breaks a mobile module");

        assert_eq!(card.text["en"].name, "Mobile Bug");
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::patch(CardId::new(4), Color::DataScience).with_text("en", "Patch", "");
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"family\":\"PATCH\""));
        assert!(json.contains("\"color\":\"DATA_SCIENCE\""));

        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
