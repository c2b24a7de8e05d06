//! Actions submitted by players.
//!
//! An action is a verb (`PLAY_CARD`, `DISCARD_CARDS`, `PASS_TURN`) plus a
//! payload. On the wire it reads as:
//!
//! ```json
//! {"type": "PLAY_CARD", "payload": {"card_id": 12, "targets": [...]},
//!  "player_id": "sock-1", "timestamp": 1700000000}
//! ```
//!
//! Target gathering happens in the client; the engine only ever sees a
//! fully-formed action.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::CardId;

/// A target: a player, or a module owned by that player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub player_id: PlayerId,
    /// `None` when the target is the player as a whole (Project Swap).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<CardId>,
}

impl Target {
    /// Target a module.
    #[must_use]
    pub fn module(player_id: PlayerId, module_id: CardId) -> Self {
        Self {
            player_id,
            module_id: Some(module_id),
        }
    }

    /// Target a player.
    #[must_use]
    pub fn player(player_id: PlayerId) -> Self {
        Self {
            player_id,
            module_id: None,
        }
    }
}

/// One Internal Phishing move: which bug goes where.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BugTransfer {
    pub bug_id: CardId,
    pub to: Target,
}

/// Payload of a `PLAY_CARD` action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayPayload {
    pub card_id: CardId,
    #[serde(default)]
    pub targets: SmallVec<[Target; 2]>,
    /// Internal Phishing only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<BugTransfer>,
}

/// The action verb and its payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    PlayCard(PlayPayload),
    DiscardCards { card_ids: SmallVec<[CardId; 3]> },
    PassTurn,
}

/// A complete player action.
///
/// ## Example
///
/// ```
/// use bugsquash::cards::CardId;
/// use bugsquash::core::{Action, PlayerId};
///
/// let me = PlayerId::new("p1");
/// let rival = PlayerId::new("p2");
///
/// // Bug a rival's module
/// let bug = Action::play(me.clone(), CardId::new(30)).targeting(rival, CardId::new(4));
///
/// // Throw away two cards
/// let discard = Action::discard(me.clone(), &[CardId::new(1), CardId::new(2)]);
///
/// let pass = Action::pass(me);
/// # let _ = (bug, discard, pass);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub kind: ActionKind,
    pub player_id: PlayerId,
    /// Client timestamp (ms). Carried, not interpreted.
    #[serde(default)]
    pub timestamp: u64,
}

impl Action {
    /// Play a card with no targets yet.
    #[must_use]
    pub fn play(player_id: PlayerId, card_id: CardId) -> Self {
        Self {
            kind: ActionKind::PlayCard(PlayPayload {
                card_id,
                targets: SmallVec::new(),
                transfers: Vec::new(),
            }),
            player_id,
            timestamp: 0,
        }
    }

    /// Discard the named cards.
    #[must_use]
    pub fn discard(player_id: PlayerId, card_ids: &[CardId]) -> Self {
        Self {
            kind: ActionKind::DiscardCards {
                card_ids: SmallVec::from_slice(card_ids),
            },
            player_id,
            timestamp: 0,
        }
    }

    /// Pass the turn.
    #[must_use]
    pub fn pass(player_id: PlayerId) -> Self {
        Self {
            kind: ActionKind::PassTurn,
            player_id,
            timestamp: 0,
        }
    }

    /// Add a module target (builder pattern). No-op on non-play actions.
    #[must_use]
    pub fn targeting(self, player_id: PlayerId, module_id: CardId) -> Self {
        self.with_target(Target::module(player_id, module_id))
    }

    /// Add a player target (builder pattern). No-op on non-play actions.
    #[must_use]
    pub fn targeting_player(self, player_id: PlayerId) -> Self {
        self.with_target(Target::player(player_id))
    }

    /// Add a target (builder pattern). No-op on non-play actions.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        if let ActionKind::PlayCard(payload) = &mut self.kind {
            payload.targets.push(target);
        }
        self
    }

    /// Add an Internal Phishing transfer (builder pattern).
    #[must_use]
    pub fn transferring(mut self, bug_id: CardId, to: Target) -> Self {
        if let ActionKind::PlayCard(payload) = &mut self.kind {
            payload.transfers.push(BugTransfer { bug_id, to });
        }
        self
    }

    /// Set the timestamp (builder pattern).
    #[must_use]
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Card being played, if this is a play.
    #[must_use]
    pub fn played_card(&self) -> Option<CardId> {
        match &self.kind {
            ActionKind::PlayCard(payload) => Some(payload.card_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self.kind, ActionKind::PassTurn)
    }
}
