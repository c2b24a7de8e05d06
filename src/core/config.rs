//! Engine and room configuration.
//!
//! - `EngineConfig`: process-wide rules constants (hand size, win threshold,
//!   deck composition, optional seed)
//! - `RoomSettings`: what a host chooses when creating a room
//!
//! Both deserialize with every field defaulted, so a host can send a partial
//! settings object.

use serde::{Deserialize, Serialize};

use super::error::LifecycleError;
use crate::cards::DeckComposition;

/// AI difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Settings chosen by the host when creating a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSettings {
    /// Seats, humans and AI together.
    pub max_players: usize,
    /// AI seats filled at creation.
    pub ai_players: usize,
    pub ai_difficulty: AiDifficulty,
    /// Display language. Carried for clients, never read by the engine.
    pub language: String,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_players: 4,
            ai_players: 0,
            ai_difficulty: AiDifficulty::Normal,
            language: "en".to_string(),
        }
    }
}

impl RoomSettings {
    /// Set seat count (builder pattern).
    #[must_use]
    pub fn max_players(mut self, count: usize) -> Self {
        self.max_players = count;
        self
    }

    /// Set AI seats and difficulty (builder pattern).
    #[must_use]
    pub fn with_ai(mut self, count: usize, difficulty: AiDifficulty) -> Self {
        self.ai_players = count;
        self.ai_difficulty = difficulty;
        self
    }

    /// Check the settings against the engine limits.
    pub fn validate(&self, config: &EngineConfig) -> Result<(), LifecycleError> {
        if self.max_players < config.min_players || self.max_players > config.max_players_cap {
            return Err(LifecycleError::InvalidSettings(format!(
                "max players must be between {} and {}",
                config.min_players, config.max_players_cap
            )));
        }
        if self.ai_players >= self.max_players {
            return Err(LifecycleError::InvalidSettings(
                "AI players must leave a seat for the host".to_string(),
            ));
        }
        Ok(())
    }
}

/// Process-wide rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cards held between turns.
    pub hand_size: usize,
    /// Players needed to start.
    pub min_players: usize,
    /// Upper bound accepted for `RoomSettings::max_players`.
    pub max_players_cap: usize,
    /// Bug-free modules needed to win.
    pub winning_module_count: usize,
    /// Most cards a single discard action may name.
    pub max_discard: usize,
    pub room_code_length: usize,
    /// AI actions resolved within one call before control is forced back.
    pub ai_cascade_limit: usize,
    /// Root seed. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub deck: DeckComposition,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: 3,
            min_players: 2,
            max_players_cap: 6,
            winning_module_count: 4,
            max_discard: 3,
            room_code_length: 6,
            ai_cascade_limit: 1000,
            seed: None,
            deck: DeckComposition::default(),
        }
    }
}

impl EngineConfig {
    /// Fix the root seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the deck composition (builder pattern).
    #[must_use]
    pub fn with_deck(mut self, deck: DeckComposition) -> Self {
        self.deck = deck;
        self
    }
}
