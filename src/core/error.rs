//! Error types.
//!
//! - `ValidationError`: an action was rejected; room state is untouched
//! - `LifecycleError`: a room operation was rejected
//!
//! Neither is fatal to a room. Callers resubmit a corrected request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::RoomCode;

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Game is not in progress")]
    GameNotInProgress,

    #[error("Game is finished")]
    GameFinished,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Card not in hand")]
    CardNotInHand,

    #[error("Invalid number of cards to discard: {0}")]
    InvalidDiscardCount(usize),

    #[error("Missing target")]
    MissingTarget,

    #[error("Expected between {min} and {max} targets, got {got}")]
    TargetCount { min: usize, max: usize, got: usize },

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Module not found")]
    ModuleNotFound,

    #[error("Bug not attached to any of your modules")]
    UnknownBug,

    #[error("Colors do not match")]
    ColorMismatch,

    #[error("Already have this module color")]
    DuplicateColor,

    #[error("Cannot target stabilized module")]
    StabilizedTarget,

    #[error("Swap would leave a player with duplicate colors")]
    DuplicateColorsAfterSwap,
}

/// Why a room operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LifecycleError {
    #[error("Room {0} not found")]
    RoomNotFound(RoomCode),

    #[error("Game already in progress")]
    GameInProgress,

    #[error("Room is full")]
    RoomFull,

    #[error("Only the host can do that")]
    NotHost,

    #[error("Need at least {0} players")]
    NotEnoughPlayers(usize),

    #[error("Player not in room")]
    PlayerNotInRoom,

    #[error("Player id already in use")]
    IdentityInUse,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Any error surfaced by the registry.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
