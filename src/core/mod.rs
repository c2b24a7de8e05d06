//! Core types: players, state, actions, RNG, configuration, errors.
//!
//! Everything else in the crate is built from these.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{colors_unique, Player, PlayerId};
pub use rng::GameRng;
pub use config::{AiDifficulty, EngineConfig, RoomSettings};
pub use action::{Action, ActionKind, BugTransfer, PlayPayload, Target};
pub use state::{GameState, Phase, PlayerView, PublicPlayer, RoomCode};
pub use error::{EngineError, LifecycleError, ValidationError};
