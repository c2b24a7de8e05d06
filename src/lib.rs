//! # bugsquash
//!
//! Authoritative rules engine for a multiplayer card game: players build a
//! project out of colored modules, sabotage each other with bugs, defend
//! with patches and disrupt the table with operations.
//!
//! ## Design Principles
//!
//! 1. **Transactional**: every action resolves on a copy of the room state
//!    and is committed only on success. A rejected action changes nothing.
//!
//! 2. **Synchronous**: an action, and every AI turn it leads to, completes
//!    within one call that returns a full state snapshot.
//!
//! 3. **Rooms are independent**: each room is serialized behind its own
//!    lock; distinct rooms never share mutable state.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, which makes
//!   resolve-on-a-copy and dry-run legality checks cheap.
//!
//! - **Deterministic RNG**: `GameRng` (ChaCha8) drives shuffles and AI
//!   choices, so a seeded registry replays identically.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, RNG, configuration, errors
//! - `cards`: Card definitions, module instances, deck construction
//! - `zones`: Draw and discard piles with recycling
//! - `effects`: Target resolution and operation effects
//! - `rules`: Interactions, win detection, legal actions, the state machine
//! - `ai`: Difficulty-tiered AI policy
//! - `rooms`: Room codes and the room registry

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod rules;
pub mod ai;
pub mod rooms;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, AiDifficulty, BugTransfer, EngineConfig, EngineError, GameRng, GameState,
    LifecycleError, Phase, PlayPayload, Player, PlayerId, PlayerView, RoomCode, RoomSettings, Target,
    ValidationError,
};

pub use crate::cards::{Card, CardFamily, CardId, Color, DeckComposition, DeckFactory, ModuleInstance, ModuleState, OperationKind};

pub use crate::zones::Piles;

pub use crate::effects::{TargetDescriptor, TargetResolver, TargetRule};

pub use crate::rules::{legal_actions, GameStateMachine, Outcome};

pub use crate::ai::decide;

pub use crate::rooms::RoomRegistry;
