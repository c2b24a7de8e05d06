//! Game rules.
//!
//! - `interactions`: module, bug and patch resolution
//! - `victory`: win detection
//! - `legal`: legal action enumeration and dry-run checks
//! - `engine`: `GameStateMachine`, the per-room state machine

pub mod interactions;
pub mod victory;
pub mod legal;
pub mod engine;

pub use engine::GameStateMachine;
pub use interactions::Outcome;
pub use legal::{check_action, is_legal, legal_actions, legal_plays, phishing_plan};
pub use victory::find_winner;
