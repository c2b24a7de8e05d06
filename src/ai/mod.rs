//! Computer-controlled players.
//!
//! `decide` maps a state, an AI seat and a difficulty tier to one legal
//! action. It never mutates state; the state machine applies the result.

pub mod assess;
pub mod policy;

pub use assess::{Assessment, GamePhase, Threat};
pub use policy::decide;
