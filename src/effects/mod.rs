//! Targeting and operation effects.
//!
//! - `TargetResolver`: which targets a card may take, and the gate that
//!   checks a submitted target list
//! - `operations`: the five multi-target operation effects

pub mod targeting;
pub mod operations;

pub use targeting::{TargetDescriptor, TargetResolver, TargetRule};
pub use operations::resolve_operation;
