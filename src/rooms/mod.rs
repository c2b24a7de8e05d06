//! Room lifecycle.
//!
//! - `code`: room code generation
//! - `registry`: `RoomRegistry`, the process-wide map of live rooms

pub mod code;
pub mod registry;

pub use registry::RoomRegistry;
