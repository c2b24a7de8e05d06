//! Card system: definitions, module instances, and the deck.
//!
//! ## Key Types
//!
//! - `Card`: A physical card (module, bug, patch or operation)
//! - `Color`: Module color, with `Multicolor` as a wildcard
//! - `ModuleInstance`: A module in play and its bug/patch state
//! - `DeckFactory`: Builds and shuffles the card pool

pub mod definition;
pub mod instance;
pub mod deck;

pub use definition::{Card, CardFamily, CardId, CardKind, CardText, Color, OperationKind};
pub use instance::{ModuleInstance, ModuleState};
pub use deck::{DeckComposition, DeckFactory};
