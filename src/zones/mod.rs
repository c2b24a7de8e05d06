//! Shared card piles.
//!
//! Hands and modules live on `Player`; the only shared zones are the draw
//! pile and the discard pile, owned together by `Piles`.

pub mod piles;

pub use piles::Piles;
