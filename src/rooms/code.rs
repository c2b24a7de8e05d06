//! Room code generation.

use crate::core::{GameRng, RoomCode};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random code of `length` characters from `[A-Z0-9]`.
#[must_use]
pub fn random_code(length: usize, rng: &mut GameRng) -> RoomCode {
    let code: String = (0..length)
        .map(|_| char::from(ALPHABET[rng.below(ALPHABET.len())]))
        .collect();
    RoomCode::new(code)
}

/// Random code that `taken` does not report as in use.
pub fn unique_code(length: usize, rng: &mut GameRng, taken: impl Fn(&RoomCode) -> bool) -> RoomCode {
    loop {
        let code = random_code(length, rng);
        if !taken(&code) {
            return code;
        }
        tracing::debug!(code = %code, "room code collision, regenerating");
    }
}

/// Whether `code` has the room code shape.
#[must_use]
pub fn is_well_formed(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| ALPHABET.contains(&b))
}
