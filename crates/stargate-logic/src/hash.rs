//! Identifier → seed hashing.

/// Hash an identifier string into a 32-bit seed.
///
/// Walks the UTF-16 code units of `s` and accumulates
/// `hash * 33 + unit`, wrapping at 32 bits. Identifiers coming from a
/// browser client hash the same way they would in JavaScript, including
/// astral characters, which contribute both surrogate halves.
///
/// Collisions are possible and accepted.
pub fn hash_identifier(s: &str) -> u32 {
    s.encode_utf16().fold(0u32, |hash, unit| {
        hash.wrapping_mul(33).wrapping_add(unit as u32)
    })
}
