//! Seeded pseudo-random source for deterministic generation.
//!
//! `SeededRng` is a mulberry32 generator: one 32-bit state word, advanced
//! by a fixed increment and scrambled with multiply/xor-shift rounds.
//! The same seed always yields the same sequence on every platform.
//!
//! Not cryptographically secure. Use it for content generation only.

use rand::{RngCore, SeedableRng};

/// Increment applied to the state word before every output.
const STATE_INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32, the divisor that maps a `u32` output into [0, 1).
const U32_RANGE: f64 = 4_294_967_296.0;

/// Deterministic 32-bit generator (mulberry32).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a 32-bit seed. Every seed is valid.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STATE_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / U32_RANGE
    }

    /// `floor(next_f64() * span)`: an integer in `0..span`.
    ///
    /// Consumes exactly one draw, so callers can rely on it when the
    /// order of draws matters.
    pub fn next_below(&mut self, span: u32) -> u32 {
        (self.next_f64() * span as f64).floor() as u32
    }
}

/// Build a closure that yields the seeded sequence in [0, 1).
///
/// ```
/// use stargate_logic::rng::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a(), b());
/// ```
pub fn create_rng(seed: u32) -> impl FnMut() -> f64 {
    let mut rng = SeededRng::new(seed);
    move || rng.next_f64()
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        SeededRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let low = SeededRng::next_u32(self) as u64;
        let high = SeededRng::next_u32(self) as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = SeededRng::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    // Truncate instead of the default PCG expansion so a numeric seed
    // means the same thing here as in `SeededRng::new`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
