//! Random sources for the shuffle engine.
//!
//! ## Key Features
//!
//! - **Injectable**: the shuffle takes any `RandomSource`, so tests can
//!   script every draw while production wires in the OS generator
//! - **Unbiased**: `below` uses rejection sampling, never a bare modulo
//! - **Deterministic option**: `SeededRandom` replays the same sequence
//!   from a seed and can checkpoint its position
//!
//! ## Usage
//!
//! ```
//! use tarot_deck::core::{RandomSource, SeededRandom};
//!
//! let mut rng = SeededRandom::new(42);
//! let roll = rng.below(6);
//! assert!(roll < 6);
//!
//! // Same seed, same sequence
//! let mut a = SeededRandom::new(7);
//! let mut b = SeededRandom::new(7);
//! assert_eq!(a.next_u32(), b.next_u32());
//! ```

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Capability to draw uniform 32-bit values.
///
/// Production code must back this with a cryptographically strong
/// generator ([`OsRandom`]). Seeded and scripted sources exist for tests.
pub trait RandomSource {
    /// Draw the next uniform value over the full `u32` range.
    fn next_u32(&mut self) -> u32;

    /// Fair coin: true with probability exactly 1/2.
    fn coin(&mut self) -> bool {
        self.next_u32() < 0x8000_0000
    }

    /// Uniform value in `0..bound`.
    ///
    /// Draws are rejected below `2^32 mod bound` so every residue is
    /// equally likely. Returns 0 when `bound` is 0 or 1.
    fn below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u32();
            if value >= threshold {
                return value % bound;
            }
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }

    fn below(&mut self, bound: u32) -> u32 {
        (**self).below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }

    fn below(&mut self, bound: u32) -> u32 {
        (**self).below(bound)
    }
}

/// Operating-system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl OsRandom {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for OsRandom {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }
}

/// Deterministic ChaCha8 stream.
///
/// Same seed produces an identical sequence. Not for live readings: the
/// seed is predictable by construction.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    /// Create a source from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> SeededRandomState {
        SeededRandomState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream from a captured position.
    #[must_use]
    pub fn from_state(state: &SeededRandomState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}

/// Serializable position of a [`SeededRandom`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRandomState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Scripted source that cycles through fixed values.
///
/// `below` rejects values under `2^32 mod bound` like every other source.
/// A script whose every value falls in that zone would be rejected forever,
/// so once a full cycle has been rejected the last value is reduced modulo
/// `bound` instead. Scripts with an acceptable value behave exactly like
/// plain rejection sampling.
///
/// ```
/// use tarot_deck::core::{RandomSource, SequenceRandom};
///
/// let mut rng = SequenceRandom::new(vec![1, 2]);
/// assert_eq!(rng.next_u32(), 1);
/// assert_eq!(rng.next_u32(), 2);
/// assert_eq!(rng.next_u32(), 1);
///
/// // 0 is in the rejection zone for bound 3; a constant source still ends
/// let mut zeros = SequenceRandom::constant(0);
/// assert_eq!(zeros.below(3), 0);
/// ```
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<u32>,
    pos: usize,
}

impl SequenceRandom {
    /// Create a scripted source. An empty script yields zeros.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }

    /// A source that always returns `value`.
    #[must_use]
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRandom {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let threshold = bound.wrapping_neg() % bound;
        let cycle = self.values.len().max(1);

        let mut value = self.next_u32();
        for _ in 1..cycle {
            if value >= threshold {
                break;
            }
            value = self.next_u32();
        }
        value % bound
    }
}
