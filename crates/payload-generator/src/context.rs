//! Seeded random context threaded through every generation call.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Caller-owned source of randomness for payload generation.
///
/// There is no global RNG: two contexts built from the same seed and driven
/// through the same call sequence produce identical payloads. Workers that
/// generate in parallel each own their own context.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    seed: u64,
    rng: StdRng,
}

impl GenerationContext {
    /// Create a context from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent context for case `index` of `stream`.
    ///
    /// Lets any case be regenerated on its own, or by a different worker,
    /// without replaying the cases before it.
    pub fn for_case(seed: u64, stream: u64, index: u64) -> Self {
        Self::new(Self::case_seed(seed, stream, index))
    }

    /// Combine the base seed with a stream and case index.
    pub fn case_seed(seed: u64, stream: u64, index: u64) -> u64 {
        seed.wrapping_add(stream.wrapping_mul(0xD1B5_4A32_D192_ED03))
            .wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// The seed this context was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Weighted coin: `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform integer in `[min, max]`.
    pub fn int_in(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    /// Uniform float in `[min, max]`.
    pub fn float_in(&mut self, min: f64, max: f64) -> f64 {
        self.rng.random_range(min..=max)
    }

    /// Uniform length in `[min, max]`.
    pub fn len_in(&mut self, min: usize, max: usize) -> usize {
        self.rng.random_range(min..=max)
    }

    /// Uniform index below `len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Uniform choice from a slice, `None` when empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Random `[A-Za-z0-9]` string with length in `[min, max]`.
    pub fn alphanumeric(&mut self, min: usize, max: usize) -> String {
        let len = self.len_in(min, max);
        (0..len)
            .map(|_| char::from(self.rng.sample(Alphanumeric)))
            .collect()
    }

    /// String of `len` characters drawn from `charset`.
    pub fn string_from(&mut self, charset: &[u8], len: usize) -> String {
        (0..len)
            .filter_map(|_| charset.choose(&mut self.rng).map(|&b| char::from(b)))
            .collect()
    }

    /// `len` random bytes.
    pub fn bytes(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.rng.fill(&mut buf[..]);
        buf
    }
}
