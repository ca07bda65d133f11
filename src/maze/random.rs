//! Randomness consumed by the maze generator
//!
//! Generation only ever asks for a uniform integer in `[0, n)`. Anything that can
//! answer that question can drive it: the seeded `Pcg32` used in play, the thread RNG,
//! or a recorded sequence for fixtures.

use rand::Rng;
use rand::rngs::ThreadRng;
use rand_pcg::Pcg32;

/// Uniform integer source
pub trait RandomSource {
    /// Uniform integer in `[0, n)`; `n` is always at least 1
    fn uniform_int(&mut self, n: usize) -> usize;
}

impl RandomSource for Pcg32 {
    fn uniform_int(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

impl RandomSource for ThreadRng {
    fn uniform_int(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_int(&mut self, n: usize) -> usize {
        (**self).uniform_int(n)
    }
}

/// Replays a fixed list of values, cycling when it runs out
///
/// Values are returned as-is; nothing is reduced modulo `n`, so a bad recording shows up
/// as an out-of-range index downstream.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<usize>,
    cursor: usize,
    /// Every `n` asked for, in order
    requests: Vec<usize>,
}

impl SequenceSource {
    /// Panics if `values` is empty
    pub fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty(), "sequence source needs at least one value");
        Self {
            values,
            cursor: 0,
            requests: Vec::new(),
        }
    }

    /// Always answers 0
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }

    /// The bounds passed to `uniform_int` so far
    pub fn requests(&self) -> &[usize] {
        &self.requests
    }
}

impl RandomSource for SequenceSource {
    fn uniform_int(&mut self, n: usize) -> usize {
        self.requests.push(n);
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
