//! Sampling — map a uniform draw onto the cumulative distribution.
//!
//! The uniform draw comes from a `UniformSource`. Every `rand::Rng` is one;
//! `ScriptedDraws` replays fixed values so tests can pin the outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::distribution::Distribution;

// ─── Binary search ───────────────────────────────────────────────────

/// Leftmost insertion position of `target` in the sorted `cumulative`.
///
/// An exact match short-circuits and returns the probed index. The result
/// equals `cumulative.len()` only when `target` exceeds every entry.
pub fn insert_position(cumulative: &[f64], target: f64) -> usize {
    let mut low: isize = 0;
    let mut high: isize = cumulative.len() as isize - 1;

    while low <= high {
        let mid = (low + high) / 2;
        let probe = cumulative[mid as usize];

        if probe == target {
            return mid as usize;
        } else if probe < target {
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    low as usize
}

/// Select the value for `draw`.
///
/// For `draw` in `[0, 1)` the insertion position is always a valid index,
/// because the last cumulative entry is 1.0. Draws past the end clamp to the
/// last value.
#[inline]
pub fn sample(distribution: &Distribution, draw: f64) -> i64 {
    let values = distribution.values();
    let index = insert_position(distribution.cumulative(), draw).min(values.len() - 1);
    values[index]
}

// ─── Uniform sources ─────────────────────────────────────────────────

/// A source of floats uniformly distributed in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedDraws {
    fn next_uniform(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}

// ─── Generator ───────────────────────────────────────────────────────

/// A distribution paired with the source that drives it.
///
/// The distribution is behind an `Arc`, so many generators (one per thread,
/// each with its own source) can share a single validated distribution.
#[derive(Debug, Clone)]
pub struct RandomGen<S> {
    distribution: Arc<Distribution>,
    source: S,
}

impl RandomGen<StdRng> {
    /// Generator seeded from OS entropy.
    pub fn from_entropy(distribution: impl Into<Arc<Distribution>>) -> Self {
        Self::new(distribution, StdRng::from_entropy())
    }

    /// Reproducible generator.
    pub fn seeded(distribution: impl Into<Arc<Distribution>>, seed: u64) -> Self {
        Self::new(distribution, StdRng::seed_from_u64(seed))
    }
}

impl<S: UniformSource> RandomGen<S> {
    pub fn new(distribution: impl Into<Arc<Distribution>>, source: S) -> Self {
        Self {
            distribution: distribution.into(),
            source,
        }
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Draw one value.
    pub fn next_num(&mut self) -> i64 {
        let draw = self.source.next_uniform();
        sample(&self.distribution, draw)
    }

    /// Iterator over the next `n` draws.
    pub fn samples(&mut self, n: usize) -> Samples<'_, S> {
        Samples {
            gen: self,
            remaining: n,
        }
    }
}

/// Iterator returned by [`RandomGen::samples`].
pub struct Samples<'a, S> {
    gen: &'a mut RandomGen<S>,
    remaining: usize,
}

impl<S: UniformSource> Iterator for Samples<'_, S> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.gen.next_num())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: UniformSource> ExactSizeIterator for Samples<'_, S> {}
