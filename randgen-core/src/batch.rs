//! Batch sampling and frequency tallies.
//!
//! Parallel batches split the draw count into fixed-size chunks. Chunk `i`
//! draws from `seeds.rng_for(BATCH_STREAM, i)`, so the output depends only on
//! the master seed, the count and the chunk size, never on the thread count.

use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{trace, warn};

use crate::distribution::Distribution;
use crate::rng::SeedHierarchy;
use crate::sampler::UniformSource;

/// Stream label used for parallel batch chunks.
pub const BATCH_STREAM: &str = "batch";

/// Default number of draws per parallel chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Draw `n` values sequentially from `source`.
pub fn sample_batch<S>(distribution: &Distribution, source: &mut S, n: usize) -> Vec<i64>
where
    S: UniformSource + ?Sized,
{
    trace!(n, "sequential batch");
    (0..n)
        .map(|_| distribution.sample(source.next_uniform()))
        .collect()
}

/// Draw `n` values across the rayon pool.
pub fn sample_batch_parallel(
    distribution: &Distribution,
    seeds: &SeedHierarchy,
    n: usize,
    chunk_size: usize,
) -> Vec<i64> {
    let chunk_size = chunk_size.max(1);
    let chunks = n.div_ceil(chunk_size);
    trace!(n, chunks, chunk_size, "parallel batch");

    (0..chunks)
        .into_par_iter()
        .flat_map_iter(|chunk| {
            let start = chunk * chunk_size;
            let len = chunk_size.min(n - start);
            let mut rng = seeds.rng_for(BATCH_STREAM, chunk as u64);
            (0..len).map(move |_| distribution.sample(rng.gen::<f64>()))
        })
        .collect()
}

// ─── Tally ───────────────────────────────────────────────────────────

/// Observed vs expected frequency for one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallyRow {
    pub value: i64,
    pub count: u64,
    pub observed: f64,
    pub expected: f64,
}

/// Per-value counts over a batch, in distribution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tally {
    pub total: u64,
    pub rows: Vec<TallyRow>,
}

impl Tally {
    pub fn from_samples(distribution: &Distribution, samples: &[i64]) -> Self {
        let index: HashMap<i64, usize> = distribution
            .values()
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();

        let mut counts = vec![0u64; distribution.len()];
        let mut foreign = 0usize;
        for sample in samples {
            match index.get(sample) {
                Some(&i) => counts[i] += 1,
                None => foreign += 1,
            }
        }
        if foreign > 0 {
            warn!(foreign, "samples outside the distribution were ignored");
        }

        let total: u64 = counts.iter().sum();
        let rows = distribution
            .values()
            .iter()
            .zip(distribution.probabilities())
            .zip(counts)
            .map(|((&value, &expected), count)| TallyRow {
                value,
                count,
                observed: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
                expected,
            })
            .collect();

        Self { total, rows }
    }

    pub fn count_of(&self, value: i64) -> u64 {
        self.rows
            .iter()
            .find(|row| row.value == value)
            .map_or(0, |row| row.count)
    }

    /// Largest `|observed - expected|` across all values.
    pub fn max_deviation(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| (row.observed - row.expected).abs())
            .fold(0.0, f64::max)
    }
}
