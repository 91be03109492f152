//! Distribution builder — validation, duplicate merging, cumulative construction.
//!
//! Construction is a single pass over the raw entries:
//! 1. Length checks (empty, mismatch, too long)
//! 2. Per-entry checks (number type and range, probability type and sign),
//!    merging duplicate numbers into an insertion-ordered table as it goes
//! 3. Total mass check on the raw (pre-merge) running sum
//! 4. Cumulative distribution over the merged table
//!
//! The first violation aborts construction; no partial `Distribution` exists.
//!
//! Rounding is round-half-to-even of the exact binary value at `precision`
//! decimal digits, applied to every partial sum of the cumulative
//! distribution and to the total mass.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::error::BuildError;
use crate::input::{NumberInput, ProbabilityInput};
use crate::sampler;

/// Expected total probability mass.
pub const PROB_TOTAL: f64 = 1.0;
/// Decimal digits kept when rounding partial sums.
pub const ROUND_PRECISION: u32 = 2;
/// Maximum absolute value of any number.
pub const MAX_ABS_VALUE: i64 = 1_000_000_000;
/// Maximum length of either input sequence.
pub const MAX_LIST_LENGTH: usize = 1000;
/// Highest rounding precision a builder accepts.
pub const MAX_PRECISION: u32 = 15;

/// Round `x` to `precision` decimal digits, ties to even.
///
/// The exact binary value is rounded, not its shortest decimal spelling:
/// `0.995` is stored as `0.99499999...` and rounds to `0.99`. Float
/// formatting with an explicit precision is correctly rounded, so the
/// formatted string is the rounded value.
pub fn round_to(x: f64, precision: u32) -> f64 {
    let digits = precision as usize;
    format!("{x:.digits$}").parse().unwrap_or(x)
}

// ─── Builder ─────────────────────────────────────────────────────────

/// Limits applied while building a `Distribution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionBuilder {
    pub max_len: usize,
    pub max_abs_value: i64,
    pub precision: u32,
}

impl Default for DistributionBuilder {
    fn default() -> Self {
        Self {
            max_len: MAX_LIST_LENGTH,
            max_abs_value: MAX_ABS_VALUE,
            precision: ROUND_PRECISION,
        }
    }
}

/// Merged entries in first-occurrence order, plus the raw running sum.
#[derive(Debug)]
struct MergedEntries {
    values: Vec<i64>,
    probabilities: Vec<f64>,
    raw_total: f64,
}

impl DistributionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn round(&self, x: f64) -> f64 {
        round_to(x, self.precision)
    }

    /// Validate the raw entries and build an immutable `Distribution`.
    pub fn build<N, P>(
        &self,
        numbers: &[N],
        probabilities: &[P],
    ) -> Result<Distribution, BuildError>
    where
        N: NumberInput,
        P: ProbabilityInput,
    {
        self.validate_limits()?;
        self.validate_lengths(numbers.len(), probabilities.len())?;

        let merged = self.merge_entries(numbers, probabilities)?;
        self.validate_total(merged.raw_total)?;

        let cumulative = self.cumulative(&merged.probabilities);

        debug!(
            entries = numbers.len(),
            distinct = merged.values.len(),
            "distribution built"
        );

        Ok(Distribution {
            values: merged.values,
            probabilities: merged.probabilities,
            cumulative,
        })
    }

    /// Reject limits no input could be checked against.
    pub fn validate_limits(&self) -> Result<(), BuildError> {
        let reason = if self.max_len == 0 {
            "max_len must be at least 1".to_string()
        } else if self.max_abs_value < 0 {
            format!("max_abs_value must be non-negative, got {}", self.max_abs_value)
        } else if self.precision > MAX_PRECISION {
            format!("precision must be at most {MAX_PRECISION}, got {}", self.precision)
        } else {
            return Ok(());
        };
        Err(BuildError::InvalidLimits { reason })
    }

    fn validate_lengths(
        &self,
        numbers_len: usize,
        probabilities_len: usize,
    ) -> Result<(), BuildError> {
        if numbers_len == 0 || probabilities_len == 0 {
            return Err(BuildError::EmptyInput);
        }
        if numbers_len != probabilities_len {
            return Err(BuildError::LengthMismatch {
                numbers_len,
                probabilities_len,
            });
        }
        if numbers_len > self.max_len {
            return Err(BuildError::TooLong { max: self.max_len });
        }
        Ok(())
    }

    fn validate_number<N: NumberInput>(&self, number: &N) -> Result<i64, BuildError> {
        let value = number.to_number()?;
        // unsigned_abs: i64::MIN has no positive counterpart. The limit is
        // non-negative after validate_limits.
        if value.unsigned_abs() > self.max_abs_value.unsigned_abs() {
            return Err(BuildError::ValueOutOfRange {
                value,
                max: self.max_abs_value,
            });
        }
        Ok(value)
    }

    fn validate_probability<P: ProbabilityInput>(
        &self,
        probability: &P,
    ) -> Result<f64, BuildError> {
        let value = probability.to_probability()?;
        if value < 0.0 {
            return Err(BuildError::NegativeProbability { value });
        }
        Ok(value)
    }

    fn validate_total(&self, raw_total: f64) -> Result<(), BuildError> {
        if self.round(raw_total) != PROB_TOTAL {
            return Err(BuildError::ProbabilitySum { total: raw_total });
        }
        Ok(())
    }

    fn merge_entries<N, P>(
        &self,
        numbers: &[N],
        probabilities: &[P],
    ) -> Result<MergedEntries, BuildError>
    where
        N: NumberInput,
        P: ProbabilityInput,
    {
        let mut positions: HashMap<i64, usize> = HashMap::with_capacity(numbers.len());
        let mut values: Vec<i64> = Vec::with_capacity(numbers.len());
        let mut merged: Vec<f64> = Vec::with_capacity(numbers.len());
        let mut raw_total = 0.0_f64;

        for (number, probability) in numbers.iter().zip(probabilities) {
            let value = self.validate_number(number)?;
            let p = self.validate_probability(probability)?;

            match positions.entry(value) {
                Entry::Occupied(slot) => {
                    trace!(value, "merging duplicate value");
                    merged[*slot.get()] += p;
                }
                Entry::Vacant(slot) => {
                    slot.insert(values.len());
                    values.push(value);
                    merged.push(p);
                }
            }
            raw_total += p;
        }

        Ok(MergedEntries {
            values,
            probabilities: merged,
            raw_total,
        })
    }

    /// Running sum over `probabilities`, each partial sum rounded.
    fn cumulative(&self, probabilities: &[f64]) -> Vec<f64> {
        let mut running = 0.0_f64;
        probabilities
            .iter()
            .map(|p| {
                running += *p;
                self.round(running)
            })
            .collect()
    }
}

// ─── Distribution ────────────────────────────────────────────────────

/// A validated, immutable discrete distribution over distinct integers.
///
/// `cumulative` is non-decreasing and ends at 1.0 (after rounding). The
/// struct holds no interior mutability, so it is `Send + Sync` and can be
/// sampled from any number of threads at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    values: Vec<i64>,
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
}

impl Distribution {
    /// Build with the default limits.
    pub fn build(numbers: &[i64], probabilities: &[f64]) -> Result<Self, BuildError> {
        DistributionBuilder::default().build(numbers, probabilities)
    }

    /// Distinct values in first-occurrence order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Merged (unrounded) probability per value, parallel to `values`.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index_of(&self, value: i64) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    /// Merged probability assigned to `value`, if it is part of the distribution.
    pub fn probability_of(&self, value: i64) -> Option<f64> {
        self.index_of(value).map(|i| self.probabilities[i])
    }

    /// Map a uniform draw in `[0, 1)` to a value.
    #[inline]
    pub fn sample(&self, draw: f64) -> i64 {
        sampler::sample(self, draw)
    }
}
