//! RandGen Core — weighted discrete sampling over integer values.
//!
//! This crate contains:
//! - Input validation and duplicate merging (`DistributionBuilder`)
//! - The immutable cumulative distribution (`Distribution`)
//! - Binary-search sampling over an injected uniform source
//! - Deterministic seed hierarchy for reproducible and parallel draws
//! - Batch sampling with frequency tallies
//! - TOML configuration and JSON/CSV export
//!
//! ```
//! use randgen_core::{Distribution, RandomGen, ScriptedDraws};
//!
//! let dist = Distribution::build(&[1, 2, 3], &[0.3, 0.3, 0.4]).unwrap();
//! assert_eq!(dist.cumulative(), &[0.3, 0.6, 1.0]);
//!
//! let mut gen = RandomGen::new(dist, ScriptedDraws::new([0.35, 0.95]));
//! assert_eq!(gen.next_num(), 2);
//! assert_eq!(gen.next_num(), 3);
//! ```

pub mod batch;
pub mod config;
pub mod distribution;
pub mod error;
pub mod export;
pub mod input;
pub mod rng;
pub mod sampler;

pub use batch::{sample_batch, sample_batch_parallel, Tally, TallyRow, DEFAULT_CHUNK_SIZE};
pub use config::{ConfigError, RawDistribution, SamplerConfig};
pub use distribution::{
    round_to, Distribution, DistributionBuilder, MAX_ABS_VALUE, MAX_LIST_LENGTH, MAX_PRECISION,
    PROB_TOTAL, ROUND_PRECISION,
};
pub use error::BuildError;
pub use input::{NumberInput, ProbabilityInput};
pub use rng::SeedHierarchy;
pub use sampler::{insert_position, sample, RandomGen, Samples, ScriptedDraws, UniformSource};
