//! Sampler configuration loaded from TOML.
//!
//! ```toml
//! seed = 42
//!
//! [distribution]
//! numbers = [-1, 0, 1, 2, 3]
//! probabilities = [0.01, 0.3, 0.58, 0.1, 0.01]
//!
//! [limits]
//! max_len = 1000
//! ```
//!
//! The distribution arrays are kept as raw TOML values, so a float in
//! `numbers` or a string in `probabilities` is reported by the validator
//! with its TOML type instead of failing at parse time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::distribution::{Distribution, DistributionBuilder};
use crate::error::BuildError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Raw `(numbers, probabilities)` arrays as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDistribution {
    pub numbers: Vec<toml::Value>,
    pub probabilities: Vec<toml::Value>,
}

/// A complete sampler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Master seed; `None` means seed from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub distribution: RawDistribution,
    #[serde(default)]
    pub limits: DistributionBuilder,
}

impl SamplerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded sampler config");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The builder described by `[limits]`, after sanity checks.
    pub fn builder(&self) -> Result<DistributionBuilder, ConfigError> {
        self.limits.validate_limits()?;
        Ok(self.limits)
    }

    /// Validate the raw arrays and build the distribution.
    pub fn build(&self) -> Result<Distribution, ConfigError> {
        let builder = self.builder()?;
        let distribution =
            builder.build(&self.distribution.numbers, &self.distribution.probabilities)?;
        Ok(distribution)
    }
}
