//! Input element contracts for the builder.
//!
//! Native Rust slices (`&[i64]`, `&[f64]`) satisfy the integer/float contract at
//! compile time and never fail here. TOML values read from a configuration file
//! are checked at runtime and report the TOML type name they actually carried.

use crate::error::BuildError;

/// An element of the `numbers` sequence.
pub trait NumberInput {
    fn to_number(&self) -> Result<i64, BuildError>;
}

/// An element of the `probabilities` sequence.
pub trait ProbabilityInput {
    fn to_probability(&self) -> Result<f64, BuildError>;
}

impl NumberInput for i64 {
    #[inline]
    fn to_number(&self) -> Result<i64, BuildError> {
        Ok(*self)
    }
}

impl NumberInput for i32 {
    #[inline]
    fn to_number(&self) -> Result<i64, BuildError> {
        Ok(i64::from(*self))
    }
}

impl NumberInput for toml::Value {
    fn to_number(&self) -> Result<i64, BuildError> {
        match self {
            toml::Value::Integer(n) => Ok(*n),
            other => Err(BuildError::NonIntegerValue {
                value: other.to_string(),
                observed_type: other.type_str(),
            }),
        }
    }
}

impl ProbabilityInput for f64 {
    #[inline]
    fn to_probability(&self) -> Result<f64, BuildError> {
        Ok(*self)
    }
}

impl ProbabilityInput for f32 {
    #[inline]
    fn to_probability(&self) -> Result<f64, BuildError> {
        Ok(f64::from(*self))
    }
}

impl ProbabilityInput for toml::Value {
    fn to_probability(&self) -> Result<f64, BuildError> {
        match self {
            toml::Value::Float(p) => Ok(*p),
            other => Err(BuildError::NonFloatProbability {
                value: other.to_string(),
                observed_type: other.type_str(),
            }),
        }
    }
}
