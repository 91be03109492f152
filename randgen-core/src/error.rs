//! Construction errors for `Distribution`.
//!
//! Every variant is fatal to construction. Validation stops at the first
//! violation, so a caller only ever sees one error per `build` call.

use thiserror::Error;

/// Errors raised while validating and normalizing raw entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// Builder limits that no input could satisfy, e.g. a negative `max_abs_value`.
    #[error("Input Error: Invalid builder limits: {reason}.")]
    InvalidLimits { reason: String },

    #[error("Input Error: Both numbers and probabilities cannot be empty.")]
    EmptyInput,

    #[error(
        "Input Error: The numbers list has {numbers_len} elements while the probabilities \
         list has {probabilities_len} elements. They should match."
    )]
    LengthMismatch {
        numbers_len: usize,
        probabilities_len: usize,
    },

    #[error("Input Error: The length of the list exceeds the maximum allowed length of {max}.")]
    TooLong { max: usize },

    /// A number that is not an integer. Only reachable from dynamically typed input.
    #[error(
        "Type Error: Expected an integer in the numbers list but found {value} of type {observed_type}."
    )]
    NonIntegerValue {
        value: String,
        observed_type: &'static str,
    },

    #[error("Value Error: Number {value} in the list exceeds the maximum allowed value of {max}.")]
    ValueOutOfRange { value: i64, max: i64 },

    /// A probability that is not a float. Only reachable from dynamically typed input.
    #[error(
        "Type Error: Expected a float in the probabilities list but found {value} of type {observed_type}."
    )]
    NonFloatProbability {
        value: String,
        observed_type: &'static str,
    },

    #[error("Value Error: Probabilities cannot be negative. Found a negative value: {value}.")]
    NegativeProbability { value: f64 },

    /// `total` is the raw running sum, before rounding.
    #[error("Value Error: The sum of probabilities is {total}, but it must be equal to 1.0.")]
    ProbabilitySum { total: f64 },
}
