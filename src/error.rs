//! Error types for line model inputs and evaluation

use thiserror::Error;

/// Result type for line model operations
pub type Result<T> = std::result::Result<T, LineError>;

/// Errors raised while validating inputs or evaluating a line network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    /// A parameter violates a physical constraint
    #[error("invalid {parameter} = {value}: must be {constraint}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// A parameter is outside the range accepted from a config file
    #[error("{parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The termination cancels the reference impedance, so Γ has no finite value
    #[error("singular termination: load {resistance:+} {reactance:+}j Ω against {reference} Ω reference")]
    SingularTermination {
        resistance: f64,
        reactance: f64,
        reference: f64,
    },

    /// The frequency sweep cannot be built from the given settings
    #[error("invalid sweep: {0}")]
    InvalidSweep(String),
}

/// Rejects NaN and infinities, then checks `valid` against the finite value.
pub(crate) fn ensure(
    parameter: &'static str,
    value: f64,
    constraint: &'static str,
    valid: impl Fn(f64) -> bool,
) -> Result<f64> {
    if value.is_finite() && valid(value) {
        Ok(value)
    } else {
        Err(LineError::InvalidParameter {
            parameter,
            value,
            constraint,
        })
    }
}

pub(crate) fn ensure_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(LineError::OutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}
