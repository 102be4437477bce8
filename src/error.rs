// src/error.rs
use thiserror::Error;

/// Error types for the heston-mc library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HestonError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid simulation configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Scheme name not present in the registry
    #[error("Unknown discretization scheme '{name}' (expected one of: {expected})")]
    UnknownScheme { name: String, expected: String },

    /// Caller-supplied random draw tensor does not match the simulation layout
    #[error(
        "Random draw tensor has shape {actual:?} but (steps, effective paths, factors) = {expected:?} is required"
    )]
    ShapeMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },

    /// Feller condition violation, only raised on explicit request
    #[error(
        "Feller condition violated: 2κθ = {feller_value:.6} ≤ η² = {eta_sq:.6} (κ={kappa}, θ={theta}, η={eta}). Variance may hit zero.",
        eta_sq = .eta * .eta
    )]
    FellerConditionViolation {
        kappa: f64,
        theta: f64,
        eta: f64,
        feller_value: f64,
    },

    /// Monte Carlo simulation error
    #[error("Monte Carlo simulation error with {paths} paths: {reason}")]
    MonteCarloError { paths: usize, reason: String },

    /// Numerical instability in an estimate
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

/// Result type alias for heston-mc operations
pub type HestonResult<T> = Result<T, HestonError>;

/// Validation utilities
pub mod validation {
    use super::{HestonError, HestonResult};

    pub const MAX_PATHS: usize = 1_000_000_000;
    pub const MAX_STEPS: usize = 100_000;

    /// Validate that a parameter is strictly positive
    pub fn validate_positive(name: &str, value: f64) -> HestonResult<()> {
        // NaN fails the comparison too
        if !(value > 0.0) || !value.is_finite() {
            Err(HestonError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> HestonResult<()> {
        if !(value >= 0.0) || !value.is_finite() {
            Err(HestonError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within a closed range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> HestonResult<()> {
        if !(min..=max).contains(&value) {
            Err(HestonError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        } else {
            Ok(())
        }
    }

    pub fn validate_correlation(name: &str, rho: f64) -> HestonResult<()> {
        validate_range(name, rho, -1.0, 1.0)
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> HestonResult<()> {
        if !value.is_finite() {
            Err(HestonError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> HestonResult<()> {
        if paths == 0 {
            Err(HestonError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > MAX_PATHS {
            Err(HestonError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: format!("{} exceeds maximum allowed (1 billion)", paths),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> HestonResult<()> {
        if steps == 0 {
            Err(HestonError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > MAX_STEPS {
            Err(HestonError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: format!("{} exceeds maximum allowed (100,000)", steps),
            })
        } else {
            Ok(())
        }
    }
}
