// src/config.rs
use crate::error::{validation::*, HestonError, HestonResult};
use crate::sobol::SOBOL_MAX_DIMENSIONS;
use crate::solvers::Scheme;
use std::fmt;

/// Number of independent normal factors consumed per step and path
pub const FACTORS: usize = 2;

/// How the random draw tensor is produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SamplingStrategy {
    /// Independent pseudo-random normals
    Standard,
    /// Base draws followed by their negation
    Antithetic,
    /// Scrambled Sobol points mapped through Φ⁻¹
    QuasiRandom,
}

impl SamplingStrategy {
    /// Paths actually simulated for a requested path count
    pub fn effective_paths(&self, paths: usize) -> usize {
        match self {
            SamplingStrategy::Antithetic => 2 * ((paths + 1) / 2),
            SamplingStrategy::Standard | SamplingStrategy::QuasiRandom => paths,
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SamplingStrategy::Standard => "standard",
            SamplingStrategy::Antithetic => "antithetic",
            SamplingStrategy::QuasiRandom => "sobol",
        })
    }
}

/// Monte Carlo simulation settings
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub paths: usize,
    pub steps: usize,
    pub scheme: Scheme,
    pub use_antithetic: bool,
    pub use_sobol: bool,
    /// Keep full (path, step) price and variance trajectories
    pub return_paths: bool,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            paths: 10_000,
            steps: 100,
            scheme: Scheme::Euler,
            use_antithetic: false,
            use_sobol: false,
            return_paths: false,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Validate the configuration and resolve the sampling strategy.
    pub fn validate(&self) -> HestonResult<SamplingStrategy> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;

        match (self.use_antithetic, self.use_sobol) {
            (true, true) => Err(HestonError::InvalidConfiguration {
                field: "use_antithetic/use_sobol".to_string(),
                reason: "antithetic variates and Sobol sampling are mutually exclusive".to_string(),
            }),
            (true, false) => Ok(SamplingStrategy::Antithetic),
            (false, true) => {
                if FACTORS * self.steps > SOBOL_MAX_DIMENSIONS {
                    return Err(HestonError::InvalidConfiguration {
                        field: "steps".to_string(),
                        reason: format!(
                            "Sobol sampling needs {} dimensions, maximum is {}",
                            FACTORS * self.steps,
                            SOBOL_MAX_DIMENSIONS
                        ),
                    });
                }
                Ok(SamplingStrategy::QuasiRandom)
            }
            (false, false) => Ok(SamplingStrategy::Standard),
        }
    }

    /// Expected random tensor shape (steps, effective paths, factors)
    pub fn draw_shape(&self, strategy: SamplingStrategy) -> [usize; 3] {
        [self.steps, strategy.effective_paths(self.paths), FACTORS]
    }

    /// Copy with a fixed seed
    pub fn with_seed(&self, seed: u64) -> Self {
        SimConfig {
            seed: Some(seed),
            ..self.clone()
        }
    }
}
