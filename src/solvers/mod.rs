//! Heston discretization schemes
//!
//! Every scheme shares the log-normal stock step
//! ```text
//! S_{n+1} = S_n * exp((r - V_n/2)Δt + √max(V_n,0) √Δt W_S)
//! ```
//! and differs only in the variance update. Schemes are stateless and act on
//! one path at a time; [`HestonScheme::advance`] applies them across all paths.

pub mod euler;
pub mod milstein;

pub use euler::Euler;
pub use milstein::Milstein;

use crate::error::HestonError;
use crate::models::HestonParams;
use ndarray::{ArrayView1, ArrayViewMut1, Zip};
use std::fmt;
use std::str::FromStr;

/// Per-run constants consumed by every step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepCoefficients {
    pub r: f64,
    pub kappa: f64,
    pub theta: f64,
    pub eta: f64,
    pub dt: f64,
    pub sqrt_dt: f64,
}

impl StepCoefficients {
    pub fn new(params: &HestonParams, dt: f64) -> Self {
        StepCoefficients {
            r: params.r(),
            kappa: params.kappa(),
            theta: params.theta(),
            eta: params.eta(),
            dt,
            sqrt_dt: dt.sqrt(),
        }
    }
}

/// A variance discretization for the Heston system.
pub trait HestonScheme: Send + Sync {
    /// Registry name
    const NAME: &'static str;

    /// Next variance, already floored at zero
    fn variance_step(v: f64, w_v: f64, c: &StepCoefficients) -> f64;

    /// Log-normal stock step shared by all schemes
    #[inline]
    fn price_step(s: f64, v: f64, w_s: f64, c: &StepCoefficients) -> f64 {
        let sqrt_v = v.max(0.0).sqrt();
        s * ((c.r - 0.5 * v) * c.dt + sqrt_v * c.sqrt_dt * w_s).exp()
    }

    /// Advance one path by one step, both updates reading the pre-step variance
    #[inline]
    fn step(s: f64, v: f64, w_s: f64, w_v: f64, c: &StepCoefficients) -> (f64, f64) {
        (
            Self::price_step(s, v, w_s, c),
            Self::variance_step(v, w_v, c),
        )
    }

    /// Advance every path in place. Paths are independent and processed in parallel.
    fn advance(
        s: ArrayViewMut1<f64>,
        v: ArrayViewMut1<f64>,
        w_s: ArrayView1<f64>,
        w_v: ArrayView1<f64>,
        c: &StepCoefficients,
    ) {
        Zip::from(s)
            .and(v)
            .and(w_s)
            .and(w_v)
            .par_for_each(|s, v, &w_s, &w_v| {
                let (s_next, v_next) = Self::step(*s, *v, w_s, w_v, c);
                *s = s_next;
                *v = v_next;
            });
    }
}

/// Closed set of available schemes, resolved once before simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scheme {
    /// Full-truncation Euler
    #[default]
    Euler,
    /// Euler plus the ¼η²Δt(W_V² − 1) correction
    Milstein,
}

impl Scheme {
    pub const ALL: [Scheme; 2] = [Scheme::Euler, Scheme::Milstein];

    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Euler => Euler::NAME,
            Scheme::Milstein => Milstein::NAME,
        }
    }

    /// Registry lookup by name (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self, HestonError> {
        Scheme::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| HestonError::UnknownScheme {
                name: name.to_string(),
                expected: Scheme::ALL
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl FromStr for Scheme {
    type Err = HestonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::from_name(s)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
