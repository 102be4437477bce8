//! Full-Truncation Euler Scheme for the Heston Variance
//!
//! # Mathematical Description
//!
//! ```text
//! V_{n+1} = max(0, V_n + κ(θ - V_n)Δt + η√max(V_n,0) √Δt W_V)
//! ```
//!
//! # Characteristics
//! - **Speed**: single evaluation per step
//! - **Accuracy**: first-order weak convergence
//! - **Stability**: the outer `max(0, ·)` makes zero absorbing, so variance
//!   never goes negative even when the Feller condition fails

use super::{HestonScheme, StepCoefficients};

/// Full-truncation Euler discretization
pub struct Euler;

impl HestonScheme for Euler {
    const NAME: &'static str = "euler";

    #[inline]
    fn variance_step(v: f64, w_v: f64, c: &StepCoefficients) -> f64 {
        let sqrt_v = v.max(0.0).sqrt();
        (v + c.kappa * (c.theta - v) * c.dt + c.eta * sqrt_v * c.sqrt_dt * w_v).max(0.0)
    }
}
