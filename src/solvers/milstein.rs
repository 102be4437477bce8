//! Milstein Scheme for the Heston Variance
//!
//! # Mathematical Framework
//!
//! For dV = a(V)dt + b(V)dW with b(V) = η√V, the Milstein correction
//! ½ b b' [(ΔW)² − Δt] reduces to ¼η²Δt(W_V² − 1) with W_V ~ N(0,1):
//! ```text
//! V_{n+1} = max(0, V_n + κ(θ - V_n)Δt + η√V_n √Δt W_V + ¼η²Δt(W_V² - 1))
//! ```
//!
//! # Convergence Properties
//!
//! - **Strong convergence**: order 1.0 (vs 0.5 for Euler)
//! - Lower discretization bias than Euler at the same step count

use super::{HestonScheme, StepCoefficients};

/// Milstein discretization with full truncation
pub struct Milstein;

impl HestonScheme for Milstein {
    const NAME: &'static str = "milstein";

    #[inline]
    fn variance_step(v: f64, w_v: f64, c: &StepCoefficients) -> f64 {
        let sqrt_v = v.max(0.0).sqrt();
        let euler = v + c.kappa * (c.theta - v) * c.dt + c.eta * sqrt_v * c.sqrt_dt * w_v;
        // Itô correction
        let correction = 0.25 * c.eta * c.eta * c.dt * (w_v * w_v - 1.0);
        (euler + correction).max(0.0)
    }
}
