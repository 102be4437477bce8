// src/models/heston.rs
//! Heston Stochastic Volatility Model Parameters
//!
//! # Mathematical Framework
//!
//! ```text
//! dS_t = r S_t dt + √V_t S_t dW_t^S
//! dV_t = κ(θ - V_t) dt + η√V_t dW_t^V
//! d⟨W^S, W^V⟩_t = ρ dt
//! ```
//!
//! Where:
//! - S_t: Asset price, V_t: instantaneous variance
//! - κ: Mean reversion speed, θ: long-run variance
//! - η: Volatility of variance (vol-of-vol)
//! - ρ: Correlation between the two Brownian motions
//!
//! # Feller Condition
//!
//! ```text
//! 2κθ > η²
//! ```
//!
//! guarantees a strictly positive variance in continuous time. Violation is
//! advisory only: the discretized schemes floor variance at zero.

use crate::error::{validation::*, HestonError, HestonResult};
use tracing::warn;

/// Immutable Heston model and contract parameters.
///
/// Fields are private; perturbed copies for sensitivities are built with the
/// `with_*` methods, which re-validate and never touch `self`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HestonParams {
    s0: f64,    // Initial stock price
    k: f64,     // Strike
    r: f64,     // Risk-free rate
    t: f64,     // Maturity in years
    v0: f64,    // Initial variance
    kappa: f64, // Mean reversion speed
    theta: f64, // Long-run variance
    eta: f64,   // Volatility of variance
    rho: f64,   // Correlation between stock and variance
}

impl Default for HestonParams {
    fn default() -> Self {
        HestonParams {
            s0: 100.0,
            k: 100.0,
            r: 0.05,
            t: 1.0,
            v0: 0.04,
            kappa: 2.0,
            theta: 0.04,
            eta: 0.3,
            rho: -0.7,
        }
    }
}

impl HestonParams {
    /// Build and validate a parameter set, warning once if the Feller
    /// condition is violated.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        s0: f64,
        k: f64,
        r: f64,
        t: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        eta: f64,
        rho: f64,
    ) -> HestonResult<Self> {
        let params = HestonParams {
            s0,
            k,
            r,
            t,
            v0,
            kappa,
            theta,
            eta,
            rho,
        };
        params.validate()?;

        if !params.feller_condition_satisfied() {
            warn!(
                kappa,
                theta,
                eta,
                feller_value = params.feller_value(),
                "Feller condition violated (2κθ ≤ η²); variance may hit zero"
            );
        }

        Ok(params)
    }

    fn validate(&self) -> HestonResult<()> {
        validate_positive("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_finite("r", self.r)?;
        validate_positive("t", self.t)?;
        validate_non_negative("v0", self.v0)?;
        validate_positive("kappa", self.kappa)?;
        validate_non_negative("theta", self.theta)?;
        validate_non_negative("eta", self.eta)?;
        validate_correlation("rho", self.rho)?;
        Ok(())
    }

    pub fn s0(&self) -> f64 {
        self.s0
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn v0(&self) -> f64 {
        self.v0
    }

    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }

    /// 2κθ, the left-hand side of the Feller inequality
    pub fn feller_value(&self) -> f64 {
        2.0 * self.kappa * self.theta
    }

    pub fn feller_condition_satisfied(&self) -> bool {
        self.feller_value() > self.eta * self.eta
    }

    /// Strict variant of the Feller check for callers that want to reject
    /// parameter sets whose variance can reach zero.
    pub fn feller_check(&self) -> HestonResult<()> {
        if self.feller_condition_satisfied() {
            Ok(())
        } else {
            Err(HestonError::FellerConditionViolation {
                kappa: self.kappa,
                theta: self.theta,
                eta: self.eta,
                feller_value: self.feller_value(),
            })
        }
    }

    fn derive(self) -> HestonResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Copy with a different initial stock price
    pub fn with_spot(&self, s0: f64) -> HestonResult<Self> {
        HestonParams { s0, ..*self }.derive()
    }

    /// Copy with a different initial variance
    pub fn with_initial_variance(&self, v0: f64) -> HestonResult<Self> {
        HestonParams { v0, ..*self }.derive()
    }

    /// Copy with a different maturity
    pub fn with_maturity(&self, t: f64) -> HestonResult<Self> {
        HestonParams { t, ..*self }.derive()
    }

    /// Copy with a different risk-free rate
    pub fn with_rate(&self, r: f64) -> HestonResult<Self> {
        HestonParams { r, ..*self }.derive()
    }
}
