//! # heston-mc: Monte Carlo Pricing under the Heston Model
//!
//! Simulates the Heston stochastic-volatility system and prices European
//! options from the simulated terminal prices.
//!
//! ## Key Features
//!
//! - **Discretization Schemes**: full-truncation Euler and Milstein, selected by name
//! - **Variance Reduction**: antithetic variates or scrambled Sobol sequences
//! - **Parallel Stepping**: every time step advances all paths with Rayon
//! - **Reproducibility**: a seeded configuration gives bit-identical results
//! - **Greeks**: bump-and-reprice with common random numbers
//! - **Diagnostics**: put-call parity and variance-reduction reports
//!
//! ## Quick Start
//!
//! ```rust
//! use heston_mc::{HestonParams, HestonPricer, Scheme, SimConfig};
//!
//! let params = HestonParams::new(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.3, -0.7)
//!     .expect("Valid parameters");
//! let config = SimConfig {
//!     paths: 20_000,
//!     steps: 50,
//!     scheme: Scheme::Milstein,
//!     use_antithetic: true,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let pricer = HestonPricer::new(params);
//! let call = pricer.price_call(&config).expect("Valid configuration");
//! println!(
//!     "Call: {:.4} ± {:.4} (95% CI {:.4} to {:.4})",
//!     call.price, call.std_error, call.confidence_interval.0, call.confidence_interval.1
//! );
//! ```
//!
//! ## Model
//!
//! ```text
//! dS_t = r S_t dt + √V_t S_t dW_t^S
//! dV_t = κ(θ - V_t) dt + η√V_t dW_t^V,   d⟨W^S, W^V⟩ = ρ dt
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod rng;
pub mod sobol;
pub mod solvers;

pub use config::{SamplingStrategy, SimConfig};
pub use error::{HestonError, HestonResult};
pub use mc::{
    estimate_variance_reduction, simulate_heston, GreeksResult, HestonPricer, ParityCheck, Payoff,
    PricingResult, SimulationOutput, Trajectories, VarianceReductionReport,
};
pub use models::HestonParams;
pub use solvers::Scheme;
