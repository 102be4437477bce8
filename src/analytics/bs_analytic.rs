// src/analytics/bs_analytic.rs
//! Closed-form Black-Scholes prices and call Greeks
//!
//! The Heston model collapses to Black-Scholes with σ = √V0 when η = 0 and
//! θ = V0, which makes these formulas the reference for convergence checks.
//!
//! ```text
//! d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! ```

use crate::math_utils::norm_cdf;
use std::f64::consts::PI;

fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    (d1, d1 - sigma_sqrt_t)
}

/// C = S Φ(d₁) - K e^(-rT) Φ(d₂)
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// P = K e^(-rT) Φ(-d₂) - S Φ(-d₁)
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}

/// Δ = Φ(d₁)
pub fn bs_call_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    norm_cdf(d1_d2(s, k, r, sigma, t).0)
}

/// Γ = φ(d₁) / (S σ √T), identical for puts
pub fn bs_call_gamma(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_pdf(d1) / (s * sigma * t.sqrt())
}

/// ν = S φ(d₁) √T, per unit of σ
pub fn bs_call_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    s * norm_pdf(d1) * t.sqrt()
}

/// Θ = -S φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂), per year of calendar time
pub fn bs_call_theta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    -s * norm_pdf(d1) * sigma / (2.0 * t.sqrt()) - r * k * (-r * t).exp() * norm_cdf(d2)
}

/// ρ = K T e^(-rT) Φ(d₂)
pub fn bs_call_rho(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, sigma, t);
    k * t * (-r * t).exp() * norm_cdf(d2)
}
