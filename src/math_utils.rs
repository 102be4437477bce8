// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::SQRT_2;

pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// Inverse of the standard normal CDF, Φ⁻¹(p) = −√2 · erfc⁻¹(2p).
///
/// Returns ±∞ at the closed ends of the unit interval; callers feeding
/// quasi-random points keep `p` strictly inside (0, 1).
pub fn norm_inv(p: f64) -> f64 {
    -SQRT_2 * erf::erfc_inv(2.0 * p)
}
