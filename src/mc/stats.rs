//! Monte Carlo Statistics
//!
//! Reduces discounted payoff samples to a price estimate with a 95%
//! confidence interval:
//! ```text
//! price      = mean(Y)
//! std_error  = sd(Y; Bessel) / √n
//! half_width = 1.96 · std_error
//! CI         = [price - half_width, price + half_width]
//! ```
//!
//! `n` is the number of effective paths, mirrored antithetic paths included.
//! A single sample has no dispersion estimate: its standard error and
//! interval bounds are NaN.

use crate::config::SimConfig;
use crate::error::{HestonError, HestonResult};
use crate::models::HestonParams;
use ndarray::ArrayView1;

/// Two-sided 95% normal quantile
pub const Z_95: f64 = 1.96;

/// Price estimate with its sampling error and the configuration that produced it
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingResult {
    pub price: f64,
    pub std_error: f64,
    pub confidence_interval: (f64, f64),
    pub ci_half_width: f64,
    /// Paths actually simulated (antithetic doubles the base draws)
    pub effective_paths: usize,
    pub config: SimConfig,
}

impl PricingResult {
    /// Summarize present-valued payoffs from one simulation run.
    pub fn from_payoffs(payoffs: ArrayView1<f64>, config: &SimConfig) -> HestonResult<Self> {
        let effective_paths = payoffs.len();
        let (price, std_error) = mean_and_std_error(payoffs)?;
        let ci_half_width = Z_95 * std_error;

        Ok(PricingResult {
            price,
            std_error,
            confidence_interval: (price - ci_half_width, price + ci_half_width),
            ci_half_width,
            effective_paths,
            config: config.clone(),
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = self.confidence_interval;
        (lo..=hi).contains(&value)
    }
}

/// Sample mean and standard error of the mean; the error is NaN for one sample
pub fn mean_and_std_error(samples: ArrayView1<f64>) -> HestonResult<(f64, f64)> {
    let n = samples.len();
    if n == 0 {
        return Err(HestonError::MonteCarloError {
            paths: 0,
            reason: "no payoff samples to average".to_string(),
        });
    }

    let mean = samples.sum() / n as f64;
    if !mean.is_finite() {
        return Err(HestonError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Price estimate is not finite: {}", mean),
        });
    }
    if n == 1 {
        return Ok((mean, f64::NAN));
    }

    let std_error = (sample_variance(samples) / n as f64).sqrt();
    if !std_error.is_finite() {
        return Err(HestonError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Standard error is not finite: {}", std_error),
        });
    }

    Ok((mean, std_error))
}

/// Bessel-corrected sample variance; NaN below two samples
pub fn sample_variance(samples: ArrayView1<f64>) -> f64 {
    let n = samples.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = samples.sum() / n as f64;
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Put-call parity diagnostic: C − P against S0 − K·e^(−rT)
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParityCheck {
    pub call_price: f64,
    pub put_price: f64,
    pub call_std_error: f64,
    pub put_std_error: f64,
    pub call_minus_put: f64,
    pub spot_minus_discounted_strike: f64,
    pub difference: f64,
    /// Infinite when S0 − K·e^(−rT) is exactly zero
    pub relative_error: f64,
}

impl ParityCheck {
    pub fn new(call: &PricingResult, put: &PricingResult, params: &HestonParams) -> Self {
        let call_minus_put = call.price - put.price;
        let spot_minus_discounted_strike = params.s0() - params.k() * params.discount_factor();
        let difference = (call_minus_put - spot_minus_discounted_strike).abs();
        let relative_error = if spot_minus_discounted_strike != 0.0 {
            difference / spot_minus_discounted_strike.abs()
        } else {
            f64::INFINITY
        };

        ParityCheck {
            call_price: call.price,
            put_price: put.price,
            call_std_error: call.std_error,
            put_std_error: put.std_error,
            call_minus_put,
            spot_minus_discounted_strike,
            difference,
            relative_error,
        }
    }

    /// Whether the gap is within `multiple` times the combined standard errors
    pub fn holds_within(&self, multiple: f64) -> bool {
        self.difference <= multiple * (self.call_std_error + self.put_std_error)
    }
}

/// Comparison of payoff variances between a plain and a variance-reduced run
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VarianceReductionReport {
    pub variance_standard: f64,
    pub variance_reduced: f64,
    /// (1 − reduced / standard) · 100, zero when the standard variance is zero
    pub variance_reduction_pct: f64,
    /// standard / reduced, infinite when the reduced variance is zero
    pub efficiency_ratio: f64,
}

pub fn estimate_variance_reduction(
    payoffs_standard: ArrayView1<f64>,
    payoffs_reduced: ArrayView1<f64>,
) -> HestonResult<VarianceReductionReport> {
    for (name, len) in [
        ("payoffs_standard", payoffs_standard.len()),
        ("payoffs_reduced", payoffs_reduced.len()),
    ] {
        if len < 2 {
            return Err(HestonError::InvalidConfiguration {
                field: name.to_string(),
                reason: format!("needs at least two samples, got {}", len),
            });
        }
    }

    let variance_standard = sample_variance(payoffs_standard);
    let variance_reduced = sample_variance(payoffs_reduced);

    let variance_reduction_pct = if variance_standard == 0.0 {
        0.0
    } else {
        (1.0 - variance_reduced / variance_standard) * 100.0
    };
    let efficiency_ratio = if variance_reduced > 0.0 {
        variance_standard / variance_reduced
    } else {
        f64::INFINITY
    };

    Ok(VarianceReductionReport {
        variance_standard,
        variance_reduced,
        variance_reduction_pct,
        efficiency_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_from_payoffs_statistics() {
        let payoffs = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = PricingResult::from_payoffs(payoffs.view(), &SimConfig::default()).unwrap();

        // Sample sd of 1..5 is sqrt(2.5)
        let expected_se = (2.5f64 / 5.0).sqrt();
        assert_abs_diff_eq!(result.price, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.std_error, expected_se, epsilon = 1e-12);
        assert_abs_diff_eq!(result.ci_half_width, 1.96 * expected_se, epsilon = 1e-12);
        assert_abs_diff_eq!(result.confidence_interval.0, 3.0 - 1.96 * expected_se, epsilon = 1e-12);
        assert_abs_diff_eq!(result.confidence_interval.1, 3.0 + 1.96 * expected_se, epsilon = 1e-12);
        assert_eq!(result.effective_paths, 5);
        assert!(result.contains(3.0));
    }

    #[test]
    fn test_antithetic_statistics_use_every_effective_path() {
        let config = SimConfig {
            paths: 4,
            use_antithetic: true,
            ..Default::default()
        };
        // Mirrors are ordinary samples: sd of [1, 0, 3, 4] is sqrt(10/3)
        let payoffs = array![1.0, 0.0, 3.0, 4.0];
        let result = PricingResult::from_payoffs(payoffs.view(), &config).unwrap();
        let expected_se = (10.0f64 / 3.0).sqrt() / 2.0;
        assert_abs_diff_eq!(result.price, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.std_error, expected_se, epsilon = 1e-12);
        assert_abs_diff_eq!(result.std_error, 0.9128709291752769, epsilon = 1e-12);
        assert_eq!(result.effective_paths, 4);
    }

    #[test]
    fn test_single_sample_has_undefined_error() {
        let payoffs = array![7.5];
        let result = PricingResult::from_payoffs(payoffs.view(), &SimConfig::default()).unwrap();
        assert_eq!(result.price, 7.5);
        assert!(result.std_error.is_nan());
        assert!(result.ci_half_width.is_nan());
        assert!(result.confidence_interval.0.is_nan() && result.confidence_interval.1.is_nan());
        assert!(!result.contains(7.5));
    }

    #[test]
    fn test_empty_payoffs_rejected() {
        let payoffs = ndarray::Array1::<f64>::zeros(0);
        assert!(matches!(
            PricingResult::from_payoffs(payoffs.view(), &SimConfig::default()),
            Err(HestonError::MonteCarloError { paths: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_payoffs_are_reported() {
        let payoffs = array![1.0, f64::INFINITY];
        assert!(matches!(
            mean_and_std_error(payoffs.view()),
            Err(HestonError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_parity_relative_error_infinite_when_rhs_zero() {
        // S0 = K·e^(−rT) with r = 0
        let params = HestonParams::new(100.0, 100.0, 0.0, 1.0, 0.04, 2.0, 0.04, 0.3, -0.7).unwrap();
        let call = PricingResult::from_payoffs(array![8.0, 10.0].view(), &SimConfig::default()).unwrap();
        let put = PricingResult::from_payoffs(array![8.0, 9.0].view(), &SimConfig::default()).unwrap();

        let check = ParityCheck::new(&call, &put, &params);
        assert_abs_diff_eq!(check.call_minus_put, 0.5, epsilon = 1e-12);
        assert_eq!(check.spot_minus_discounted_strike, 0.0);
        assert_abs_diff_eq!(check.difference, 0.5, epsilon = 1e-12);
        assert!(check.relative_error.is_infinite());
    }

    #[test]
    fn test_variance_reduction_report() {
        let standard = array![0.0, 2.0, 4.0, 6.0];
        let reduced = array![2.0, 3.0, 3.0, 4.0];
        let report = estimate_variance_reduction(standard.view(), reduced.view()).unwrap();

        assert_abs_diff_eq!(report.variance_standard, 20.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.variance_reduced, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.variance_reduction_pct, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.efficiency_ratio, 10.0, epsilon = 1e-9);

        let constant = array![1.0, 1.0, 1.0];
        let report = estimate_variance_reduction(constant.view(), constant.view()).unwrap();
        assert_eq!(report.variance_reduction_pct, 0.0);
        assert!(report.efficiency_ratio.is_infinite());

        assert!(estimate_variance_reduction(array![1.0].view(), constant.view()).is_err());
    }
}
