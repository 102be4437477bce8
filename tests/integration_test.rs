// tests/integration_test.rs
use heston_mc::analytics::bs_analytic;
use heston_mc::mc::payoffs::Payoff;
use heston_mc::mc::stats::estimate_variance_reduction;
use heston_mc::{HestonError, HestonParams, HestonPricer, Scheme, SimConfig};
use ndarray::{s, Array3};

fn reference_params() -> HestonParams {
    HestonParams::new(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.3, -0.7).expect("Valid parameters")
}

/// η = 0, θ = V0, ρ = 0: variance is frozen at V0 and the model is Black-Scholes
fn black_scholes_limit() -> HestonParams {
    HestonParams::new(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.0, 0.0).expect("Valid parameters")
}

#[test]
fn test_sobol_matches_black_scholes_in_degenerate_limit() {
    let pricer = HestonPricer::new(black_scholes_limit());
    let cfg = SimConfig {
        paths: 50_000,
        steps: 1,
        use_sobol: true,
        seed: Some(42),
        ..Default::default()
    };

    let mc = pricer.price_call(&cfg).expect("Valid configuration");
    let analytic = bs_analytic::bs_call_price(100.0, 100.0, 0.05, 0.2, 1.0);

    println!("\nSobol MC call: {:.6}, Black-Scholes: {:.6}", mc.price, analytic);
    assert!(
        (mc.price - analytic).abs() < 0.05,
        "Sobol price {} too far from Black-Scholes {}",
        mc.price,
        analytic
    );
}

#[test]
fn test_pseudo_random_matches_black_scholes_within_error() {
    let pricer = HestonPricer::new(black_scholes_limit());
    let cfg = SimConfig {
        paths: 50_000,
        steps: 50,
        seed: Some(42),
        ..Default::default()
    };

    let call = pricer.price_call(&cfg).expect("Valid configuration");
    let put = pricer.price_put(&cfg).expect("Valid configuration");
    let call_ref = bs_analytic::bs_call_price(100.0, 100.0, 0.05, 0.2, 1.0);
    let put_ref = bs_analytic::bs_put_price(100.0, 100.0, 0.05, 0.2, 1.0);

    println!("\nCall {:.4} ± {:.4} vs {:.4}", call.price, call.std_error, call_ref);
    println!("Put  {:.4} ± {:.4} vs {:.4}", put.price, put.std_error, put_ref);

    assert!((call.price - call_ref).abs() < 4.0 * call.std_error);
    assert!((put.price - put_ref).abs() < 4.0 * put.std_error);
}

#[test]
fn test_put_call_parity_at_reference_parameters() {
    let pricer = HestonPricer::new(reference_params());
    let cfg = SimConfig {
        paths: 50_000,
        steps: 100,
        seed: Some(42),
        ..Default::default()
    };

    let call = pricer.price_call(&cfg).expect("Valid configuration");
    let put = pricer.price_put(&cfg).expect("Valid configuration");
    let lhs = call.price - put.price;
    let rhs = 100.0 - 100.0 * (-0.05_f64).exp();

    println!("\nC - P = {:.4}, S0 - K e^(-rT) = {:.4}", lhs, rhs);
    assert!((lhs - rhs).abs() <= 3.0 * (call.std_error + put.std_error));

    let check = pricer.verify_put_call_parity(&cfg).expect("Valid configuration");
    assert_eq!(check.call_price, call.price);
    assert_eq!(check.put_price, put.price);
    assert!(check.holds_within(3.0));
}

#[test]
fn test_seeded_runs_are_bit_identical() {
    let pricer = HestonPricer::new(reference_params());
    for scheme in Scheme::ALL {
        for (use_antithetic, use_sobol) in [(false, false), (true, false), (false, true)] {
            let cfg = SimConfig {
                paths: 2_000,
                steps: 30,
                scheme,
                use_antithetic,
                use_sobol,
                seed: Some(42),
                ..Default::default()
            };
            let a = pricer.price_call(&cfg).expect("Valid configuration");
            let b = pricer.price_call(&cfg).expect("Valid configuration");
            assert_eq!(a.price.to_bits(), b.price.to_bits(), "{} run differs", scheme);
            assert_eq!(a.std_error.to_bits(), b.std_error.to_bits());
        }
    }
}

#[test]
fn test_antithetic_reduces_standard_error() {
    let pricer = HestonPricer::new(reference_params());
    let plain = SimConfig {
        paths: 20_000,
        steps: 50,
        seed: Some(42),
        ..Default::default()
    };
    let antithetic = SimConfig {
        use_antithetic: true,
        ..plain.clone()
    };

    let plain_result = pricer.price_call(&plain).expect("Valid configuration");
    let anti_result = pricer.price_call(&antithetic).expect("Valid configuration");

    println!(
        "\nStandard error: plain {:.5}, antithetic {:.5}",
        plain_result.std_error, anti_result.std_error
    );
    assert!(anti_result.std_error < plain_result.std_error);
    assert_eq!(anti_result.effective_paths, 20_000);
}

#[test]
fn test_variance_reduction_report_for_antithetic_pairs() {
    let pricer = HestonPricer::new(reference_params());
    let cfg = SimConfig {
        paths: 10_000,
        steps: 50,
        use_antithetic: true,
        seed: Some(7),
        ..Default::default()
    };
    let discount = pricer.params().discount_factor();
    let call = Payoff::EuropeanCall { k: 100.0 };

    let output = pricer.simulate_paths(&cfg).expect("Valid configuration");
    let payoffs = call.discounted(output.terminal_prices.view(), discount);
    let half = payoffs.len() / 2;
    let pairs = (&payoffs.slice(s![..half]) + &payoffs.slice(s![half..])) * 0.5;

    let report = estimate_variance_reduction(payoffs.slice(s![..half]), pairs.view())
        .expect("Enough samples");
    println!("\n{:?}", report);
    assert!(report.variance_reduction_pct > 0.0);
    assert!(report.efficiency_ratio > 1.0);
}

#[test]
fn test_trajectories_only_when_requested() {
    let pricer = HestonPricer::new(reference_params());
    let cfg = SimConfig {
        paths: 100,
        steps: 12,
        seed: Some(1),
        ..Default::default()
    };

    let terminal_only = pricer.simulate_paths(&cfg).expect("Valid configuration");
    assert!(terminal_only.trajectories.is_none());

    let with_paths = pricer
        .simulate_paths(&SimConfig {
            return_paths: true,
            ..cfg
        })
        .expect("Valid configuration");
    let trajectories = with_paths.trajectories.expect("Trajectories requested");
    assert_eq!(trajectories.prices.dim(), (100, 13));
    assert_eq!(trajectories.variances.dim(), (100, 13));
    assert_eq!(with_paths.terminal_prices, terminal_only.terminal_prices);
}

#[test]
fn test_configuration_errors() {
    let pricer = HestonPricer::new(reference_params());
    let cfg = SimConfig {
        paths: 10,
        steps: 4,
        seed: Some(3),
        ..Default::default()
    };

    let both = SimConfig {
        use_antithetic: true,
        use_sobol: true,
        ..cfg.clone()
    };
    assert!(matches!(
        pricer.price_call(&both),
        Err(HestonError::InvalidConfiguration { .. })
    ));

    let wrong_shape = Array3::<f64>::zeros((4, 11, 2));
    assert!(matches!(
        pricer.price_with_draws(&cfg, Payoff::EuropeanCall { k: 100.0 }, wrong_shape.view()),
        Err(HestonError::ShapeMismatch { .. })
    ));

    assert!(matches!(
        "exact".parse::<Scheme>(),
        Err(HestonError::UnknownScheme { .. })
    ));
}

#[test]
fn test_invalid_model_parameters() {
    assert!(HestonParams::new(-100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.3, -0.7).is_err());
    assert!(HestonParams::new(100.0, 100.0, 0.05, 0.0, 0.04, 2.0, 0.04, 0.3, -0.7).is_err());
    assert!(HestonParams::new(100.0, 100.0, 0.05, 1.0, -0.04, 2.0, 0.04, 0.3, -0.7).is_err());
    assert!(HestonParams::new(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.3, -1.5).is_err());

    // Feller violation is advisory only
    let params = HestonParams::new(100.0, 100.0, 0.05, 1.0, 0.04, 0.5, 0.04, 1.0, -0.7)
        .expect("Feller violation does not reject");
    assert!(!params.feller_condition_satisfied());
    assert!(matches!(
        params.feller_check(),
        Err(HestonError::FellerConditionViolation { .. })
    ));
}
