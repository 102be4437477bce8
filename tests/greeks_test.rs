// tests/greeks_test.rs
use heston_mc::analytics::bs_analytic;
use heston_mc::{HestonParams, HestonPricer, Scheme, SimConfig};

fn greeks_config() -> SimConfig {
    SimConfig {
        paths: 30_000,
        steps: 50,
        scheme: Scheme::Milstein,
        use_antithetic: true,
        seed: Some(42),
        ..Default::default()
    }
}

#[test]
fn test_greeks_sanity_at_reference_parameters() {
    let params = HestonParams::new(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.3, -0.7)
        .expect("Valid parameters");
    let pricer = HestonPricer::new(params);

    let greeks = pricer.calculate_greeks(&greeks_config()).expect("Greeks should compute");
    println!("\n{:?}", greeks);

    assert!(greeks.delta > 0.0 && greeks.delta < 1.0, "delta={}", greeks.delta);
    assert!(greeks.gamma >= 0.0, "gamma={}", greeks.gamma);
    assert!(greeks.vega >= 0.0, "vega={}", greeks.vega);
    assert!(greeks.theta < 0.0, "theta={}", greeks.theta);
    assert!(greeks.rho > 0.0, "rho={}", greeks.rho);
    assert!(greeks.base_price > 0.0);

    // Bumped copies never touch the pricer's own parameters
    assert_eq!(*pricer.params(), params);
}

#[test]
fn test_delta_and_rho_near_black_scholes_in_degenerate_limit() {
    let params = HestonParams::new(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.0, 0.0)
        .expect("Valid parameters");
    let greeks = HestonPricer::new(params)
        .calculate_greeks(&greeks_config())
        .expect("Greeks should compute");

    let delta = bs_analytic::bs_call_delta(100.0, 100.0, 0.05, 0.2, 1.0);
    let rho = bs_analytic::bs_call_rho(100.0, 100.0, 0.05, 0.2, 1.0);
    println!("\nDelta {:.4} vs {:.4}, Rho {:.3} vs {:.3}", greeks.delta, delta, greeks.rho, rho);

    assert!((greeks.delta - delta).abs() < 0.03);
    assert!((greeks.rho - rho).abs() < 3.0);
}

#[test]
fn test_unseeded_config_uses_fixed_seed() {
    let pricer = HestonPricer::new(HestonParams::default());
    let cfg = SimConfig {
        paths: 4_000,
        steps: 20,
        ..Default::default()
    };
    let a = pricer.calculate_greeks(&cfg).expect("Greeks should compute");
    let b = pricer.calculate_greeks(&cfg).expect("Greeks should compute");
    assert_eq!(a, b);
}

#[test]
fn test_larger_bump_still_consistent() {
    let pricer = HestonPricer::new(HestonParams::default());
    let cfg = SimConfig {
        paths: 10_000,
        ..greeks_config()
    };
    let small = pricer.calculate_greeks_with_bump(&cfg, 0.01).expect("Greeks should compute");
    let large = pricer.calculate_greeks_with_bump(&cfg, 0.05).expect("Greeks should compute");

    assert_eq!(small.base_price, large.base_price);
    assert!((small.delta - large.delta).abs() < 0.05);
}
