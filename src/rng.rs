// src/rng.rs
//! Random Draw Generation for Heston Monte Carlo
//!
//! # Design Philosophy
//!
//! 1. **Reproducibility**: same seed → bit-identical tensor
//! 2. **Explicit state**: one generator instance is threaded through every
//!    call; there is no process-wide random state
//! 3. **Correlation-agnostic**: the two factors per step are independent;
//!    the engine mixes them with ρ
//!
//! # Tensor Layout
//!
//! ```text
//! draws[[step, path, factor]],  factor ∈ {0, 1}
//! ```
//!
//! # Strategies
//!
//! - **Standard**: i.i.d. N(0,1) filled in row-major order
//! - **Antithetic**: ⌈n/2⌉ base paths, then their exact negation
//! - **Quasi-random**: one scrambled Sobol point of dimension 2·steps per path,
//!   mapped through Φ⁻¹ and laid out as (path, step, factor) → (step, path, factor)

use crate::config::{SamplingStrategy, SimConfig, FACTORS};
use crate::error::HestonResult;
use crate::math_utils::norm_inv;
use crate::sobol::SobolSequence;
use ndarray::{s, Array3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Seeded generator when a seed is given, entropy-seeded otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => seed_rng_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// Produce the draw tensor for a validated configuration.
///
/// Returns shape (steps, effective paths, 2) where effective paths is
/// `strategy.effective_paths(cfg.paths)`.
pub fn generate_draws<R: Rng + ?Sized>(
    cfg: &SimConfig,
    strategy: SamplingStrategy,
    rng: &mut R,
) -> HestonResult<Array3<f64>> {
    match strategy {
        SamplingStrategy::Standard => Ok(standard_draws(cfg.steps, cfg.paths, rng)),
        SamplingStrategy::Antithetic => Ok(antithetic_draws(cfg.steps, cfg.paths, rng)),
        SamplingStrategy::QuasiRandom => {
            // Scrambling seed comes from the threaded generator
            let scramble_seed = rng.gen::<u64>();
            sobol_draws(cfg.steps, cfg.paths, scramble_seed)
        }
    }
}

pub fn standard_draws<R: Rng + ?Sized>(steps: usize, paths: usize, rng: &mut R) -> Array3<f64> {
    Array3::from_shape_simple_fn((steps, paths, FACTORS), || get_normal_draw(rng))
}

/// Base draws for ⌈paths/2⌉ paths followed by their negation
pub fn antithetic_draws<R: Rng + ?Sized>(
    steps: usize,
    paths: usize,
    rng: &mut R,
) -> Array3<f64> {
    let base_paths = (paths + 1) / 2;
    let base = standard_draws(steps, base_paths, rng);

    let mut draws = Array3::zeros((steps, 2 * base_paths, FACTORS));
    draws.slice_mut(s![.., ..base_paths, ..]).assign(&base);
    draws
        .slice_mut(s![.., base_paths.., ..])
        .assign(&base.mapv(|z| -z));
    draws
}

/// Scrambled Sobol draws: coordinate 2·step + factor of point `path`
pub fn sobol_draws(steps: usize, paths: usize, seed: u64) -> HestonResult<Array3<f64>> {
    let mut sequence = SobolSequence::new(FACTORS * steps, seed)?;
    let mut point = vec![0.0_f64; sequence.dimensions()];
    let mut draws = Array3::zeros((steps, paths, FACTORS));

    for path in 0..paths {
        sequence.next_into(&mut point);
        for step in 0..steps {
            for factor in 0..FACTORS {
                draws[[step, path, factor]] = norm_inv(point[FACTORS * step + factor]);
            }
        }
    }
    Ok(draws)
}
