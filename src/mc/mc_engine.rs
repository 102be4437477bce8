// src/mc/mc_engine.rs
use crate::config::{SimConfig, FACTORS};
use crate::error::{HestonError, HestonResult};
use crate::models::HestonParams;
use crate::rng;
use crate::solvers::{Euler, HestonScheme, Milstein, Scheme, StepCoefficients};
use ndarray::{Array1, Array2, ArrayView1, ArrayView3, Axis, Zip};
use tracing::debug;

/// Full price and variance histories, shape (paths, steps + 1).
///
/// Column 0 holds the initial state, column `n` the state after step `n`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectories {
    pub prices: Array2<f64>,
    pub variances: Array2<f64>,
}

impl Trajectories {
    fn new(paths: usize, steps: usize, s0: f64, v0: f64) -> Self {
        let mut prices = Array2::zeros((paths, steps + 1));
        let mut variances = Array2::zeros((paths, steps + 1));
        prices.column_mut(0).fill(s0);
        variances.column_mut(0).fill(v0);
        Trajectories { prices, variances }
    }

    fn record(&mut self, column: usize, s: &Array1<f64>, v: &Array1<f64>) {
        self.prices.column_mut(column).assign(s);
        self.variances.column_mut(column).assign(v);
    }

    pub fn paths(&self) -> usize {
        self.prices.nrows()
    }

    pub fn steps(&self) -> usize {
        self.prices.ncols() - 1
    }

    pub fn terminal_prices(&self) -> ArrayView1<f64> {
        self.prices.column(self.steps())
    }
}

/// Result of one simulation run
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutput {
    pub terminal_prices: Array1<f64>,
    /// Present only when `SimConfig::return_paths` was set
    pub trajectories: Option<Trajectories>,
}

impl SimulationOutput {
    pub fn effective_paths(&self) -> usize {
        self.terminal_prices.len()
    }
}

/// Simulate Heston paths and return terminal prices (and optionally histories).
///
/// # Math Framework
///
/// Per step, with independent normals Z1, Z2 from the draw tensor:
/// ```text
/// W_S = Z1
/// W_V = ρ Z1 + √(1 - ρ²) Z2
/// S_{n+1} = S_n exp((r - V_n/2)Δt + √max(V_n,0) √Δt W_S)
/// V_{n+1} = scheme(V_n, W_V)
/// ```
/// with Δt = T / steps. Both updates read the pre-step variance.
///
/// # Draws
///
/// When `draws` is `None` a tensor is generated from `cfg.seed` according to
/// the configured sampling strategy. A supplied tensor must have exactly the
/// shape `(steps, effective paths, 2)` for the configuration; the effective
/// path count is read from it.
///
/// # Errors
///
/// - Invalid configuration (zero counts, both variance-reduction flags)
/// - `ShapeMismatch` for a supplied tensor of the wrong shape, raised before
///   any stepping
pub fn simulate_heston(
    params: &HestonParams,
    cfg: &SimConfig,
    draws: Option<ArrayView3<f64>>,
) -> HestonResult<SimulationOutput> {
    let strategy = cfg.validate()?;
    let expected = cfg.draw_shape(strategy);

    let generated;
    let draws: ArrayView3<f64> = match &draws {
        Some(draws) => {
            check_draw_shape(draws, expected)?;
            draws.view()
        }
        None => {
            let mut rng = rng::make_rng(cfg.seed);
            generated = rng::generate_draws(cfg, strategy, &mut rng)?;
            generated.view()
        }
    };

    debug!(
        scheme = %cfg.scheme,
        %strategy,
        paths = draws.len_of(Axis(1)),
        steps = cfg.steps,
        return_paths = cfg.return_paths,
        "Starting Heston simulation"
    );

    let output = match cfg.scheme {
        Scheme::Euler => run::<Euler>(params, draws, cfg.return_paths),
        Scheme::Milstein => run::<Milstein>(params, draws, cfg.return_paths),
    };
    Ok(output)
}

fn check_draw_shape(draws: &ArrayView3<f64>, expected: [usize; 3]) -> HestonResult<()> {
    let shape = draws.shape();
    let actual = [shape[0], shape[1], shape[2]];
    if actual != expected {
        return Err(HestonError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

fn run<S: HestonScheme>(
    params: &HestonParams,
    draws: ArrayView3<f64>,
    return_paths: bool,
) -> SimulationOutput {
    let steps = draws.len_of(Axis(0));
    let paths = draws.len_of(Axis(1));
    debug_assert_eq!(draws.len_of(Axis(2)), FACTORS);

    let c = StepCoefficients::new(params, params.t() / steps as f64);
    let rho = params.rho();
    let rho_bar = (1.0 - rho * rho).max(0.0).sqrt();

    let mut s = Array1::from_elem(paths, params.s0());
    let mut v = Array1::from_elem(paths, params.v0());
    let mut w_v = Array1::<f64>::zeros(paths);
    let mut trajectories =
        return_paths.then(|| Trajectories::new(paths, steps, params.s0(), params.v0()));

    for (step, z) in draws.outer_iter().enumerate() {
        let z1 = z.column(0);
        let z2 = z.column(1);

        Zip::from(&mut w_v)
            .and(&z1)
            .and(&z2)
            .par_for_each(|w, &z1, &z2| *w = rho * z1 + rho_bar * z2);

        S::advance(s.view_mut(), v.view_mut(), z1, w_v.view(), &c);

        if let Some(trajectories) = trajectories.as_mut() {
            trajectories.record(step + 1, &s, &v);
        }
    }

    SimulationOutput {
        terminal_prices: s,
        trajectories,
    }
}
