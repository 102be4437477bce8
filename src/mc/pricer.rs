// src/mc/pricer.rs
//! European option pricing on top of the Heston path engine.
//!
//! [`HestonPricer`] owns an immutable parameter set. Every method runs a
//! fresh simulation from the supplied [`SimConfig`], so two calls with the
//! same seeded configuration return bit-identical results.

use crate::config::SimConfig;
use crate::error::HestonResult;
use crate::mc::mc_engine::{simulate_heston, SimulationOutput};
use crate::mc::payoffs::Payoff;
use crate::mc::stats::{ParityCheck, PricingResult};
use crate::models::HestonParams;
use ndarray::ArrayView3;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonPricer {
    params: HestonParams,
}

impl HestonPricer {
    pub fn new(params: HestonParams) -> Self {
        HestonPricer { params }
    }

    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Run the path engine with generated draws.
    pub fn simulate_paths(&self, cfg: &SimConfig) -> HestonResult<SimulationOutput> {
        simulate_heston(&self.params, cfg, None)
    }

    /// Price any European payoff with generated draws.
    pub fn price(&self, cfg: &SimConfig, payoff: Payoff) -> HestonResult<PricingResult> {
        let output = simulate_heston(&self.params, cfg, None)?;
        self.summarize(&output, cfg, payoff)
    }

    /// Price with a caller-supplied draw tensor of shape (steps, effective paths, 2).
    pub fn price_with_draws(
        &self,
        cfg: &SimConfig,
        payoff: Payoff,
        draws: ArrayView3<f64>,
    ) -> HestonResult<PricingResult> {
        let output = simulate_heston(&self.params, cfg, Some(draws))?;
        self.summarize(&output, cfg, payoff)
    }

    /// European call struck at the model strike
    pub fn price_call(&self, cfg: &SimConfig) -> HestonResult<PricingResult> {
        self.price(cfg, Payoff::EuropeanCall { k: self.params.k() })
    }

    /// European put struck at the model strike
    pub fn price_put(&self, cfg: &SimConfig) -> HestonResult<PricingResult> {
        self.price(cfg, Payoff::EuropeanPut { k: self.params.k() })
    }

    /// Price a call and a put on the same simulated paths and compare
    /// C − P with S0 − K·e^(−rT).
    pub fn verify_put_call_parity(&self, cfg: &SimConfig) -> HestonResult<ParityCheck> {
        let output = simulate_heston(&self.params, cfg, None)?;
        let k = self.params.k();
        let call = self.summarize(&output, cfg, Payoff::EuropeanCall { k })?;
        let put = self.summarize(&output, cfg, Payoff::EuropeanPut { k })?;

        let check = ParityCheck::new(&call, &put, &self.params);
        debug!(
            difference = check.difference,
            relative_error = check.relative_error,
            "Put-call parity check"
        );
        Ok(check)
    }

    fn summarize(
        &self,
        output: &SimulationOutput,
        cfg: &SimConfig,
        payoff: Payoff,
    ) -> HestonResult<PricingResult> {
        let discounted = payoff.discounted(output.terminal_prices.view(), self.params.discount_factor());
        let result = PricingResult::from_payoffs(discounted.view(), cfg)?;

        debug!(
            ?payoff,
            price = result.price,
            std_error = result.std_error,
            paths = result.effective_paths,
            "Priced European option"
        );
        Ok(result)
    }
}
