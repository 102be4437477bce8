pub mod greeks;
pub mod mc_engine;
pub mod payoffs;
pub mod pricer;
pub mod stats;

pub use greeks::GreeksResult;
pub use mc_engine::{simulate_heston, SimulationOutput, Trajectories};
pub use payoffs::Payoff;
pub use pricer::HestonPricer;
pub use stats::{estimate_variance_reduction, ParityCheck, PricingResult, VarianceReductionReport};
