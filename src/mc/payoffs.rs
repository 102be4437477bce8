//! European Option Payoffs
//!
//! - **Call**: max(S_T - K, 0)
//! - **Put**: max(K - S_T, 0)
//!
//! Both depend only on the terminal price; discounting by e^(-rT) happens in
//! [`Payoff::discounted`].

use ndarray::{Array1, ArrayView1};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },
}

impl Payoff {
    /// Undiscounted payoff at terminal price `s_t`
    #[inline]
    pub fn calculate(&self, s_t: f64) -> f64 {
        match self {
            Payoff::EuropeanCall { k } => (s_t - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - s_t).max(0.0),
        }
    }

    pub fn strike(&self) -> f64 {
        match self {
            Payoff::EuropeanCall { k } | Payoff::EuropeanPut { k } => *k,
        }
    }

    /// Present value of the payoff on every terminal price
    pub fn discounted(&self, terminal_prices: ArrayView1<f64>, discount: f64) -> Array1<f64> {
        terminal_prices.mapv(|s_t| discount * self.calculate(s_t))
    }
}
