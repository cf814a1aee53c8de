//! # Simulation
//!
//! $$
//! S_{t+\Delta t} = S_t \exp\!\big((\mu - \tfrac{1}{2}\sigma^2)\Delta t
//!   + \sigma\sqrt{\Delta t}\,Z\big)
//! $$
//!
//! Geometric Brownian motion price paths, terminal-price Monte Carlo, the
//! inverse drift/volatility estimation and percentile prediction intervals.
//! Every routine takes an explicit `Option<u64>` seed; there is no hidden
//! process-wide generator state.

pub mod estimate;
pub mod gbm;
pub mod intervals;
pub mod terminal;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use estimate::GbmParams;
pub use estimate::estimate_parameters;
pub use gbm::Gbm;
pub use intervals::ConfidenceInterval;
pub use intervals::confidence_intervals;
pub use terminal::simulate_terminal_prices;

pub(crate) fn rng_from(seed: Option<u64>) -> StdRng {
  match seed {
    Some(s) => StdRng::seed_from_u64(s),
    None => StdRng::from_entropy(),
  }
}
