//! # Geometric Brownian Motion
//!
//! $$
//! \ln S_{t+1} - \ln S_t = (\mu - \tfrac{1}{2}\sigma^2)\,\Delta t
//!   + \sigma\sqrt{\Delta t}\,Z_t
//! $$
//!
//! Exact log-Euler path generation for constant-parameter GBM.

use ndarray::Array1;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand_distr::StandardNormal;
use tracing::debug;

use super::rng_from;
use crate::error::QuantError;
use crate::error::Result;

/// GBM path generator with fixed drift, volatility and grid.
///
/// `mu`, `sigma` and `dt` share a time unit: annualized parameters pair with
/// `dt = 1 / periods_per_year`.
#[derive(Clone, Copy, Debug)]
pub struct Gbm {
  /// Drift of the price process.
  pub mu: f64,
  /// Volatility, non-negative.
  pub sigma: f64,
  /// Spot price at step zero, positive.
  pub s0: f64,
  /// Number of increments per path.
  pub days: usize,
  /// Time step length.
  pub dt: f64,
  /// Number of independent paths.
  pub num_paths: usize,
}

impl Gbm {
  /// Validate and construct a generator.
  pub fn new(mu: f64, sigma: f64, s0: f64, days: usize, dt: f64, num_paths: usize) -> Result<Self> {
    if !mu.is_finite() {
      return Err(QuantError::InvalidInput("drift must be finite".into()));
    }
    if !(sigma.is_finite() && sigma >= 0.0) {
      return Err(QuantError::InvalidInput(format!(
        "volatility must be non-negative, got {sigma}"
      )));
    }
    if !(s0.is_finite() && s0 > 0.0) {
      return Err(QuantError::InvalidInput(format!(
        "spot price must be positive, got {s0}"
      )));
    }
    if days == 0 || num_paths == 0 {
      return Err(QuantError::InvalidInput(
        "days and num_paths must both be positive".into(),
      ));
    }
    if !(dt.is_finite() && dt > 0.0) {
      return Err(QuantError::InvalidInput(format!(
        "time step must be positive, got {dt}"
      )));
    }

    Ok(Self {
      mu,
      sigma,
      s0,
      days,
      dt,
      num_paths,
    })
  }

  /// Generate the price matrix, shape `(days + 1, num_paths)`.
  ///
  /// Row 0 holds the spot price for every path. Each column is an
  /// independent path built by cumulating exact log-increments, so prices
  /// stay strictly positive.
  pub fn generate_prices(&self, seed: Option<u64>) -> Array2<f64> {
    let drift = (self.mu - 0.5 * self.sigma * self.sigma) * self.dt;
    let vol = self.sigma * self.dt.sqrt();

    debug!(
      days = self.days,
      num_paths = self.num_paths,
      seeded = seed.is_some(),
      "generating GBM paths"
    );

    let mut rng = rng_from(seed);
    let mut prices = Array2::zeros((self.days + 1, self.num_paths));

    for path in 0..self.num_paths {
      let gn: Array1<f64> = Array1::random_using(self.days, StandardNormal, &mut rng);

      prices[(0, path)] = self.s0;
      let mut log_price = self.s0.ln();
      for (step, &z) in gn.iter().enumerate() {
        log_price += drift + vol * z;
        prices[(step + 1, path)] = log_price.exp();
      }
    }

    prices
  }
}
