//! # Terminal-Price Monte Carlo
//!
//! $$
//! S_T = S_0 \exp\!\big((\mu - \tfrac{1}{2}\sigma^2)T + \sigma\sqrt{T}\,Z\big)
//! $$
//!
//! Single-step draw of the terminal price distribution. Cheaper than path
//! generation when only the horizon distribution matters; both operations
//! exist side by side on purpose.

use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand_distr::StandardNormal;

use super::rng_from;
use crate::error::QuantError;
use crate::error::Result;

/// Draw `n_sims` terminal prices at a horizon of `horizon_days` periods.
///
/// `periods_per_year` converts the day-count horizon into the time unit of
/// the annualized `mu`/`sigma` pair (252 for trading-day data).
pub fn simulate_terminal_prices(
  s0: f64,
  mu: f64,
  sigma: f64,
  horizon_days: usize,
  periods_per_year: f64,
  n_sims: usize,
  seed: Option<u64>,
) -> Result<Array1<f64>> {
  if !(s0.is_finite() && s0 > 0.0) {
    return Err(QuantError::InvalidInput(format!(
      "spot price must be positive, got {s0}"
    )));
  }
  if !(sigma.is_finite() && sigma >= 0.0) || !mu.is_finite() {
    return Err(QuantError::InvalidInput(
      "drift must be finite and volatility non-negative".into(),
    ));
  }
  if !(periods_per_year > 0.0 && periods_per_year.is_finite()) {
    return Err(QuantError::InvalidInput(format!(
      "periods per year must be positive, got {periods_per_year}"
    )));
  }
  if horizon_days == 0 || n_sims == 0 {
    return Err(QuantError::InvalidInput(
      "horizon and simulation count must both be positive".into(),
    ));
  }

  let horizon = horizon_days as f64 / periods_per_year;
  let drift = (mu - 0.5 * sigma * sigma) * horizon;
  let vol = sigma * horizon.sqrt();

  let mut rng = rng_from(seed);
  let gn: Array1<f64> = Array1::random_using(n_sims, StandardNormal, &mut rng);

  Ok(gn.mapv(|z| s0 * (drift + vol * z).exp()))
}
