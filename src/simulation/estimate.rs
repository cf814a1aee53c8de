//! # Parameter Estimation
//!
//! $$
//! \hat\mu = \bar r \cdot k, \qquad
//! \hat\sigma = s_r \cdot \sqrt{k}
//! $$
//!
//! Inverse of path generation: annualized drift and volatility of the
//! log-return increments of an observed price series. The estimated drift is
//! the drift of the log process; it understates the GBM price drift by
//! `sigma^2 / 2`, which matters for high-volatility series.

use crate::error::QuantError;
use crate::error::Result;

/// Estimated GBM parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
  /// Annualized drift of the log-price process.
  pub mu: f64,
  /// Annualized volatility.
  pub sigma: f64,
}

/// Estimate drift and volatility from a chronological price series.
///
/// `periods_per_year` is the annualization factor matching the sampling
/// frequency (252 for trading days). Volatility uses the n-1 sample
/// standard deviation.
pub fn estimate_parameters(prices: &[f64], periods_per_year: f64) -> Result<GbmParams> {
  if !(periods_per_year > 0.0 && periods_per_year.is_finite()) {
    return Err(QuantError::InvalidInput(format!(
      "periods per year must be positive, got {periods_per_year}"
    )));
  }
  if prices.len() < 3 {
    return Err(QuantError::Estimation(format!(
      "need at least 3 prices (2 returns) to estimate, got {}",
      prices.len()
    )));
  }

  let mut returns = Vec::with_capacity(prices.len() - 1);
  for i in 1..prices.len() {
    if !(prices[i - 1].is_finite() && prices[i].is_finite() && prices[i - 1] > 0.0 && prices[i] > 0.0)
    {
      return Err(QuantError::InvalidInput(format!(
        "prices must be positive and finite, found {} at index {i}",
        prices[i]
      )));
    }
    returns.push((prices[i] / prices[i - 1]).ln());
  }

  let n = returns.len() as f64;
  let mean = returns.iter().sum::<f64>() / n;
  let var = returns
    .iter()
    .map(|&r| {
      let d = r - mean;
      d * d
    })
    .sum::<f64>()
    / (n - 1.0);

  if var < 1e-30 {
    return Err(QuantError::Estimation(
      "constant price series has no estimable volatility".into(),
    ));
  }

  Ok(GbmParams {
    mu: mean * periods_per_year,
    sigma: var.sqrt() * periods_per_year.sqrt(),
  })
}
