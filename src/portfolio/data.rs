//! # Portfolio Data Utilities
//!
//! $$
//! \Sigma_{ij} = \operatorname{Cov}(r_i, r_j) \cdot k
//! $$
//!
//! Estimation of mean-return vectors and covariance matrices from raw
//! return series, the input-interface half of the optimizer boundary.
//! Annualization uses an explicit periods-per-year factor rather than a
//! baked-in constant.

use super::types::ReturnStatistics;
use crate::error::QuantError;
use crate::error::Result;

fn sample_mean(xs: &[f64]) -> f64 {
  if xs.is_empty() {
    0.0
  } else {
    xs.iter().sum::<f64>() / xs.len() as f64
  }
}

/// Convert a chronological close-price series to log returns.
///
/// Non-positive prices are rejected rather than skipped: a gapless positive
/// series is the ingestion layer's contract.
pub fn log_returns_series(closes: &[f64]) -> Result<Vec<f64>> {
  if closes.len() < 2 {
    return Err(QuantError::Estimation(format!(
      "need at least 2 prices to form returns, got {}",
      closes.len()
    )));
  }

  let mut out = Vec::with_capacity(closes.len() - 1);
  for i in 1..closes.len() {
    if !(closes[i - 1].is_finite() && closes[i].is_finite() && closes[i - 1] > 0.0 && closes[i] > 0.0)
    {
      return Err(QuantError::InvalidInput(format!(
        "prices must be positive and finite, found {} at index {i}",
        closes[i]
      )));
    }
    out.push((closes[i] / closes[i - 1]).ln());
  }
  Ok(out)
}

/// Align multiple return series to a common tail length.
pub fn align_return_series(all_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let min_len = all_returns.iter().map(|r| r.len()).min().unwrap_or(0);
  all_returns
    .iter()
    .map(|r| r[r.len().saturating_sub(min_len)..].to_vec())
    .collect()
}

/// Estimate annualized [`ReturnStatistics`] from aligned per-period return
/// series.
///
/// Means scale by `periods_per_year`, covariances likewise (variance of a sum
/// of i.i.d. periods). Sample covariance uses the n-1 denominator.
pub fn statistics_from_returns(
  aligned: &[Vec<f64>],
  periods_per_year: f64,
) -> Result<ReturnStatistics> {
  if aligned.is_empty() {
    return Err(QuantError::Estimation("no return series supplied".into()));
  }
  if !(periods_per_year > 0.0 && periods_per_year.is_finite()) {
    return Err(QuantError::InvalidInput(format!(
      "periods per year must be positive, got {periods_per_year}"
    )));
  }

  let t = aligned[0].len();
  if t < 2 {
    return Err(QuantError::Estimation(format!(
      "need at least 2 observations per series, got {t}"
    )));
  }
  if aligned.iter().any(|r| r.len() != t) {
    return Err(QuantError::InvalidInput(
      "return series must be aligned to a common length".into(),
    ));
  }
  if aligned.iter().flatten().any(|x| !x.is_finite()) {
    return Err(QuantError::InvalidInput(
      "return series must contain finite values only".into(),
    ));
  }

  let n = aligned.len();
  let means: Vec<f64> = aligned.iter().map(|r| sample_mean(r)).collect();

  let mut cov = vec![vec![0.0; n]; n];
  for i in 0..n {
    for j in i..n {
      let mut acc = 0.0;
      for k in 0..t {
        acc += (aligned[i][k] - means[i]) * (aligned[j][k] - means[j]);
      }
      let c = acc / (t - 1) as f64 * periods_per_year;
      cov[i][j] = c;
      cov[j][i] = c;
    }
  }

  let mu: Vec<f64> = means.iter().map(|&m| m * periods_per_year).collect();
  ReturnStatistics::new(mu, cov)
}

/// Derive a correlation matrix from a covariance matrix.
pub fn correlation_from_covariance(cov: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = cov.len();
  let mut corr = vec![vec![0.0; n]; n];

  for i in 0..n {
    let si = cov
      .get(i)
      .and_then(|row| row.get(i))
      .copied()
      .unwrap_or(0.0)
      .max(0.0)
      .sqrt();

    for j in 0..n {
      let sj = cov
        .get(j)
        .and_then(|row| row.get(j))
        .copied()
        .unwrap_or(0.0)
        .max(0.0)
        .sqrt();
      let cij = cov
        .get(i)
        .and_then(|row| row.get(j))
        .copied()
        .unwrap_or(0.0);

      let denom = si * sj;
      corr[i][j] = if i == j {
        1.0
      } else if denom > 1e-15 {
        (cij / denom).clamp(-1.0, 1.0)
      } else {
        0.0
      };
    }
  }

  corr
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn log_returns_of_exponential_series_are_constant() {
    let closes: Vec<f64> = (0..5).map(|i| 100.0 * (0.01f64 * i as f64).exp()).collect();
    let rets = log_returns_series(&closes).unwrap();
    assert_eq!(rets.len(), 4);
    for r in rets {
      assert_relative_eq!(r, 0.01, epsilon = 1e-12);
    }
  }

  #[test]
  fn log_returns_reject_nonpositive_prices() {
    let res = log_returns_series(&[100.0, 0.0, 101.0]);
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }

  #[test]
  fn align_trims_to_shortest_tail() {
    let aligned = align_return_series(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]);
    assert_eq!(aligned[0], vec![2.0, 3.0]);
    assert_eq!(aligned[1], vec![4.0, 5.0]);
  }

  #[test]
  fn statistics_annualize_mean_and_variance() {
    // Alternating returns with known per-period mean 0.01 and variance 1e-4.
    let series = vec![vec![0.0, 0.02, 0.0, 0.02, 0.0, 0.02]];
    let stats = statistics_from_returns(&series, 252.0).unwrap();

    assert_relative_eq!(stats.mu()[0], 0.01 * 252.0, epsilon = 1e-12);
    let per_period_var = 0.0001 * 6.0 / 5.0; // n-1 denominator
    assert_relative_eq!(stats.cov()[0][0], per_period_var * 252.0, epsilon = 1e-12);
  }

  #[test]
  fn too_short_series_is_an_estimation_error() {
    let res = statistics_from_returns(&[vec![0.01]], 252.0);
    assert!(matches!(res, Err(QuantError::Estimation(_))));
  }

  #[test]
  fn correlation_diagonal_is_one() {
    let cov = vec![vec![0.04, 0.012], vec![0.012, 0.09]];
    let corr = correlation_from_covariance(&cov);
    assert_relative_eq!(corr[0][0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(corr[0][1], 0.012 / (0.2 * 0.3), epsilon = 1e-12);
  }
}
