//! # Portfolio Metrics
//!
//! $$
//! \sigma_p = \sqrt{\mathbf{w}^\top \Sigma \mathbf{w}}, \qquad
//! S = \frac{\mu_p - r_f}{\sigma_p}
//! $$
//!
//! Return, volatility and Sharpe-ratio computations for a weight vector.

use crate::error::QuantError;
use crate::error::Result;

/// Volatility below this is treated as exactly zero risk.
pub(crate) const ZERO_VOL: f64 = 1e-15;

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub(crate) fn mat_vec_mul(mat: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
  mat
    .iter()
    .map(|row| row.iter().zip(v.iter()).map(|(a, b)| a * b).sum())
    .collect()
}

fn check_lengths(w: &[f64], n: usize, what: &str) -> Result<()> {
  if w.len() != n {
    return Err(QuantError::InvalidInput(format!(
      "weight vector has {} entries but {what} expects {n}",
      w.len()
    )));
  }
  Ok(())
}

/// Expected portfolio return, the dot product of weights and mean returns.
pub fn portfolio_return(w: &[f64], mu: &[f64]) -> Result<f64> {
  check_lengths(w, mu.len(), "mean-return vector")?;
  Ok(dot(w, mu))
}

/// Portfolio volatility `sqrt(w' Sigma w)`.
///
/// A quadratic form that comes out negative beyond numerical noise means the
/// covariance was not positive semi-definite for this direction and is
/// rejected; tiny negatives from round-off are clamped to zero.
pub fn portfolio_volatility(w: &[f64], cov: &[Vec<f64>]) -> Result<f64> {
  check_lengths(w, cov.len(), "covariance matrix")?;
  if cov.iter().any(|row| row.len() != w.len()) {
    return Err(QuantError::InvalidInput(
      "covariance matrix must be square".into(),
    ));
  }

  let sigma_w = mat_vec_mul(cov, w);
  let var = dot(w, &sigma_w);

  let scale = w.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs())).max(1.0);
  if var < -1e-10 * scale * scale {
    return Err(QuantError::InvalidInput(
      "covariance produced a negative portfolio variance".into(),
    ));
  }

  Ok(var.max(0.0).sqrt())
}

/// Sharpe ratio `(return - rf) / volatility`.
///
/// Zero volatility (an all-risk-free or degenerate-covariance portfolio) is a
/// typed error instead of a silent division by zero.
pub fn sharpe_ratio(w: &[f64], mu: &[f64], cov: &[Vec<f64>], risk_free: f64) -> Result<f64> {
  let expected = portfolio_return(w, mu)?;
  let volatility = portfolio_volatility(w, cov)?;

  if volatility < ZERO_VOL {
    return Err(QuantError::DegenerateRisk);
  }

  Ok((expected - risk_free) / volatility)
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  fn three_asset_cov() -> Vec<Vec<f64>> {
    vec![
      vec![0.05, 0.02, 0.01],
      vec![0.02, 0.07, 0.02],
      vec![0.01, 0.02, 0.04],
    ]
  }

  #[test]
  fn return_is_dot_product() {
    let r = portfolio_return(&[0.5, 0.3, 0.2], &[0.10, 0.15, 0.08]).unwrap();
    assert_relative_eq!(r, 0.111, epsilon = 1e-12);
  }

  #[test]
  fn equal_weight_volatility_matches_hand_computation() {
    let w = [1.0 / 3.0; 3];
    let vol = portfolio_volatility(&w, &three_asset_cov()).unwrap();
    // (sum of all covariance entries) / 9 = 0.26 / 9, sqrt ~ 0.1700
    assert_relative_eq!(vol, (0.26_f64 / 9.0).sqrt(), epsilon = 1e-12);
  }

  #[test]
  fn volatility_is_nonnegative_for_singular_covariance() {
    let cov = vec![vec![0.04, -0.04], vec![-0.04, 0.04]];
    let vol = portfolio_volatility(&[0.5, 0.5], &cov).unwrap();
    assert!(vol >= 0.0);
    assert!(vol < 1e-12);
  }

  #[test]
  fn sharpe_rejects_zero_volatility() {
    let cov = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
    let res = sharpe_ratio(&[0.5, 0.5], &[0.1, 0.1], &cov, 0.03);
    assert_eq!(res, Err(QuantError::DegenerateRisk));
  }

  #[test]
  fn mismatched_shapes_are_rejected() {
    let res = portfolio_return(&[0.5, 0.5], &[0.1]);
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }
}
