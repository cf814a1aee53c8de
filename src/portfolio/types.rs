//! # Portfolio Types
//!
//! $$
//! \mathbf{w}^\*=\arg\max_{\mathbf{w}} \frac{\mathbb E[R_p]-r_f}{\sigma_p}
//! $$
//!
//! Validated market statistics and result containers for portfolio
//! optimization.

use crate::error::QuantError;
use crate::error::Result;

/// Relative tolerance for covariance symmetry checks.
const SYMMETRY_TOL: f64 = 1e-9;
/// Scale-relative tolerance for negative LDL pivots.
const PSD_TOL: f64 = 1e-10;

/// Mean-return vector and covariance matrix for a fixed asset universe.
///
/// Construction validates shape, symmetry and positive semi-definiteness,
/// so risk computations downstream never see a covariance that would produce
/// a negative variance. Immutable after construction; safe to share across
/// concurrent solver invocations.
#[derive(Clone, Debug)]
pub struct ReturnStatistics {
  mu: Vec<f64>,
  cov: Vec<Vec<f64>>,
}

impl ReturnStatistics {
  /// Validate and wrap a mean vector and covariance matrix.
  pub fn new(mu: Vec<f64>, cov: Vec<Vec<f64>>) -> Result<Self> {
    let n = mu.len();
    if n == 0 {
      return Err(QuantError::InvalidInput(
        "asset universe must be non-empty".into(),
      ));
    }
    if mu.iter().any(|x| !x.is_finite()) {
      return Err(QuantError::InvalidInput(
        "mean returns must be finite".into(),
      ));
    }
    if cov.len() != n || cov.iter().any(|row| row.len() != n) {
      return Err(QuantError::InvalidInput(format!(
        "covariance must be {n}x{n} to match {n} mean returns"
      )));
    }
    if cov.iter().flatten().any(|x| !x.is_finite()) {
      return Err(QuantError::InvalidInput(
        "covariance entries must be finite".into(),
      ));
    }

    let scale = cov
      .iter()
      .flatten()
      .fold(0.0_f64, |acc, &x| acc.max(x.abs()))
      .max(1.0);

    for i in 0..n {
      for j in (i + 1)..n {
        if (cov[i][j] - cov[j][i]).abs() > SYMMETRY_TOL * scale {
          return Err(QuantError::InvalidInput(format!(
            "covariance is not symmetric at ({i}, {j})"
          )));
        }
      }
    }

    if !is_positive_semi_definite(&cov, PSD_TOL * scale) {
      return Err(QuantError::InvalidInput(
        "covariance is not positive semi-definite".into(),
      ));
    }

    Ok(Self { mu, cov })
  }

  /// Number of assets in the universe.
  pub fn n_assets(&self) -> usize {
    self.mu.len()
  }

  /// Mean-return vector.
  pub fn mu(&self) -> &[f64] {
    &self.mu
  }

  /// Covariance matrix.
  pub fn cov(&self) -> &[Vec<f64>] {
    &self.cov
  }
}

/// LDL^T pivot sweep; pivots below `-tol` mean a direction of negative
/// variance exists.
fn is_positive_semi_definite(cov: &[Vec<f64>], tol: f64) -> bool {
  let n = cov.len();
  let mut a: Vec<Vec<f64>> = cov.to_vec();

  for k in 0..n {
    let pivot = a[k][k];
    if pivot < -tol {
      return false;
    }
    if pivot <= tol {
      // Semi-definite direction: the rest of the row/column must vanish.
      for j in (k + 1)..n {
        if a[k][j].abs() > tol.sqrt() {
          return false;
        }
      }
      continue;
    }
    for i in (k + 1)..n {
      let factor = a[i][k] / pivot;
      for j in (k + 1)..n {
        a[i][j] -= factor * a[k][j];
      }
    }
  }

  true
}

/// Output of a portfolio optimization run.
#[derive(Clone, Debug, Default)]
pub struct PortfolioResult {
  /// Final portfolio weights; sum to 1 within solver tolerance.
  pub weights: Vec<f64>,
  /// Expected portfolio return (annualized if inputs are annualized).
  pub expected_return: f64,
  /// Portfolio volatility.
  pub volatility: f64,
  /// Sharpe ratio, 0 when volatility is exactly degenerate.
  pub sharpe: f64,
}

/// Convex (or levered) blend of a risk-free asset and a tangent portfolio.
#[derive(Clone, Copy, Debug)]
pub struct MixedPortfolio {
  /// Fraction invested in the tangent portfolio; above 1 means borrowing at
  /// the risk-free rate.
  pub tangent_fraction: f64,
  /// Fraction held at the risk-free rate, `1 - tangent_fraction`.
  pub risk_free_fraction: f64,
  /// Blended expected return.
  pub expected_return: f64,
  /// Blended volatility, `tangent_fraction * tangent_volatility`.
  pub volatility: f64,
  /// Sharpe ratio of the blend, forced to 0 at zero volatility.
  pub sharpe: f64,
}

/// Optimization objective selected through [`crate::portfolio::PortfolioEngine`].
#[derive(Clone, Copy, Debug)]
pub enum Objective {
  /// Minimize portfolio volatility over the long-only simplex.
  MinimumRisk,
  /// Maximize the Sharpe ratio (tangent portfolio).
  MaximumSharpe,
  /// Minimize volatility subject to a target expected return.
  TargetReturn(f64),
  /// Maximize the Sharpe ratio with a per-asset weight cap.
  CappedSharpe(f64),
}

/// Tuning knobs shared by all solver entry points.
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
  /// Iteration budget before [`QuantError::DidNotConverge`] is raised.
  pub max_iters: u64,
  /// Standard-deviation tolerance for Nelder-Mead termination.
  pub sd_tolerance: f64,
  /// Quadratic penalty weight for the target-return equality constraint.
  pub return_penalty: f64,
}

impl Default for SolverOptions {
  fn default() -> Self {
    Self {
      max_iters: 5000,
      sd_tolerance: 1e-8,
      return_penalty: 1e3,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_valid_statistics() {
    let stats = ReturnStatistics::new(
      vec![0.10, 0.15, 0.08],
      vec![
        vec![0.05, 0.02, 0.01],
        vec![0.02, 0.07, 0.02],
        vec![0.01, 0.02, 0.04],
      ],
    );
    assert!(stats.is_ok());
    assert_eq!(stats.unwrap().n_assets(), 3);
  }

  #[test]
  fn rejects_shape_mismatch() {
    let res = ReturnStatistics::new(vec![0.1, 0.2], vec![vec![0.04]]);
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }

  #[test]
  fn rejects_asymmetric_covariance() {
    let res = ReturnStatistics::new(
      vec![0.1, 0.2],
      vec![vec![0.04, 0.01], vec![0.03, 0.09]],
    );
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }

  #[test]
  fn rejects_indefinite_covariance() {
    // Off-diagonal exceeds the geometric mean of the variances.
    let res = ReturnStatistics::new(
      vec![0.1, 0.2],
      vec![vec![0.01, 0.05], vec![0.05, 0.01]],
    );
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }

  #[test]
  fn accepts_singular_but_semi_definite_covariance() {
    // Rank-1 matrix: perfectly correlated assets.
    let res = ReturnStatistics::new(
      vec![0.1, 0.2],
      vec![vec![0.04, 0.04], vec![0.04, 0.04]],
    );
    assert!(res.is_ok());
  }
}
