//! # Efficient Frontier
//!
//! $$
//! \{(\sigma_p, \mu_p) : \mathbf{w} \text{ minimizes } \sigma \text{ at } \mu_p\}
//! $$
//!
//! Frontier sweep over the achievable return range and the random-portfolio
//! scatter used to visualize it. Each scatter point is independent, so the
//! scatter runs in parallel over a read-only [`ReturnStatistics`].

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

use super::metrics::ZERO_VOL;
use super::metrics::dot;
use super::metrics::mat_vec_mul;
use super::optimizers::achievable_return_range;
use super::optimizers::minimize_risk_for_target_return;
use super::types::PortfolioResult;
use super::types::ReturnStatistics;
use super::types::SolverOptions;
use crate::error::QuantError;
use crate::error::Result;

/// Sweep `n_points` target returns across the achievable range, solving a
/// minimum-risk problem at each.
///
/// Edge targets whose solve fails to converge are skipped; a sweep where
/// every point fails surfaces the final error.
pub fn efficient_frontier(
  stats: &ReturnStatistics,
  n_points: usize,
  opts: &SolverOptions,
) -> Result<Vec<PortfolioResult>> {
  if n_points < 2 {
    return Err(QuantError::InvalidInput(format!(
      "frontier needs at least 2 points, got {n_points}"
    )));
  }

  let (lo, hi) = achievable_return_range(stats, None)?;
  debug!(lo, hi, n_points, "sweeping efficient frontier");

  let mut frontier = Vec::with_capacity(n_points);
  let mut last_err = None;
  for k in 0..n_points {
    let target = lo + (hi - lo) * k as f64 / (n_points - 1) as f64;
    match minimize_risk_for_target_return(stats, target, opts) {
      Ok(point) => frontier.push(point),
      Err(e @ QuantError::DidNotConverge { .. }) => last_err = Some(e),
      Err(e) => return Err(e),
    }
  }

  if frontier.is_empty() {
    return Err(last_err.unwrap_or_else(|| {
      QuantError::InfeasibleConstraint("no frontier point could be solved".into())
    }));
  }
  Ok(frontier)
}

/// Metrics of `count` random long-only portfolios, computed in parallel.
///
/// Weights are exponential draws normalized to the simplex (flat Dirichlet).
/// With `Some(seed)` the scatter is reproducible: portfolio `i` derives its
/// stream from `seed + i`, independent of thread scheduling. With `None`,
/// each draw uses fresh process entropy.
pub fn random_portfolios(
  stats: &ReturnStatistics,
  risk_free: f64,
  count: usize,
  seed: Option<u64>,
) -> Result<Vec<PortfolioResult>> {
  if count == 0 {
    return Err(QuantError::InvalidInput(
      "scatter size must be positive".into(),
    ));
  }

  let n = stats.n_assets();
  let points = (0..count)
    .into_par_iter()
    .map(|i| {
      let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(i as u64)),
        None => StdRng::from_entropy(),
      };

      let mut w: Vec<f64> = (0..n)
        .map(|_| -rng.gen_range(f64::EPSILON..1.0_f64).ln())
        .collect();
      let total: f64 = w.iter().sum();
      for wi in &mut w {
        *wi /= total;
      }

      let expected_return = dot(&w, stats.mu());
      let sigma_w = mat_vec_mul(stats.cov(), &w);
      let volatility = dot(&w, &sigma_w).max(0.0).sqrt();
      let sharpe = if volatility > ZERO_VOL {
        (expected_return - risk_free) / volatility
      } else {
        0.0
      };

      PortfolioResult {
        weights: w,
        expected_return,
        volatility,
        sharpe,
      }
    })
    .collect();

  Ok(points)
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  fn three_asset_stats() -> ReturnStatistics {
    ReturnStatistics::new(
      vec![0.10, 0.15, 0.08],
      vec![
        vec![0.05, 0.02, 0.01],
        vec![0.02, 0.07, 0.02],
        vec![0.01, 0.02, 0.04],
      ],
    )
    .unwrap()
  }

  #[test]
  fn frontier_returns_are_increasing() {
    let stats = three_asset_stats();
    let frontier = efficient_frontier(&stats, 5, &SolverOptions::default()).unwrap();
    assert!(frontier.len() >= 2);

    for pair in frontier.windows(2) {
      assert!(pair[1].expected_return >= pair[0].expected_return - 1e-3);
    }
  }

  #[test]
  fn scatter_points_live_on_the_simplex() {
    let stats = three_asset_stats();
    let points = random_portfolios(&stats, 0.02, 200, Some(42)).unwrap();
    assert_eq!(points.len(), 200);

    for p in &points {
      let sum: f64 = p.weights.iter().sum();
      assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
      assert!(p.weights.iter().all(|&w| w >= 0.0));
      assert!(p.volatility >= 0.0);
    }
  }

  #[test]
  fn seeded_scatter_is_reproducible() {
    let stats = three_asset_stats();
    let a = random_portfolios(&stats, 0.02, 50, Some(7)).unwrap();
    let b = random_portfolios(&stats, 0.02, 50, Some(7)).unwrap();

    for (pa, pb) in a.iter().zip(b.iter()) {
      assert_eq!(pa.weights, pb.weights);
    }
  }

  #[test]
  fn no_frontier_points_errors_cleanly() {
    let stats = three_asset_stats();
    let res = efficient_frontier(&stats, 1, &SolverOptions::default());
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }
}
