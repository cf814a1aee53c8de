//! # Portfolio Optimizers
//!
//! $$
//! \min_{\mathbf{w}} \ \mathbf{w}^\top \Sigma \mathbf{w}
//! \quad\text{or}\quad
//! \max_{\mathbf{w}} \ \frac{\mathbf{w}^\top\mu - r_f}{\sqrt{\mathbf{w}^\top \Sigma \mathbf{w}}}
//! $$
//!
//! Long-only mean-variance entry points built on the shared simplex solver:
//! minimum-risk, tangent (maximum-Sharpe), target-return and capped-weight
//! portfolios, plus the closed-form risk-free/tangent blend.

use tracing::debug;

use super::metrics::ZERO_VOL;
use super::metrics::dot;
use super::metrics::mat_vec_mul;
use super::metrics::portfolio_return;
use super::metrics::portfolio_volatility;
use super::solver::solve_on_simplex;
use super::types::MixedPortfolio;
use super::types::PortfolioResult;
use super::types::ReturnStatistics;
use super::types::SolverOptions;
use crate::error::QuantError;
use crate::error::Result;

/// Tolerance on the feasibility check for target returns.
const FEASIBILITY_TOL: f64 = 1e-9;

fn finish(stats: &ReturnStatistics, risk_free: f64, weights: Vec<f64>) -> PortfolioResult {
  let expected_return = dot(&weights, stats.mu());
  let sigma_w = mat_vec_mul(stats.cov(), &weights);
  let volatility = dot(&weights, &sigma_w).max(0.0).sqrt();
  let sharpe = if volatility > ZERO_VOL {
    (expected_return - risk_free) / volatility
  } else {
    0.0
  };

  PortfolioResult {
    weights,
    expected_return,
    volatility,
    sharpe,
  }
}

/// Minimize portfolio volatility over the long-only simplex.
///
/// The squared-volatility objective is convex, so the local optimum found by
/// the simplex solver is the global one.
pub fn minimize_risk(stats: &ReturnStatistics, opts: &SolverOptions) -> Result<PortfolioResult> {
  let cov = stats.cov().to_vec();
  let weights = solve_on_simplex(
    |w| {
      let sigma_w = mat_vec_mul(&cov, w);
      dot(w, &sigma_w)
    },
    stats.n_assets(),
    None,
    opts,
  )?;

  Ok(finish(stats, 0.0, weights))
}

/// Maximize the Sharpe ratio: the tangent portfolio.
///
/// The objective is a ratio of a linear form and a square root of a quadratic
/// form and is not convex in general; the local solver is not guaranteed to
/// reach the global optimum, although it does on small well-conditioned
/// covariance matrices.
pub fn maximize_sharpe(
  stats: &ReturnStatistics,
  risk_free: f64,
  opts: &SolverOptions,
) -> Result<PortfolioResult> {
  maximize_sharpe_bounded(stats, risk_free, None, opts)
}

/// Same as [`maximize_sharpe`] with every weight bounded above by
/// `max_weight` instead of 1.
pub fn optimize_with_cap(
  stats: &ReturnStatistics,
  risk_free: f64,
  max_weight: f64,
  opts: &SolverOptions,
) -> Result<PortfolioResult> {
  let n = stats.n_assets();
  if !(0.0..=1.0).contains(&max_weight) || max_weight <= 0.0 {
    return Err(QuantError::InvalidInput(format!(
      "weight cap must lie in (0, 1], got {max_weight}"
    )));
  }
  if (n as f64) * max_weight < 1.0 - FEASIBILITY_TOL {
    return Err(QuantError::InfeasibleConstraint(format!(
      "cap {max_weight} over {n} assets cannot reach full investment"
    )));
  }

  maximize_sharpe_bounded(stats, risk_free, Some(max_weight), opts)
}

fn maximize_sharpe_bounded(
  stats: &ReturnStatistics,
  risk_free: f64,
  cap: Option<f64>,
  opts: &SolverOptions,
) -> Result<PortfolioResult> {
  let mu = stats.mu().to_vec();
  let cov = stats.cov().to_vec();

  let weights = solve_on_simplex(
    |w| {
      let sigma_w = mat_vec_mul(&cov, w);
      let var = dot(w, &sigma_w);
      if var < ZERO_VOL {
        // Degenerate direction: make it maximally unattractive.
        return 1e10;
      }
      -(dot(w, &mu) - risk_free) / var.sqrt()
    },
    stats.n_assets(),
    cap,
    opts,
  )?;

  Ok(finish(stats, risk_free, weights))
}

/// Range of expected returns achievable under `sum(w) = 1, 0 <= w <= cap`.
///
/// Greedy bound-aware extremes: fill assets in mean-return order up to the
/// cap until the budget is spent.
pub fn achievable_return_range(stats: &ReturnStatistics, cap: Option<f64>) -> Result<(f64, f64)> {
  let n = stats.n_assets();
  let cap = cap.unwrap_or(1.0);
  if (n as f64) * cap < 1.0 - FEASIBILITY_TOL {
    return Err(QuantError::InfeasibleConstraint(format!(
      "cap {cap} over {n} assets cannot reach full investment"
    )));
  }

  let extreme = |ascending: bool| -> f64 {
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| stats.mu()[a].total_cmp(&stats.mu()[b]));
    if !ascending {
      order.reverse();
    }

    let mut budget: f64 = 1.0;
    let mut ret = 0.0;
    for i in order {
      let take = budget.min(cap);
      ret += take * stats.mu()[i];
      budget -= take;
      if budget <= 0.0 {
        break;
      }
    }
    ret
  };

  Ok((extreme(true), extreme(false)))
}

/// Minimize volatility subject to `portfolio_return(w) = target`.
///
/// The target is checked eagerly against the achievable range; the equality
/// constraint itself enters the objective as a quadratic penalty, the same
/// discipline the other entry points use for their constraints.
pub fn minimize_risk_for_target_return(
  stats: &ReturnStatistics,
  target: f64,
  opts: &SolverOptions,
) -> Result<PortfolioResult> {
  let (min_ret, max_ret) = achievable_return_range(stats, None)?;
  if target < min_ret - FEASIBILITY_TOL || target > max_ret + FEASIBILITY_TOL {
    return Err(QuantError::InfeasibleConstraint(format!(
      "target return {target} outside achievable range [{min_ret}, {max_ret}]"
    )));
  }

  debug!(target, min_ret, max_ret, "target-return optimization");

  let mu = stats.mu().to_vec();
  let cov = stats.cov().to_vec();
  let penalty = opts.return_penalty;

  let weights = solve_on_simplex(
    |w| {
      let sigma_w = mat_vec_mul(&cov, w);
      let var = dot(w, &sigma_w);
      let ret_gap = dot(w, &mu) - target;
      var + penalty * ret_gap * ret_gap
    },
    stats.n_assets(),
    None,
    opts,
  )?;

  Ok(finish(stats, 0.0, weights))
}

/// Closed-form blend of the risk-free asset and a tangent portfolio.
///
/// `risk_aversion` in [0, 1] interpolates; above 1 it levers the tangent
/// portfolio by borrowing at the risk-free rate. No solver involved.
pub fn mixed_portfolio(
  tangent_weights: &[f64],
  stats: &ReturnStatistics,
  risk_free: f64,
  risk_aversion: f64,
) -> Result<MixedPortfolio> {
  if !risk_aversion.is_finite() || risk_aversion < 0.0 {
    return Err(QuantError::InvalidInput(format!(
      "risk aversion must be a non-negative finite scalar, got {risk_aversion}"
    )));
  }

  let tangent_return = portfolio_return(tangent_weights, stats.mu())?;
  let tangent_vol = portfolio_volatility(tangent_weights, stats.cov())?;

  let expected_return = (1.0 - risk_aversion) * risk_free + risk_aversion * tangent_return;
  let volatility = risk_aversion * tangent_vol;
  let sharpe = if volatility > ZERO_VOL {
    (expected_return - risk_free) / volatility
  } else {
    0.0
  };

  Ok(MixedPortfolio {
    tangent_fraction: risk_aversion,
    risk_free_fraction: 1.0 - risk_aversion,
    expected_return,
    volatility,
    sharpe,
  })
}
