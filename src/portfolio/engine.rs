//! # Portfolio Engine
//!
//! $$
//! \mathbf{w}^\* = \operatorname{Optimize}(\mu, \Sigma, r_f)
//! $$
//!
//! High-level orchestration: one configuration struct selects the objective
//! and solver discipline, one entry point dispatches to the optimizer
//! instances.

use super::frontier::efficient_frontier;
use super::frontier::random_portfolios;
use super::optimizers::maximize_sharpe;
use super::optimizers::minimize_risk;
use super::optimizers::minimize_risk_for_target_return;
use super::optimizers::mixed_portfolio;
use super::optimizers::optimize_with_cap;
use super::types::MixedPortfolio;
use super::types::Objective;
use super::types::PortfolioResult;
use super::types::ReturnStatistics;
use super::types::SolverOptions;
use crate::error::Result;

/// Runtime configuration for [`PortfolioEngine`].
#[derive(Clone, Copy, Debug)]
pub struct PortfolioEngineConfig {
  /// Objective solved by [`PortfolioEngine::optimize`].
  pub objective: Objective,
  /// Risk-free rate used in Sharpe computations.
  pub risk_free: f64,
  /// Solver tuning shared by every entry point.
  pub solver: SolverOptions,
}

impl Default for PortfolioEngineConfig {
  fn default() -> Self {
    Self {
      objective: Objective::MaximumSharpe,
      risk_free: 0.0,
      solver: SolverOptions::default(),
    }
  }
}

/// Single entry point over the optimizer instances.
#[derive(Clone, Copy, Debug)]
pub struct PortfolioEngine {
  config: PortfolioEngineConfig,
}

impl PortfolioEngine {
  /// Construct a new engine with explicit configuration.
  pub fn new(config: PortfolioEngineConfig) -> Self {
    Self { config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &PortfolioEngineConfig {
    &self.config
  }

  /// Solve the configured objective for the supplied statistics.
  pub fn optimize(&self, stats: &ReturnStatistics) -> Result<PortfolioResult> {
    let opts = &self.config.solver;
    match self.config.objective {
      Objective::MinimumRisk => minimize_risk(stats, opts),
      Objective::MaximumSharpe => maximize_sharpe(stats, self.config.risk_free, opts),
      Objective::TargetReturn(target) => minimize_risk_for_target_return(stats, target, opts),
      Objective::CappedSharpe(cap) => {
        optimize_with_cap(stats, self.config.risk_free, cap, opts)
      }
    }
  }

  /// Blend a tangent portfolio with the risk-free asset.
  pub fn mix(
    &self,
    tangent_weights: &[f64],
    stats: &ReturnStatistics,
    risk_aversion: f64,
  ) -> Result<MixedPortfolio> {
    mixed_portfolio(tangent_weights, stats, self.config.risk_free, risk_aversion)
  }

  /// Sweep the efficient frontier with the engine's solver options.
  pub fn frontier(
    &self,
    stats: &ReturnStatistics,
    n_points: usize,
  ) -> Result<Vec<PortfolioResult>> {
    efficient_frontier(stats, n_points, &self.config.solver)
  }

  /// Random-portfolio scatter for frontier visualization.
  pub fn scatter(
    &self,
    stats: &ReturnStatistics,
    count: usize,
    seed: Option<u64>,
  ) -> Result<Vec<PortfolioResult>> {
    random_portfolios(stats, self.config.risk_free, count, seed)
  }
}
