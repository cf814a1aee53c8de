//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Constrained mean-variance optimization over the long-only weight simplex:
//! portfolio metrics, the four optimizer entry points, the closed-form mixed
//! portfolio and the efficient-frontier sweep.

pub mod data;
pub mod engine;
pub mod frontier;
pub mod metrics;
pub mod optimizers;
pub(crate) mod solver;
pub mod types;

pub use data::align_return_series;
pub use data::correlation_from_covariance;
pub use data::log_returns_series;
pub use data::statistics_from_returns;
pub use engine::PortfolioEngine;
pub use engine::PortfolioEngineConfig;
pub use frontier::efficient_frontier;
pub use frontier::random_portfolios;
pub use metrics::portfolio_return;
pub use metrics::portfolio_volatility;
pub use metrics::sharpe_ratio;
pub use optimizers::achievable_return_range;
pub use optimizers::maximize_sharpe;
pub use optimizers::minimize_risk;
pub use optimizers::minimize_risk_for_target_return;
pub use optimizers::mixed_portfolio;
pub use optimizers::optimize_with_cap;
pub use types::MixedPortfolio;
pub use types::Objective;
pub use types::PortfolioResult;
pub use types::ReturnStatistics;
pub use types::SolverOptions;
