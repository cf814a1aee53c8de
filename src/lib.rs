//! # meanvar-rs
//!
//! $$
//! \min_{\mathbf{w}} \sqrt{\mathbf{w}^\top \Sigma \mathbf{w}}
//! \quad \text{s.t.} \quad \sum_i w_i = 1,\ 0 \le w_i \le u_i
//! $$
//!
//! Numeric core for classical portfolio theory: constrained mean-variance
//! optimization, geometric Brownian motion simulation, parameter estimation
//! and goodness-of-fit validation.
//!
//! ## Modules
//!
//! | Module         | Description                                                                  |
//! |----------------|------------------------------------------------------------------------------|
//! | [`portfolio`]  | Weight-simplex optimizers, efficient frontier, portfolio metrics.            |
//! | [`simulation`] | GBM price paths, terminal-price Monte Carlo, drift/volatility estimation.    |
//! | [`stats`]      | Normality tests and higher sample moments for return-series validation.      |
//! | [`error`]      | Typed error taxonomy shared by all components.                               |
//!
//! ## Conventions
//!
//! A portfolio is a plain `f64` weight vector aligned to a fixed asset order;
//! market statistics are a mean-return vector and a covariance matrix validated
//! at construction ([`portfolio::ReturnStatistics`]). All stochastic routines
//! take an explicit `Option<u64>` seed: `Some` gives reproducible output,
//! `None` draws fresh process entropy. There is no hidden global seed.

pub mod error;
pub mod portfolio;
pub mod simulation;
pub mod stats;

pub use error::QuantError;
pub use error::Result;

/// Default annualization factor for daily return series.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
