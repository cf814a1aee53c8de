//! # Errors
//!
//! Typed failure taxonomy shared by the optimizer, simulator and validator.

use thiserror::Error;

/// Errors surfaced by the numeric core.
///
/// Every fallible operation returns one of these instead of letting NaN or
/// infinity propagate through downstream arithmetic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantError {
  /// Malformed inputs: mismatched shapes, asymmetric or non-PSD covariance,
  /// negative volatility or prices, confidence level outside (0, 1).
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Zero-volatility denominator in a Sharpe-ratio computation.
  #[error("degenerate risk: portfolio volatility is zero")]
  DegenerateRisk,

  /// The requested constraint set has no feasible weight vector.
  #[error("infeasible constraint: {0}")]
  InfeasibleConstraint(String),

  /// The solver exhausted its iteration or tolerance budget.
  #[error("optimization did not converge: {message}")]
  DidNotConverge {
    /// Best iterate found before termination, mapped back to weights.
    weights: Vec<f64>,
    /// Solver termination message for diagnosis.
    message: String,
  },

  /// Degenerate sample handed to parameter estimation or a fit test.
  #[error("estimation failed: {0}")]
  Estimation(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QuantError>;
