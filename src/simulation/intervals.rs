//! # Prediction Intervals
//!
//! $$
//! \big[\,Q_{(1-c)/2},\; Q_{1-(1-c)/2}\,\big]
//! $$
//!
//! Symmetric percentile intervals of a simulated distribution, one per
//! confidence level.

use crate::error::QuantError;
use crate::error::Result;

/// Symmetric percentile interval at one confidence level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceInterval {
  /// Confidence level in (0, 1).
  pub level: f64,
  /// Lower percentile bound.
  pub lower: f64,
  /// Upper percentile bound.
  pub upper: f64,
}

impl ConfidenceInterval {
  /// Interval width; non-decreasing in the confidence level.
  pub fn width(&self) -> f64 {
    self.upper - self.lower
  }
}

/// Linear-interpolation quantile of a sorted slice, `q` in [0, 1].
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
  let n = sorted.len();
  if n == 1 {
    return sorted[0];
  }
  let pos = q * (n - 1) as f64;
  let lo = pos.floor() as usize;
  let hi = pos.ceil() as usize;
  if lo == hi {
    return sorted[lo];
  }
  let frac = pos - lo as f64;
  sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// Symmetric percentile intervals of `values` at each requested level.
///
/// Levels must lie strictly inside (0, 1); output order follows input order.
pub fn confidence_intervals(values: &[f64], levels: &[f64]) -> Result<Vec<ConfidenceInterval>> {
  if values.is_empty() {
    return Err(QuantError::InvalidInput(
      "cannot compute intervals of an empty sample".into(),
    ));
  }
  if values.iter().any(|x| !x.is_finite()) {
    return Err(QuantError::InvalidInput(
      "sample values must be finite".into(),
    ));
  }
  for &level in levels {
    if !(level > 0.0 && level < 1.0) {
      return Err(QuantError::InvalidInput(format!(
        "confidence level must lie in (0, 1) exclusive, got {level}"
      )));
    }
  }

  let mut sorted = values.to_vec();
  sorted.sort_by(f64::total_cmp);

  Ok(
    levels
      .iter()
      .map(|&level| {
        let tail = (1.0 - level) / 2.0;
        ConfidenceInterval {
          level,
          lower: quantile_sorted(&sorted, tail),
          upper: quantile_sorted(&sorted, 1.0 - tail),
        }
      })
      .collect(),
  )
}
