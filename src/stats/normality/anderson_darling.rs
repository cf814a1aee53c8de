//! # Anderson-Darling
//!
//! Anderson-Darling statistic against a fully specified normal, with the
//! case-0 critical value table (no parameters estimated from the sample).

use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use crate::error::QuantError;
use crate::error::Result;

/// A significance level paired with its A^2 critical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValue {
  /// Upper-tail significance level.
  pub significance: f64,
  /// Reject when the statistic exceeds this value.
  pub value: f64,
}

/// Case-0 critical values (fully specified distribution), Stephens (1974).
pub const CASE0_CRITICAL_VALUES: [CriticalValue; 5] = [
  CriticalValue {
    significance: 0.15,
    value: 1.610,
  },
  CriticalValue {
    significance: 0.10,
    value: 1.933,
  },
  CriticalValue {
    significance: 0.05,
    value: 2.492,
  },
  CriticalValue {
    significance: 0.025,
    value: 3.070,
  },
  CriticalValue {
    significance: 0.01,
    value: 3.857,
  },
];

/// Result of the Anderson-Darling test against a specified normal.
#[derive(Debug, Clone, Copy)]
pub struct AndersonDarlingResult {
  /// Raw A^2 statistic.
  pub statistic: f64,
  /// Critical values to compare the statistic against.
  pub critical_values: [CriticalValue; 5],
}

impl AndersonDarlingResult {
  /// Whether the statistic exceeds the critical value closest to
  /// `significance`.
  pub fn reject_at(&self, significance: f64) -> bool {
    let nearest = self
      .critical_values
      .iter()
      .min_by(|a, b| {
        (a.significance - significance)
          .abs()
          .total_cmp(&(b.significance - significance).abs())
      })
      .copied()
      .unwrap_or(CASE0_CRITICAL_VALUES[2]);
    self.statistic > nearest.value
  }
}

/// Anderson-Darling test of `sample` against `N(mu, sigma)`.
pub fn anderson_darling_normal_test(
  sample: &[f64],
  mu: f64,
  sigma: f64,
) -> Result<AndersonDarlingResult> {
  if sample.len() < 8 {
    return Err(QuantError::Estimation(format!(
      "Anderson-Darling needs at least 8 observations, got {}",
      sample.len()
    )));
  }
  if sample.iter().any(|x| !x.is_finite()) {
    return Err(QuantError::InvalidInput(
      "sample must contain finite values only".into(),
    ));
  }
  if !(sigma > 0.0 && sigma.is_finite() && mu.is_finite()) {
    return Err(QuantError::InvalidInput(format!(
      "reference normal needs finite mu and positive sigma, got ({mu}, {sigma})"
    )));
  }

  let mut sorted = sample.to_vec();
  sorted.sort_by(f64::total_cmp);
  let n = sorted.len();
  let n_f = n as f64;

  let normal = Normal::new(mu, sigma).map_err(|e| QuantError::InvalidInput(e.to_string()))?;
  let eps = 1e-15;

  let mut sum = 0.0;
  for i in 0..n {
    let f_i = normal.cdf(sorted[i]).clamp(eps, 1.0 - eps);
    let f_j = normal.cdf(sorted[n - 1 - i]).clamp(eps, 1.0 - eps);
    let k = (2 * (i + 1) - 1) as f64;
    sum += k * (f_i.ln() + (1.0 - f_j).ln());
  }

  let statistic = -n_f - sum / n_f;

  Ok(AndersonDarlingResult {
    statistic,
    critical_values: CASE0_CRITICAL_VALUES,
  })
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Distribution;
  use rand_distr::Normal as RandNormal;
  use rand_distr::Uniform;

  use super::*;

  #[test]
  fn accepts_matching_normal_sample() {
    let mut rng = StdRng::seed_from_u64(41);
    let dist = RandNormal::new(0.0, 1.0).unwrap();
    let sample: Vec<f64> = (0..4000).map(|_| dist.sample(&mut rng)).collect();

    let res = anderson_darling_normal_test(&sample, 0.0, 1.0).unwrap();
    assert!(!res.reject_at(0.05), "unexpected rejection: {res:?}");
  }

  #[test]
  fn rejects_uniform_sample() {
    let mut rng = StdRng::seed_from_u64(42);
    let dist = Uniform::new(-1.0, 1.0);
    let sample: Vec<f64> = (0..4000).map(|_| dist.sample(&mut rng)).collect();

    let res = anderson_darling_normal_test(&sample, 0.0, 0.577).unwrap();
    assert!(res.reject_at(0.05), "expected rejection: {res:?}");
  }

  #[test]
  fn critical_values_are_monotone() {
    for pair in CASE0_CRITICAL_VALUES.windows(2) {
      assert!(pair[0].significance > pair[1].significance);
      assert!(pair[0].value < pair[1].value);
    }
  }

  #[test]
  fn short_sample_is_an_estimation_error() {
    let res = anderson_darling_normal_test(&[0.1; 4], 0.0, 1.0);
    assert!(matches!(res, Err(QuantError::Estimation(_))));
  }
}
