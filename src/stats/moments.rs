//! # Higher Moments
//!
//! $$
//! g_1 = \frac{m_3}{m_2^{3/2}}, \qquad g_2 = \frac{m_4}{m_2^2} - 3
//! $$
//!
//! Sample skewness and excess kurtosis with heuristic significance flags.

use crate::error::QuantError;
use crate::error::Result;

/// Interpretation thresholds for moment magnitudes.
#[derive(Debug, Clone, Copy)]
pub struct MomentsConfig {
  /// |skewness| above this is flagged significant.
  pub skewness_threshold: f64,
  /// |excess kurtosis| above this is flagged significant.
  pub kurtosis_threshold: f64,
}

impl Default for MomentsConfig {
  fn default() -> Self {
    Self {
      skewness_threshold: 0.5,
      kurtosis_threshold: 1.0,
    }
  }
}

/// Third and fourth standardized central moments of a sample.
#[derive(Debug, Clone, Copy)]
pub struct MomentsReport {
  /// Sample skewness.
  pub skewness: f64,
  /// Sample excess kurtosis.
  pub excess_kurtosis: f64,
  /// Whether |skewness| exceeds the configured threshold.
  pub skewness_significant: bool,
  /// Whether |excess kurtosis| exceeds the configured threshold.
  pub kurtosis_significant: bool,
}

/// Compute sample skewness and excess kurtosis.
pub fn higher_moments(sample: &[f64], cfg: MomentsConfig) -> Result<MomentsReport> {
  if sample.len() < 2 {
    return Err(QuantError::Estimation(format!(
      "need at least 2 observations for moments, got {}",
      sample.len()
    )));
  }
  if sample.iter().any(|x| !x.is_finite()) {
    return Err(QuantError::InvalidInput(
      "sample must contain finite values only".into(),
    ));
  }
  if !(cfg.skewness_threshold > 0.0 && cfg.kurtosis_threshold > 0.0) {
    return Err(QuantError::InvalidInput(
      "moment thresholds must be positive".into(),
    ));
  }

  let n = sample.len() as f64;
  let mean = sample.iter().sum::<f64>() / n;

  let mut m2 = 0.0;
  let mut m3 = 0.0;
  let mut m4 = 0.0;
  for &x in sample {
    let d = x - mean;
    let d2 = d * d;
    m2 += d2;
    m3 += d2 * d;
    m4 += d2 * d2;
  }
  m2 /= n;
  m3 /= n;
  m4 /= n;

  if m2 <= 0.0 {
    return Err(QuantError::Estimation(
      "constant sample has undefined standardized moments".into(),
    ));
  }

  let skewness = m3 / m2.powf(1.5);
  let excess_kurtosis = m4 / (m2 * m2) - 3.0;

  Ok(MomentsReport {
    skewness,
    excess_kurtosis,
    skewness_significant: skewness.abs() > cfg.skewness_threshold,
    kurtosis_significant: excess_kurtosis.abs() > cfg.kurtosis_threshold,
  })
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Distribution;
  use rand_distr::Exp;
  use rand_distr::StandardNormal;

  use super::*;

  #[test]
  fn symmetric_sample_has_near_zero_skewness() {
    let mut rng = StdRng::seed_from_u64(21);
    let sample: Vec<f64> = (0..20_000).map(|_| StandardNormal.sample(&mut rng)).collect();

    let m = higher_moments(&sample, MomentsConfig::default()).unwrap();
    assert_abs_diff_eq!(m.skewness, 0.0, epsilon = 0.1);
    assert_abs_diff_eq!(m.excess_kurtosis, 0.0, epsilon = 0.2);
    assert!(!m.skewness_significant);
    assert!(!m.kurtosis_significant);
  }

  #[test]
  fn exponential_sample_is_flagged_skewed_and_heavy() {
    let mut rng = StdRng::seed_from_u64(22);
    let exp = Exp::new(1.0).unwrap();
    let sample: Vec<f64> = (0..20_000).map(|_| exp.sample(&mut rng)).collect();

    // Exponential: skewness 2, excess kurtosis 6.
    let m = higher_moments(&sample, MomentsConfig::default()).unwrap();
    assert!(m.skewness > 1.5);
    assert!(m.excess_kurtosis > 3.0);
    assert!(m.skewness_significant);
    assert!(m.kurtosis_significant);
  }

  #[test]
  fn thresholds_are_configurable() {
    let mut rng = StdRng::seed_from_u64(23);
    let exp = Exp::new(1.0).unwrap();
    let sample: Vec<f64> = (0..5_000).map(|_| exp.sample(&mut rng)).collect();

    let cfg = MomentsConfig {
      skewness_threshold: 10.0,
      kurtosis_threshold: 50.0,
    };
    let m = higher_moments(&sample, cfg).unwrap();
    assert!(!m.skewness_significant);
    assert!(!m.kurtosis_significant);
  }

  #[test]
  fn constant_sample_is_an_estimation_error() {
    let res = higher_moments(&[1.0; 16], MomentsConfig::default());
    assert!(matches!(res, Err(QuantError::Estimation(_))));
  }
}
