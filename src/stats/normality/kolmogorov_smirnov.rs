//! # Kolmogorov-Smirnov
//!
//! One-sample KS test against a fully specified normal distribution.

use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use crate::error::QuantError;
use crate::error::Result;

/// Result of the one-sample Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy)]
pub struct KolmogorovSmirnovResult {
  /// Supremum distance D between empirical and reference CDF.
  pub statistic: f64,
  /// Asymptotic two-sided p-value (Stephens small-sample correction).
  pub p_value: f64,
}

/// Survival function of the Kolmogorov distribution,
/// `Q(x) = 2 sum_{k>=1} (-1)^{k-1} exp(-2 k^2 x^2)`.
fn kolmogorov_sf(x: f64) -> f64 {
  if x <= 0.0 {
    return 1.0;
  }

  let mut sum = 0.0;
  let mut sign = 1.0;
  for k in 1..=100 {
    let term = (-2.0 * (k as f64).powi(2) * x * x).exp();
    sum += sign * term;
    sign = -sign;
    if term < 1e-16 {
      break;
    }
  }

  (2.0 * sum).clamp(0.0, 1.0)
}

/// Kolmogorov-Smirnov test of `sample` against `N(mu, sigma)`.
///
/// The reference distribution is fully specified; estimating its parameters
/// from the same sample makes the p-value conservative.
pub fn kolmogorov_smirnov_normal_test(
  sample: &[f64],
  mu: f64,
  sigma: f64,
) -> Result<KolmogorovSmirnovResult> {
  if sample.len() < 8 {
    return Err(QuantError::Estimation(format!(
      "Kolmogorov-Smirnov needs at least 8 observations, got {}",
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

  let mut d = 0.0_f64;
  for (i, &x) in sorted.iter().enumerate() {
    let f = normal.cdf(x);
    let d_plus = (i + 1) as f64 / n_f - f;
    let d_minus = f - i as f64 / n_f;
    d = d.max(d_plus).max(d_minus);
  }

  let lambda = (n_f.sqrt() + 0.12 + 0.11 / n_f.sqrt()) * d;
  let p_value = kolmogorov_sf(lambda);

  Ok(KolmogorovSmirnovResult {
    statistic: d,
    p_value,
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
    let mut rng = StdRng::seed_from_u64(31);
    let dist = RandNormal::new(0.5, 2.0).unwrap();
    let sample: Vec<f64> = (0..4000).map(|_| dist.sample(&mut rng)).collect();

    let res = kolmogorov_smirnov_normal_test(&sample, 0.5, 2.0).unwrap();
    assert!(res.p_value > 0.01, "p-value too small: {res:?}");
  }

  #[test]
  fn rejects_uniform_sample() {
    let mut rng = StdRng::seed_from_u64(32);
    let dist = Uniform::new(-1.0, 1.0);
    let sample: Vec<f64> = (0..4000).map(|_| dist.sample(&mut rng)).collect();

    let res = kolmogorov_smirnov_normal_test(&sample, 0.0, 0.577).unwrap();
    assert!(res.p_value < 0.05, "expected rejection: {res:?}");
  }

  #[test]
  fn rejects_shifted_mean() {
    let mut rng = StdRng::seed_from_u64(33);
    let dist = RandNormal::new(1.0, 1.0).unwrap();
    let sample: Vec<f64> = (0..4000).map(|_| dist.sample(&mut rng)).collect();

    let res = kolmogorov_smirnov_normal_test(&sample, 0.0, 1.0).unwrap();
    assert!(res.p_value < 0.001, "expected strong rejection: {res:?}");
  }

  #[test]
  fn nonpositive_sigma_is_invalid() {
    let res = kolmogorov_smirnov_normal_test(&[0.0; 16], 0.0, 0.0);
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }

  #[test]
  fn short_sample_is_an_estimation_error() {
    let res = kolmogorov_smirnov_normal_test(&[0.1, 0.2, 0.3], 0.0, 1.0);
    assert!(matches!(res, Err(QuantError::Estimation(_))));
  }
}
