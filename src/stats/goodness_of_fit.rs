//! # Goodness of Fit
//!
//! $$
//! H_0: r_t \sim \mathcal N(\mu, \sigma^2)
//! $$
//!
//! Composite normality report for a return sample against estimated GBM
//! parameters: KS statistic and p-value, AD statistic with critical values,
//! and a single decision driven by the KS p-value.

use super::normality::anderson_darling::CriticalValue;
use super::normality::anderson_darling::anderson_darling_normal_test;
use super::normality::kolmogorov_smirnov::kolmogorov_smirnov_normal_test;
use crate::error::QuantError;
use crate::error::Result;

/// Configuration for [`goodness_of_fit`].
#[derive(Debug, Clone, Copy)]
pub struct GoodnessOfFitConfig {
  /// Significance level for the KS decision rule.
  pub significance: f64,
}

impl Default for GoodnessOfFitConfig {
  fn default() -> Self {
    Self { significance: 0.05 }
  }
}

/// Combined KS and AD report.
#[derive(Debug, Clone, Copy)]
pub struct GoodnessOfFitReport {
  /// Kolmogorov-Smirnov D statistic.
  pub ks_statistic: f64,
  /// KS asymptotic p-value.
  pub ks_p_value: f64,
  /// Anderson-Darling A^2 statistic.
  pub ad_statistic: f64,
  /// AD case-0 critical value table.
  pub ad_critical_values: [CriticalValue; 5],
  /// Reject normality iff `ks_p_value < significance`.
  pub reject_normality: bool,
}

/// Test a sample against `N(mu, sigma)` with both KS and AD.
pub fn goodness_of_fit(
  sample: &[f64],
  mu: f64,
  sigma: f64,
  cfg: GoodnessOfFitConfig,
) -> Result<GoodnessOfFitReport> {
  if !(cfg.significance > 0.0 && cfg.significance < 1.0) {
    return Err(QuantError::InvalidInput(format!(
      "significance must lie in (0, 1) exclusive, got {}",
      cfg.significance
    )));
  }

  let ks = kolmogorov_smirnov_normal_test(sample, mu, sigma)?;
  let ad = anderson_darling_normal_test(sample, mu, sigma)?;

  Ok(GoodnessOfFitReport {
    ks_statistic: ks.statistic,
    ks_p_value: ks.p_value,
    ad_statistic: ad.statistic,
    ad_critical_values: ad.critical_values,
    reject_normality: ks.p_value < cfg.significance,
  })
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Distribution;
  use rand_distr::Exp;
  use rand_distr::Normal as RandNormal;

  use super::*;

  #[test]
  fn normal_sample_passes_at_default_significance() {
    let mut rng = StdRng::seed_from_u64(51);
    let dist = RandNormal::new(0.001, 0.02).unwrap();
    let sample: Vec<f64> = (0..3000).map(|_| dist.sample(&mut rng)).collect();

    let report = goodness_of_fit(&sample, 0.001, 0.02, GoodnessOfFitConfig::default()).unwrap();
    assert!(!report.reject_normality, "{report:?}");
  }

  #[test]
  fn skewed_sample_is_rejected() {
    let mut rng = StdRng::seed_from_u64(52);
    let exp = Exp::new(1.0).unwrap();
    let sample: Vec<f64> = (0..3000).map(|_| exp.sample(&mut rng)).collect();

    let report = goodness_of_fit(&sample, 1.0, 1.0, GoodnessOfFitConfig::default()).unwrap();
    assert!(report.reject_normality, "{report:?}");
    assert!(report.ad_statistic > 3.857);
  }

  #[test]
  fn significance_threshold_is_configurable() {
    let cfg = GoodnessOfFitConfig { significance: 1.5 };
    let res = goodness_of_fit(&[0.0; 16], 0.0, 1.0, cfg);
    assert!(matches!(res, Err(QuantError::InvalidInput(_))));
  }
}
