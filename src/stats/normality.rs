//! # Normality Tests
//!
//! Goodness-of-fit tests of a sample against a fully specified normal
//! distribution.

pub mod anderson_darling;
pub mod kolmogorov_smirnov;

pub use anderson_darling::AndersonDarlingResult;
pub use anderson_darling::CASE0_CRITICAL_VALUES;
pub use anderson_darling::CriticalValue;
pub use anderson_darling::anderson_darling_normal_test;
pub use kolmogorov_smirnov::KolmogorovSmirnovResult;
pub use kolmogorov_smirnov::kolmogorov_smirnov_normal_test;
