//! # Statistics
//!
//! $$
//! g_1 = \frac{m_3}{m_2^{3/2}}, \qquad A^2, \ D_n
//! $$
//!
//! Statistical validation of return samples: normality tests against
//! estimated GBM parameters and higher sample moments.

pub mod goodness_of_fit;
pub mod moments;
pub mod normality;

pub use goodness_of_fit::GoodnessOfFitConfig;
pub use goodness_of_fit::GoodnessOfFitReport;
pub use goodness_of_fit::goodness_of_fit;
pub use moments::MomentsConfig;
pub use moments::MomentsReport;
pub use moments::higher_moments;
pub use normality::anderson_darling_normal_test;
pub use normality::kolmogorov_smirnov_normal_test;
