//! Statistical inference: fit statistics, coefficient tests, robust
//! covariance, and the distribution approximations backing them.

mod coefficient;
pub mod distributions;
mod fit;
mod robust;

pub use coefficient::build_coefficients;
pub use distributions::{chi_square_pvalue, critical_value, erf, f_pvalue, normal_cdf, two_sided_p_value};
pub use fit::compute_fit_statistics;
pub use robust::{cluster_std_errors, hc1_std_errors};
