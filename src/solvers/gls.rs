//! Generalized Least Squares.
//!
//! Current scope is the identity-weighting passthrough: without an
//! estimated error-covariance structure, GLS with Ω = I is exactly OLS,
//! so this strategy delegates wholesale. A feasible-GLS weighting step
//! (estimating Ω from first-pass residuals) is the extension point.

use crate::core::{ObservationRow, RegressionConfig, RegressionResult};
use crate::error::Result;
use crate::solvers::{Estimator, OlsEstimator};

/// Generalized Least Squares estimator (identity weighting).
#[derive(Debug, Clone, Copy, Default)]
pub struct GlsEstimator;

impl Estimator for GlsEstimator {
    fn fit(&self, rows: &[ObservationRow], config: &RegressionConfig) -> Result<RegressionResult> {
        OlsEstimator.fit(rows, config)
    }
}
