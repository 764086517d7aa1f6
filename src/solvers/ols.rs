//! Ordinary Least Squares: the closed-form `β = (XᵗX)⁻¹Xᵗy` estimator.
//!
//! Every other linear strategy in this crate (GLS passthrough, both 2SLS
//! stages, each VAR equation) bottoms out in [`fit_design`], so the
//! `SingularMatrix` contract — perfectly collinear regressors or too few
//! effective observations fail loudly — holds uniformly.

use faer::Col;
use std::time::SystemTime;

use crate::core::{
    build_design_matrix, DesignMatrix, ObservationRow, RegressionConfig, RegressionResult,
};
use crate::diagnostics::run_diagnostics;
use crate::error::{RegressionError, Result};
use crate::inference::{build_coefficients, cluster_std_errors, compute_fit_statistics, hc1_std_errors};
use crate::linalg;
use crate::solvers::Estimator;

/// Ordinary Least Squares estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OlsEstimator;

impl Estimator for OlsEstimator {
    fn fit(&self, rows: &[ObservationRow], config: &RegressionConfig) -> Result<RegressionResult> {
        let design = build_design_matrix(rows, config)?;
        fit_design(&design, config, Some(rows))
    }
}

/// Run OLS on an already-built design matrix.
///
/// `rows` is only consulted when cluster-robust standard errors need the
/// cluster variable's values; estimators that synthesize their own design
/// (VAR) pass the rows the design was built from.
pub fn fit_design(
    design: &DesignMatrix,
    config: &RegressionConfig,
    rows: Option<&[ObservationRow]>,
) -> Result<RegressionResult> {
    let n = design.n_observations();
    let p = design.n_parameters();
    if n <= p {
        return Err(RegressionError::InsufficientObservations { needed: p, got: n });
    }

    let xt = linalg::transpose(&design.x);
    let xtx = linalg::multiply(&xt, &design.x)?;
    let xtx_inverse = linalg::inverse(&xtx)?;
    let xty = linalg::multiply_vec(&xt, &design.y)?;
    let beta = linalg::multiply_vec(&xtx_inverse, &xty)?;

    let fitted = linalg::multiply_vec(&design.x, &beta)?;
    let residuals = Col::from_fn(n, |i| design.y[i] - fitted[i]);

    let fit = compute_fit_statistics(&residuals, &design.y, p)?;

    let std_errors = if config.robust_std_errors {
        match (&config.cluster, rows) {
            (Some(cluster_var), Some(rows)) => {
                let clusters = rows
                    .iter()
                    .map(|row| row.get(cluster_var))
                    .collect::<Result<Vec<f64>>>()?;
                cluster_std_errors(&design.x, &residuals, &xtx_inverse, &clusters)?
            }
            _ => hc1_std_errors(&design.x, &residuals, &xtx_inverse)?,
        }
    } else {
        let sigma2 = fit.residual_std_error * fit.residual_std_error;
        (0..p)
            .map(|j| (xtx_inverse[(j, j)] * sigma2).max(0.0).sqrt())
            .collect()
    };

    let coefficients = build_coefficients(
        &design.column_names,
        &beta,
        &std_errors,
        config.confidence_level,
    )?;
    let diagnostics = run_diagnostics(&design.x, design.has_intercept, &residuals);

    Ok(RegressionResult {
        config: config.clone(),
        coefficients,
        fit,
        diagnostics,
        residuals: (0..n).map(|i| residuals[i]).collect(),
        fitted_values: (0..n).map(|i| fitted[i]).collect(),
        timestamp: SystemTime::now(),
        xtx_inverse,
    })
}
