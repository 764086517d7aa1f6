//! Logit and Probit estimation via Newton-Raphson maximum likelihood.
//!
//! Both links share one Fisher-scoring loop; they differ only in the mean
//! function and the information weights. Iteration is capped at
//! [`MAX_ITERATIONS`] so estimation always terminates; on hitting the cap
//! the current estimate is reported rather than looping indefinitely.
//! Standard errors come from the inverse information matrix at the final
//! coefficients, so a degenerate information matrix surfaces as
//! `SingularMatrix` exactly like collinear OLS regressors do.

use faer::{Col, Mat};
use std::time::SystemTime;

use crate::core::{build_design_matrix, ObservationRow, RegressionConfig, RegressionResult};
use crate::diagnostics::run_diagnostics;
use crate::error::{RegressionError, Result};
use crate::inference::{build_coefficients, compute_fit_statistics, normal_cdf};
use crate::linalg;
use crate::solvers::Estimator;

/// Newton-Raphson iteration cap.
pub const MAX_ITERATIONS: usize = 100;

/// Convergence tolerance on the largest absolute coefficient update.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-8;

/// Probability clamp keeping weights and likelihoods finite.
const PROB_FLOOR: f64 = 1e-10;

/// Link function for binary-response MLE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFunction {
    /// Logistic CDF.
    Logit,
    /// Standard-normal CDF.
    Probit,
}

impl LinkFunction {
    /// Mean function: probability for a linear predictor value.
    pub fn mean(&self, eta: f64) -> f64 {
        let p = match self {
            Self::Logit => 1.0 / (1.0 + (-eta).exp()),
            Self::Probit => normal_cdf(eta),
        };
        p.clamp(PROB_FLOOR, 1.0 - PROB_FLOOR)
    }
}

/// Standard normal density.
fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Maximum-likelihood estimator for binary responses.
#[derive(Debug, Clone, Copy)]
pub struct MleEstimator {
    link: LinkFunction,
}

impl MleEstimator {
    /// Logistic regression.
    pub fn logit() -> Self {
        Self {
            link: LinkFunction::Logit,
        }
    }

    /// Probit regression.
    pub fn probit() -> Self {
        Self {
            link: LinkFunction::Probit,
        }
    }

    /// One Newton step: returns the information matrix and score vector
    /// at the current coefficients.
    fn score_and_information(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        beta: &Col<f64>,
    ) -> Result<(Mat<f64>, Col<f64>)> {
        let n = x.nrows();
        let p = x.ncols();
        let eta = linalg::multiply_vec(x, beta)?;

        let mut information = Mat::zeros(p, p);
        let mut score = Col::zeros(p);
        for i in 0..n {
            let mu = self.link.mean(eta[i]);
            let var = mu * (1.0 - mu);
            // Score weight u_i and information weight w_i per link.
            let (u, w) = match self.link {
                LinkFunction::Logit => (y[i] - mu, var),
                LinkFunction::Probit => {
                    let phi = normal_pdf(eta[i]);
                    ((y[i] - mu) * phi / var, phi * phi / var)
                }
            };
            for j in 0..p {
                score[j] += x[(i, j)] * u;
                for k in 0..p {
                    information[(j, k)] += w * x[(i, j)] * x[(i, k)];
                }
            }
        }
        Ok((information, score))
    }
}

impl Estimator for MleEstimator {
    fn fit(&self, rows: &[ObservationRow], config: &RegressionConfig) -> Result<RegressionResult> {
        let design = build_design_matrix(rows, config)?;
        let n = design.n_observations();
        let p = design.n_parameters();
        if n <= p {
            return Err(RegressionError::InsufficientObservations { needed: p, got: n });
        }
        for i in 0..n {
            let yi = design.y[i];
            if yi != 0.0 && yi != 1.0 {
                return Err(RegressionError::InvalidOptions(format!(
                    "binary-response estimation requires 0/1 dependent values, found {}",
                    yi
                )));
            }
        }

        // Newton-Raphson from β = 0.
        let mut beta = Col::zeros(p);
        for _ in 0..MAX_ITERATIONS {
            let (information, score) = self.score_and_information(&design.x, &design.y, &beta)?;
            let info_inv = linalg::inverse(&information)?;
            let step = linalg::multiply_vec(&info_inv, &score)?;
            let mut max_change: f64 = 0.0;
            for j in 0..p {
                beta[j] += step[j];
                max_change = max_change.max(step[j].abs());
            }
            if max_change < CONVERGENCE_TOLERANCE {
                break;
            }
        }

        // Inference at the converged (or capped) coefficients.
        let (information, _) = self.score_and_information(&design.x, &design.y, &beta)?;
        let info_inverse = linalg::inverse(&information)?;
        let std_errors: Vec<f64> = (0..p)
            .map(|j| info_inverse[(j, j)].max(0.0).sqrt())
            .collect();

        let eta = linalg::multiply_vec(&design.x, &beta)?;
        let fitted = Col::from_fn(n, |i| self.link.mean(eta[i]));
        let residuals = Col::from_fn(n, |i| design.y[i] - fitted[i]);

        let fit = compute_fit_statistics(&residuals, &design.y, p)?;
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
            xtx_inverse: info_inverse,
        })
    }
}
