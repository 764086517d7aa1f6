//! Model-level fit statistics: R², F-test, information criteria.

use faer::Col;

use crate::core::ModelFitStatistics;
use crate::error::{RegressionError, Result};
use crate::inference::distributions::f_pvalue;

/// Compute the goodness-of-fit bundle from residuals and fitted values.
///
/// `n_parameters` counts every design-matrix column, intercept included.
/// Fails with `InsufficientObservations` when the residual degrees of
/// freedom would not be positive.
///
/// The log-likelihood assumes Gaussian residuals; for the binary-response
/// estimators it is therefore a working approximation used consistently
/// across models so that AIC/BIC comparisons stay on one scale.
pub fn compute_fit_statistics(
    residuals: &Col<f64>,
    y: &Col<f64>,
    n_parameters: usize,
) -> Result<ModelFitStatistics> {
    let n = y.nrows();
    if n <= n_parameters {
        return Err(RegressionError::InsufficientObservations {
            needed: n_parameters,
            got: n,
        });
    }
    let df = n - n_parameters;

    let y_mean = (0..n).map(|i| y[i]).sum::<f64>() / n as f64;
    let tss: f64 = (0..n).map(|i| (y[i] - y_mean).powi(2)).sum();
    let rss: f64 = (0..n).map(|i| residuals[i].powi(2)).sum();
    let ess = (tss - rss).max(0.0);

    // Constant response: all variation is residual unless the fit is exact.
    let r_squared = if tss > f64::EPSILON {
        (1.0 - rss / tss).clamp(0.0, 1.0)
    } else if rss < f64::EPSILON {
        1.0
    } else {
        0.0
    };
    let adj_r_squared =
        1.0 - (1.0 - r_squared) * ((n - 1) as f64 / df as f64);

    let (f_statistic, f_p) = if n_parameters > 1 && rss > f64::EPSILON {
        let f = (ess / (n_parameters - 1) as f64) / (rss / df as f64);
        (f, f_pvalue(f, n_parameters - 1, df))
    } else if rss <= f64::EPSILON {
        (f64::INFINITY, 0.0)
    } else {
        (0.0, 1.0)
    };

    let mse = rss / n as f64;
    let nf = n as f64;
    let log_likelihood = if mse > f64::EPSILON {
        -(nf / 2.0) * (2.0 * std::f64::consts::PI).ln() - (nf / 2.0) * mse.ln()
            - rss / (2.0 * mse)
    } else {
        // Degenerate perfect fit; likelihood is unbounded, pin to a large
        // finite value so AIC/BIC stay comparable.
        f64::MAX / 4.0
    };
    let p = n_parameters as f64;
    let aic = 2.0 * p - 2.0 * log_likelihood;
    let bic = nf.ln() * p - 2.0 * log_likelihood;

    Ok(ModelFitStatistics {
        r_squared,
        adj_r_squared,
        f_statistic,
        f_pvalue: f_p,
        log_likelihood,
        aic,
        bic,
        residual_std_error: (rss / df as f64).sqrt(),
        n_observations: n,
        degrees_of_freedom: df,
    })
}
