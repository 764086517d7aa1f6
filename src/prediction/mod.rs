//! Prediction from a fitted model: points, intervals, and forecast
//! accuracy evaluation.
//!
//! Interval critical values are the fixed normal approximations from
//! [`crate::inference::distributions`] (1.96 / 2.58). For Logit and Probit
//! fits, intervals are computed on the linear-predictor scale and mapped
//! through the link, which keeps the bounds inside [0, 1]; this is a
//! documented simplification rather than exact binomial inference.

use serde::Serialize;

use crate::core::{EstimatorKind, ObservationRow, RegressionResult};
use crate::error::{RegressionError, Result};
use crate::inference::distributions::critical_value;
use crate::solvers::LinkFunction;

/// What a prediction call should produce beyond point predictions.
#[derive(Debug, Clone, Copy)]
pub struct PredictionOptions {
    /// Include confidence intervals for the mean response.
    pub include_confidence_intervals: bool,
    /// Include prediction intervals for new observations.
    pub include_prediction_intervals: bool,
    /// Confidence level for both interval kinds.
    pub confidence_level: f64,
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self {
            include_confidence_intervals: true,
            include_prediction_intervals: true,
            confidence_level: 0.95,
        }
    }
}

/// Predictions aligned by index with the input rows.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutput {
    /// Point predictions (probabilities for Logit/Probit fits).
    pub predictions: Vec<f64>,
    /// Standard error of each prediction.
    pub std_errors: Vec<f64>,
    /// Confidence intervals, when requested.
    pub confidence_intervals: Option<Vec<(f64, f64)>>,
    /// Prediction intervals, when requested. Always at least as wide as
    /// the confidence interval for the same row.
    pub prediction_intervals: Option<Vec<(f64, f64)>>,
}

/// Predict responses for new observation rows from a fitted model.
///
/// Each row must carry every regressor the model was fit with; a missing
/// name fails with `MissingVariable`. The prediction standard error is
/// `√(x₀ᵗ(XᵗX)⁻¹x₀ · s²)`, and prediction intervals widen that by the
/// residual standard error: `√(se² + rse²)`.
pub fn predict(
    model: &RegressionResult,
    rows: &[ObservationRow],
    options: &PredictionOptions,
) -> Result<PredictionOutput> {
    if rows.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }
    let config = &model.config;
    let link = match config.estimator {
        EstimatorKind::Logit => Some(LinkFunction::Logit),
        EstimatorKind::Probit => Some(LinkFunction::Probit),
        _ => None,
    };
    let beta = model.coefficient_values();
    let p = beta.len();
    let rse = model.fit.residual_std_error;
    let z = critical_value(options.confidence_level);

    let mut predictions = Vec::with_capacity(rows.len());
    let mut std_errors = Vec::with_capacity(rows.len());
    let mut conf_intervals = Vec::with_capacity(rows.len());
    let mut pred_intervals = Vec::with_capacity(rows.len());

    for row in rows {
        // Regressor vector in design-matrix column order.
        let mut x0 = Vec::with_capacity(p);
        if config.intercept {
            x0.push(1.0);
        }
        for name in &config.independents {
            x0.push(row.get(name)?);
        }
        if x0.len() != p {
            return Err(RegressionError::DimensionMismatch {
                expected: format!("{} regressors", p),
                found: format!("{}", x0.len()),
            });
        }

        let eta: f64 = x0.iter().zip(&beta).map(|(x, b)| x * b).sum();

        // x₀ᵗ(XᵗX)⁻¹x₀, then scaled by s² for the linear estimators. The
        // MLE estimators store the inverse information matrix, which is
        // already the coefficient covariance.
        let mut quad = 0.0;
        for j in 0..p {
            for k in 0..p {
                quad += x0[j] * model.xtx_inverse[(j, k)] * x0[k];
            }
        }
        let se = if link.is_some() {
            quad.max(0.0).sqrt()
        } else {
            (quad * rse * rse).max(0.0).sqrt()
        };

        let point = match link {
            Some(link) => link.mean(eta),
            None => eta,
        };
        let transform = |v: f64| match link {
            Some(link) => link.mean(v),
            None => v,
        };

        let ci_margin = z * se;
        let pi_margin = z * (se * se + rse * rse).sqrt();
        predictions.push(point);
        std_errors.push(se);
        conf_intervals.push((transform(eta - ci_margin), transform(eta + ci_margin)));
        pred_intervals.push((transform(eta - pi_margin), transform(eta + pi_margin)));
    }

    Ok(PredictionOutput {
        predictions,
        std_errors,
        confidence_intervals: options.include_confidence_intervals.then_some(conf_intervals),
        prediction_intervals: options.include_prediction_intervals.then_some(pred_intervals),
    })
}

/// Forecast accuracy metrics.
#[derive(Debug, Clone, Serialize)]
pub struct AccuracyMetrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Mean squared error.
    pub mse: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute percentage error; `None` when every actual is zero.
    pub mape: Option<f64>,
}

/// Evaluate predictions against realized values.
///
/// Fails with `LengthMismatch` when the vectors differ in length and
/// `EmptyDataset` when both are empty. MAPE skips zero actuals.
pub fn accuracy(predicted: &[f64], actual: &[f64]) -> Result<AccuracyMetrics> {
    if predicted.len() != actual.len() {
        return Err(RegressionError::LengthMismatch {
            left: predicted.len(),
            right: actual.len(),
        });
    }
    if predicted.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }

    let n = predicted.len() as f64;
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut pct_sum = 0.0;
    let mut pct_count = 0usize;
    for (&p, &a) in predicted.iter().zip(actual) {
        let e = a - p;
        abs_sum += e.abs();
        sq_sum += e * e;
        if a != 0.0 {
            pct_sum += (e / a).abs();
            pct_count += 1;
        }
    }
    let mse = sq_sum / n;
    Ok(AccuracyMetrics {
        mae: abs_sum / n,
        mse,
        rmse: mse.sqrt(),
        mape: (pct_count > 0).then(|| 100.0 * pct_sum / pct_count as f64),
    })
}
