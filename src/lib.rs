//! A statistical regression and forecasting engine.
//!
//! This library turns tabular in-memory datasets (named observation rows)
//! into fitted regression models with full statistical inference: standard
//! errors, t-statistics, p-values, confidence intervals, model-fit
//! statistics, residual diagnostics, predictions with intervals, and
//! AIC-based model comparison.
//!
//! Estimators: OLS, GLS (identity-weighting passthrough), Two-Stage Least
//! Squares, Logit/Probit via Newton-Raphson MLE, and Vector Autoregression.
//! All of them sit on one dense matrix kernel whose Gauss-Jordan inverse
//! fails loudly with [`RegressionError::SingularMatrix`] on degenerate
//! input instead of approximating.
//!
//! # Example
//!
//! ```rust,ignore
//! use regression_engine::prelude::*;
//!
//! let rows: Vec<ObservationRow> = (1..=4)
//!     .map(|i| ObservationRow::new([("x", i as f64), ("y", 2.0 * i as f64)]))
//!     .collect();
//!
//! let config = RegressionConfig::builder()
//!     .dependent("y")
//!     .independents(["x"])
//!     .build()?;
//!
//! let result = OlsEstimator.fit(&rows, &config)?;
//! println!("R² = {}", result.fit.r_squared);
//!
//! let new_rows = vec![ObservationRow::new([("x", 5.0)])];
//! let forecast = predict(&result, &new_rows, &PredictionOptions::default())?;
//! println!("ŷ = {}", forecast.predictions[0]);
//! ```
//!
//! The engine performs no I/O and holds no state between calls: every fit
//! is a pure function of its inputs, so independent estimations can run in
//! parallel without coordination.
//!
//! [`RegressionError::SingularMatrix`]: crate::error::RegressionError::SingularMatrix

pub mod compare;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod inference;
pub mod linalg;
pub mod prediction;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compare::{compare_models, likelihood_ratio_test, ModelComparison};
    pub use crate::core::{
        build_design_matrix, Coefficient, DesignMatrix, DiagnosticOutcome, Diagnostics,
        EstimatorKind, ModelFitStatistics, ObservationRow, RegressionConfig, RegressionResult,
        SignificanceTier, VarSystemResult,
    };
    pub use crate::error::{RegressionError, Result};
    pub use crate::prediction::{accuracy, predict, AccuracyMetrics, PredictionOptions, PredictionOutput};
    pub use crate::solvers::{
        fit_model, Estimator, GlsEstimator, LinkFunction, MleEstimator, ModelFit, OlsEstimator,
        TwoStageEstimator, VarEstimator,
    };
}

pub use crate::core::{
    EstimatorKind, ObservationRow, RegressionConfig, RegressionResult, VarSystemResult,
};
pub use crate::error::{RegressionError, Result};
pub use crate::solvers::{fit_model, Estimator, ModelFit};
