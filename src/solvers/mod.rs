//! Estimator strategies: one module per estimation method, all behind a
//! common fitting seam so each stays independently testable.

mod gls;
mod mle;
mod ols;
mod two_stage;
mod var;

pub use gls::GlsEstimator;
pub use mle::{LinkFunction, MleEstimator, CONVERGENCE_TOLERANCE, MAX_ITERATIONS};
pub use ols::{fit_design, OlsEstimator};
pub use two_stage::TwoStageEstimator;
pub use var::VarEstimator;

use crate::core::{EstimatorKind, ObservationRow, RegressionConfig, RegressionResult, VarSystemResult};
use crate::error::Result;

/// A regression estimation strategy.
///
/// Every estimator is a pure function of its inputs: no state survives
/// between calls, and the same inputs always reproduce the same result.
pub trait Estimator {
    /// Fit the model, producing a fresh caller-owned result.
    fn fit(&self, rows: &[ObservationRow], config: &RegressionConfig) -> Result<RegressionResult>;
}

/// Outcome of [`fit_model`]: a single equation or a VAR system.
#[derive(Debug, Clone)]
pub enum ModelFit {
    /// One-equation estimators (OLS, GLS, 2SLS, Logit, Probit).
    Single(RegressionResult),
    /// Vector autoregression.
    System(VarSystemResult),
}

/// Dispatch estimation on the configuration's estimator kind.
pub fn fit_model(rows: &[ObservationRow], config: &RegressionConfig) -> Result<ModelFit> {
    match config.estimator {
        EstimatorKind::Ols => OlsEstimator.fit(rows, config).map(ModelFit::Single),
        EstimatorKind::Gls => GlsEstimator.fit(rows, config).map(ModelFit::Single),
        EstimatorKind::TwoStageLeastSquares => {
            TwoStageEstimator.fit(rows, config).map(ModelFit::Single)
        }
        EstimatorKind::Logit => MleEstimator::logit().fit(rows, config).map(ModelFit::Single),
        EstimatorKind::Probit => MleEstimator::probit().fit(rows, config).map(ModelFit::Single),
        EstimatorKind::Var => VarEstimator.fit(rows, config).map(ModelFit::System),
    }
}
