//! Core types for regression analysis.

mod dataset;
mod design;
mod options;
mod result;

pub use dataset::ObservationRow;
pub use design::{build_design_matrix, DesignMatrix, INTERCEPT_NAME};
pub use options::{EstimatorKind, RegressionConfig, RegressionConfigBuilder};
pub use result::{
    Coefficient, DiagnosticOutcome, Diagnostics, ModelFitStatistics, RegressionResult,
    SignificanceTier, VarSystemResult,
};
