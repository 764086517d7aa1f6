//! Unified error type for the regression engine.
//!
//! Every public operation returns [`Result`] rather than panicking: all
//! expected failure modes (degenerate data, incomplete configuration,
//! singular matrices) are representable as values and propagate unchanged
//! from the layer that detected them. No component downgrades an error into
//! a default or zero result.

use thiserror::Error;

/// Errors produced by the regression engine.
#[derive(Error, Debug)]
pub enum RegressionError {
    /// No observation rows were supplied.
    #[error("dataset contains no observation rows")]
    EmptyDataset,

    /// A configured variable name is absent from the data.
    #[error("variable '{0}' not found in dataset")]
    MissingVariable(String),

    /// The configuration names no independent variables.
    #[error("at least one independent variable is required")]
    NoIndependentVariables,

    /// Two-stage least squares was requested without instruments.
    #[error("two-stage least squares requires at least one instrument variable")]
    MissingInstruments,

    /// A matrix operation was given incompatible shapes.
    ///
    /// This indicates an internal programming error rather than bad user
    /// input; observing it should be treated as a defect.
    #[error("matrix dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    /// A matrix required to be inverted is numerically singular
    /// (collinear regressors, too few observations, or a degenerate
    /// MLE information matrix). Never silently approximated.
    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,

    /// Prediction/actual vectors of different lengths when evaluating
    /// forecast accuracy.
    #[error("length mismatch: {left} predictions vs {right} actuals")]
    LengthMismatch { left: usize, right: usize },

    /// Fewer effective observations than parameters (residual degrees of
    /// freedom would be zero or negative).
    #[error("insufficient observations: need more than {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    /// Configuration rejected by builder validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// One equation of a VAR system failed to estimate.
    #[error("VAR equation for '{variable}' failed: {source}")]
    VarEquationFailed {
        variable: String,
        #[source]
        source: Box<RegressionError>,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;
