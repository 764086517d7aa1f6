//! Model configuration and its builder.

use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, Result};

/// Which estimation strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimatorKind {
    /// Ordinary Least Squares (closed form).
    Ols,
    /// Generalized Least Squares. Current scope: identity weighting,
    /// delegates to OLS.
    Gls,
    /// Two-Stage Least Squares with instrument variables.
    TwoStageLeastSquares,
    /// Logistic regression via Newton-Raphson MLE.
    Logit,
    /// Probit regression via Newton-Raphson MLE.
    Probit,
    /// Vector Autoregression (one OLS equation per endogenous variable).
    Var,
}

/// Configuration for one analysis request.
///
/// Constructed once via [`RegressionConfig::builder`] and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionConfig {
    /// Estimation strategy.
    pub estimator: EstimatorKind,
    /// Dependent (response) variable name.
    pub dependent: String,
    /// Independent variable names, in design-matrix column order.
    pub independents: Vec<String>,
    /// Whether to prepend a constant-1 intercept column.
    pub intercept: bool,
    /// Instrument variable names (required for 2SLS).
    pub instruments: Option<Vec<String>>,
    /// Lag order for VAR.
    pub lag_order: Option<usize>,
    /// Confidence level for intervals, strictly between 0 and 1.
    pub confidence_level: f64,
    /// Use heteroskedasticity-robust (HC1) standard errors.
    pub robust_std_errors: bool,
    /// Cluster variable for cluster-robust standard errors. Only consulted
    /// when `robust_std_errors` is set.
    pub cluster: Option<String>,
}

impl RegressionConfig {
    /// Start building a configuration.
    pub fn builder() -> RegressionConfigBuilder {
        RegressionConfigBuilder::default()
    }

    /// Number of design-matrix columns this configuration produces.
    pub fn parameter_count(&self) -> usize {
        self.independents.len() + usize::from(self.intercept)
    }
}

/// Builder for [`RegressionConfig`]. Validation happens in [`build`].
///
/// [`build`]: RegressionConfigBuilder::build
#[derive(Debug, Clone)]
pub struct RegressionConfigBuilder {
    estimator: EstimatorKind,
    dependent: String,
    independents: Vec<String>,
    intercept: bool,
    instruments: Option<Vec<String>>,
    lag_order: Option<usize>,
    confidence_level: f64,
    robust_std_errors: bool,
    cluster: Option<String>,
}

impl Default for RegressionConfigBuilder {
    fn default() -> Self {
        Self {
            estimator: EstimatorKind::Ols,
            dependent: String::new(),
            independents: Vec::new(),
            intercept: true,
            instruments: None,
            lag_order: None,
            confidence_level: 0.95,
            robust_std_errors: false,
            cluster: None,
        }
    }
}

impl RegressionConfigBuilder {
    pub fn estimator(mut self, kind: EstimatorKind) -> Self {
        self.estimator = kind;
        self
    }

    pub fn dependent(mut self, name: impl Into<String>) -> Self {
        self.dependent = name.into();
        self
    }

    pub fn independents<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.independents = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_intercept(mut self, intercept: bool) -> Self {
        self.intercept = intercept;
        self
    }

    pub fn instruments<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.instruments = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn lag_order(mut self, p: usize) -> Self {
        self.lag_order = Some(p);
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn robust_std_errors(mut self, robust: bool) -> Self {
        self.robust_std_errors = robust;
        self
    }

    pub fn cluster(mut self, variable: impl Into<String>) -> Self {
        self.cluster = Some(variable.into());
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<RegressionConfig> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(RegressionError::InvalidOptions(format!(
                "confidence level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        if self.estimator == EstimatorKind::Var {
            match self.lag_order {
                Some(0) | None => {
                    return Err(RegressionError::InvalidOptions(
                        "VAR requires a lag order of at least 1".to_string(),
                    ))
                }
                Some(_) => {}
            }
        } else if self.dependent.is_empty() {
            return Err(RegressionError::InvalidOptions(
                "dependent variable name must not be empty".to_string(),
            ));
        }
        Ok(RegressionConfig {
            estimator: self.estimator,
            dependent: self.dependent,
            independents: self.independents,
            intercept: self.intercept,
            instruments: self.instruments,
            lag_order: self.lag_order,
            confidence_level: self.confidence_level,
            robust_std_errors: self.robust_std_errors,
            cluster: self.cluster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = RegressionConfig::builder()
            .dependent("y")
            .independents(["x"])
            .build()
            .unwrap();
        assert_eq!(config.estimator, EstimatorKind::Ols);
        assert!(config.intercept);
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.parameter_count(), 2);
    }

    #[test]
    fn test_invalid_confidence_level() {
        let err = RegressionConfig::builder()
            .dependent("y")
            .independents(["x"])
            .confidence_level(1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, RegressionError::InvalidOptions(_)));
    }

    #[test]
    fn test_var_requires_lag_order() {
        let err = RegressionConfig::builder()
            .estimator(EstimatorKind::Var)
            .independents(["a", "b"])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegressionError::InvalidOptions(_)));
    }
}
