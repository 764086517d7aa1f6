//! Vector Autoregression: one OLS equation per endogenous variable.
//!
//! For lag order `p`, every endogenous variable is regressed on `p` lags
//! of every endogenous variable (shared lagged design across equations).
//! If any single equation fails, the whole system call fails and reports
//! which equation did.

use crate::core::{EstimatorKind, ObservationRow, RegressionConfig, VarSystemResult};
use crate::error::{RegressionError, Result};
use crate::solvers::{Estimator, OlsEstimator};

/// Vector Autoregression estimator.
///
/// The configuration's `independents` list names the endogenous variables;
/// `lag_order` must be at least 1 (enforced by the config builder).
#[derive(Debug, Clone, Copy, Default)]
pub struct VarEstimator;

/// Name of the `lag`-th lag of `variable` in the lagged design.
fn lag_name(variable: &str, lag: usize) -> String {
    format!("{}.l{}", variable, lag)
}

impl VarEstimator {
    /// Fit the VAR system.
    pub fn fit(&self, rows: &[ObservationRow], config: &RegressionConfig) -> Result<VarSystemResult> {
        if rows.is_empty() {
            return Err(RegressionError::EmptyDataset);
        }
        let variables = &config.independents;
        if variables.is_empty() {
            return Err(RegressionError::NoIndependentVariables);
        }
        let first = &rows[0];
        for name in variables {
            if !first.contains(name) {
                return Err(RegressionError::MissingVariable(name.clone()));
            }
        }
        let lag_order = config.lag_order.unwrap_or(1);
        if rows.len() <= lag_order {
            return Err(RegressionError::InsufficientObservations {
                needed: lag_order,
                got: rows.len(),
            });
        }

        // Shared lagged dataset: one row per usable time index, carrying
        // every variable's current value and all of its lags.
        let mut lagged_rows = Vec::with_capacity(rows.len() - lag_order);
        for t in lag_order..rows.len() {
            let mut values: Vec<(String, f64)> = Vec::with_capacity(variables.len() * (lag_order + 1));
            for name in variables {
                values.push((name.clone(), rows[t].get(name)?));
                for lag in 1..=lag_order {
                    values.push((lag_name(name, lag), rows[t - lag].get(name)?));
                }
            }
            lagged_rows.push(ObservationRow::new(values));
        }

        let regressors: Vec<String> = variables
            .iter()
            .flat_map(|name| (1..=lag_order).map(move |lag| lag_name(name, lag)))
            .collect();

        let mut equations = Vec::with_capacity(variables.len());
        for variable in variables {
            let equation_config = RegressionConfig {
                estimator: EstimatorKind::Ols,
                dependent: variable.clone(),
                independents: regressors.clone(),
                intercept: config.intercept,
                instruments: None,
                lag_order: Some(lag_order),
                confidence_level: config.confidence_level,
                robust_std_errors: config.robust_std_errors,
                cluster: None,
            };
            let result = OlsEstimator
                .fit(&lagged_rows, &equation_config)
                .map_err(|source| RegressionError::VarEquationFailed {
                    variable: variable.clone(),
                    source: Box::new(source),
                })?;
            equations.push(result);
        }

        Ok(VarSystemResult {
            lag_order,
            variables: variables.clone(),
            equations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_series_rows(n: usize) -> Vec<ObservationRow> {
        // Coupled first-order system with a deterministic disturbance.
        let mut a = 1.0;
        let mut b = -0.5;
        let mut rows = Vec::with_capacity(n);
        for i in 0..n {
            rows.push(ObservationRow::new([("a", a), ("b", b)]));
            let shock = ((i * 2654435761) % 97) as f64 / 97.0 - 0.5;
            let next_a = 0.6 * a + 0.2 * b + 0.1 * shock;
            let next_b = -0.3 * a + 0.5 * b - 0.05 * shock;
            a = next_a;
            b = next_b;
        }
        rows
    }

    fn var_config(lag: usize) -> RegressionConfig {
        RegressionConfig::builder()
            .estimator(EstimatorKind::Var)
            .independents(["a", "b"])
            .lag_order(lag)
            .build()
            .unwrap()
    }

    #[test]
    fn test_system_shape() {
        let result = VarEstimator.fit(&two_series_rows(80), &var_config(2)).unwrap();
        assert_eq!(result.lag_order, 2);
        assert_eq!(result.variables, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(result.equations.len(), 2);
        for eq in &result.equations {
            // Intercept + 2 variables x 2 lags.
            assert_eq!(eq.coefficients.len(), 5);
            assert_eq!(eq.fit.n_observations, 78);
        }
    }

    #[test]
    fn test_lag_one_recovers_transition_signs() {
        let result = VarEstimator.fit(&two_series_rows(120), &var_config(1)).unwrap();
        let eq_a = &result.equations[0];
        // Coefficients: (Intercept), a.l1, b.l1.
        assert!(eq_a.coefficients[1].estimate > 0.0);
        assert!(eq_a.coefficients[2].estimate > 0.0);
        let eq_b = &result.equations[1];
        assert!(eq_b.coefficients[1].estimate < 0.0);
        assert!(eq_b.coefficients[2].estimate > 0.0);
    }

    #[test]
    fn test_missing_endogenous_variable() {
        let config = RegressionConfig::builder()
            .estimator(EstimatorKind::Var)
            .independents(["a", "c"])
            .lag_order(1)
            .build()
            .unwrap();
        let err = VarEstimator.fit(&two_series_rows(30), &config).unwrap_err();
        assert!(matches!(err, RegressionError::MissingVariable(name) if name == "c"));
    }

    #[test]
    fn test_failed_equation_names_variable() {
        // A constant series makes its lag column collinear with the
        // intercept, so the first equation estimated must fail.
        let rows: Vec<ObservationRow> = (0..30)
            .map(|i| ObservationRow::new([("a", 2.0), ("b", i as f64)]))
            .collect();
        let err = VarEstimator.fit(&rows, &var_config(1)).unwrap_err();
        match err {
            RegressionError::VarEquationFailed { variable, source } => {
                assert_eq!(variable, "a");
                assert!(matches!(*source, RegressionError::SingularMatrix));
            }
            other => panic!("expected VarEquationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_too_short_series() {
        let err = VarEstimator.fit(&two_series_rows(2), &var_config(2)).unwrap_err();
        assert!(matches!(err, RegressionError::InsufficientObservations { .. }));
    }
}
