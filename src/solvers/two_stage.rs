//! Two-Stage Least Squares for models with endogenous regressors.
//!
//! First stage: each independent variable is regressed on the full
//! instrument set (intercept included) and replaced by its fitted values.
//! Second stage: OLS on the substituted design. Instrument-strength
//! diagnostics (first-stage F) are an extension point and not computed.

use faer::{Col, Mat};

use crate::core::{build_design_matrix, DesignMatrix, ObservationRow, RegressionConfig, RegressionResult};
use crate::error::{RegressionError, Result};
use crate::linalg;
use crate::solvers::ols::fit_design;
use crate::solvers::Estimator;

/// Two-Stage Least Squares estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoStageEstimator;

impl Estimator for TwoStageEstimator {
    fn fit(&self, rows: &[ObservationRow], config: &RegressionConfig) -> Result<RegressionResult> {
        let instruments = match &config.instruments {
            Some(list) if !list.is_empty() => list,
            _ => return Err(RegressionError::MissingInstruments),
        };

        let design = build_design_matrix(rows, config)?;
        let n = design.n_observations();

        // Instrument matrix Z with a leading intercept column.
        let first = &rows[0];
        for name in instruments {
            if !first.contains(name) {
                return Err(RegressionError::MissingVariable(name.clone()));
            }
        }
        let m = instruments.len();
        let mut z = Mat::zeros(n, m + 1);
        for (i, row) in rows.iter().enumerate() {
            z[(i, 0)] = 1.0;
            for (j, name) in instruments.iter().enumerate() {
                z[(i, j + 1)] = row.get(name)?;
            }
        }

        // First stage: project every regressor column onto the instrument
        // span. Z(ZᵗZ)⁻¹Zᵗ is computed once and reused per column.
        let zt = linalg::transpose(&z);
        let ztz = linalg::multiply(&zt, &z)?;
        let ztz_inv = linalg::inverse(&ztz)?;

        let offset = usize::from(design.has_intercept);
        let mut x_hat = design.x.clone();
        for j in offset..design.n_parameters() {
            let col = Col::from_fn(n, |i| design.x[(i, j)]);
            let ztv = linalg::multiply_vec(&zt, &col)?;
            let gamma = linalg::multiply_vec(&ztz_inv, &ztv)?;
            let fitted = linalg::multiply_vec(&z, &gamma)?;
            for i in 0..n {
                x_hat[(i, j)] = fitted[i];
            }
        }

        // Second stage: plain OLS on the substituted design.
        let second_stage = DesignMatrix {
            x: x_hat,
            y: design.y,
            column_names: design.column_names,
            has_intercept: design.has_intercept,
        };
        fit_design(&second_stage, config, Some(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EstimatorKind;
    use approx::assert_abs_diff_eq;

    /// Deterministic pseudo-noise in [-0.5, 0.5).
    fn noise(i: usize, salt: u64) -> f64 {
        let h = (i as u64)
            .wrapping_mul(6364136223846793005)
            .wrapping_add(salt);
        ((h >> 33) as f64 / u32::MAX as f64) - 0.5
    }

    fn iv_rows(n: usize) -> Vec<ObservationRow> {
        // z drives x, x drives y; the noise on x is what an instrument
        // would purge in real endogenous data.
        (0..n)
            .map(|i| {
                let z = i as f64 / 10.0;
                let x = 2.0 * z + noise(i, 17);
                let y = 1.0 + 3.0 * x + noise(i, 91) * 0.1;
                ObservationRow::new([("z", z), ("x", x), ("y", y)])
            })
            .collect()
    }

    fn tsls_config() -> RegressionConfig {
        RegressionConfig::builder()
            .estimator(EstimatorKind::TwoStageLeastSquares)
            .dependent("y")
            .independents(["x"])
            .instruments(["z"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_instruments_rejected() {
        let config = RegressionConfig::builder()
            .estimator(EstimatorKind::TwoStageLeastSquares)
            .dependent("y")
            .independents(["x"])
            .build()
            .unwrap();
        let err = TwoStageEstimator.fit(&iv_rows(50), &config).unwrap_err();
        assert!(matches!(err, RegressionError::MissingInstruments));

        let config_empty = RegressionConfig::builder()
            .estimator(EstimatorKind::TwoStageLeastSquares)
            .dependent("y")
            .independents(["x"])
            .instruments(Vec::<String>::new())
            .build()
            .unwrap();
        let err = TwoStageEstimator.fit(&iv_rows(50), &config_empty).unwrap_err();
        assert!(matches!(err, RegressionError::MissingInstruments));
    }

    #[test]
    fn test_instrument_variable_must_exist() {
        let config = RegressionConfig::builder()
            .estimator(EstimatorKind::TwoStageLeastSquares)
            .dependent("y")
            .independents(["x"])
            .instruments(["w"])
            .build()
            .unwrap();
        let err = TwoStageEstimator.fit(&iv_rows(50), &config).unwrap_err();
        assert!(matches!(err, RegressionError::MissingVariable(name) if name == "w"));
    }

    #[test]
    fn test_strong_instrument_recovers_structural_slope() {
        let result = TwoStageEstimator.fit(&iv_rows(400), &tsls_config()).unwrap();
        assert_abs_diff_eq!(result.coefficients[1].estimate, 3.0, epsilon = 0.2);
        assert_abs_diff_eq!(result.coefficients[0].estimate, 1.0, epsilon = 0.5);
    }

    #[test]
    fn test_constant_instrument_singular_first_stage() {
        let rows: Vec<ObservationRow> = (0..30)
            .map(|i| {
                ObservationRow::new([("z", 1.0), ("x", i as f64), ("y", 2.0 * i as f64)])
            })
            .collect();
        // Constant instrument is collinear with the first-stage intercept.
        let err = TwoStageEstimator.fit(&rows, &tsls_config()).unwrap_err();
        assert!(matches!(err, RegressionError::SingularMatrix));
    }
}
