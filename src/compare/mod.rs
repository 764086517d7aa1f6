//! Model comparison: fit several configurations on one dataset, rank by
//! information criteria, and test nested models against each other.

use serde::Serialize;

use crate::core::{ObservationRow, RegressionConfig, RegressionResult};
use crate::error::{RegressionError, Result};
use crate::inference::distributions::chi_square_pvalue;
use crate::solvers::{fit_model, ModelFit};

/// Outcome of comparing several model configurations.
///
/// The metric vectors are parallel to `results`; `config_indices` maps
/// each fitted result back to its position in the input configuration
/// list. Configurations that failed to fit are reported in `failures`
/// rather than aborting the comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ModelComparison {
    /// Successfully fitted models.
    pub results: Vec<RegressionResult>,
    /// Input-configuration index of each result.
    pub config_indices: Vec<usize>,
    /// AIC per fitted model.
    pub aic: Vec<f64>,
    /// BIC per fitted model.
    pub bic: Vec<f64>,
    /// R² per fitted model.
    pub r_squared: Vec<f64>,
    /// Adjusted R² per fitted model.
    pub adj_r_squared: Vec<f64>,
    /// Index into `results` of the lowest-AIC model; `None` when nothing fit.
    pub best_index: Option<usize>,
    /// `(input index, error message)` for configurations that failed.
    pub failures: Vec<(usize, String)>,
}

impl ModelComparison {
    /// The lowest-AIC fitted model, when any configuration succeeded.
    pub fn best(&self) -> Option<&RegressionResult> {
        self.best_index.map(|i| &self.results[i])
    }
}

/// Fit every configuration against the same dataset and rank by AIC.
///
/// VAR configurations are rejected per-entry (a multi-equation system has
/// no single AIC on the same scale) and land in `failures`.
pub fn compare_models(
    rows: &[ObservationRow],
    configs: &[RegressionConfig],
) -> Result<ModelComparison> {
    if rows.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }

    let mut comparison = ModelComparison {
        results: Vec::new(),
        config_indices: Vec::new(),
        aic: Vec::new(),
        bic: Vec::new(),
        r_squared: Vec::new(),
        adj_r_squared: Vec::new(),
        best_index: None,
        failures: Vec::new(),
    };

    for (i, config) in configs.iter().enumerate() {
        match fit_model(rows, config) {
            Ok(ModelFit::Single(result)) => {
                comparison.aic.push(result.fit.aic);
                comparison.bic.push(result.fit.bic);
                comparison.r_squared.push(result.fit.r_squared);
                comparison.adj_r_squared.push(result.fit.adj_r_squared);
                comparison.config_indices.push(i);
                comparison.results.push(result);
            }
            Ok(ModelFit::System(_)) => {
                comparison.failures.push((
                    i,
                    "VAR systems cannot be ranked by single-model criteria".to_string(),
                ));
            }
            Err(err) => comparison.failures.push((i, err.to_string())),
        }
    }

    comparison.best_index = comparison
        .aic
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i);

    Ok(comparison)
}

/// Likelihood-ratio test between two nested fits.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikelihoodRatioTest {
    /// `2(ℓ_full − ℓ_restricted)`, floored at zero.
    pub statistic: f64,
    /// Parameter-count difference.
    pub degrees_of_freedom: usize,
    /// Approximate χ² p-value (Wilson-Hilferty for df > 2).
    pub p_value: f64,
}

/// Likelihood-ratio test of a restricted model against a fuller one.
///
/// Nesting is checked structurally: both fits must use the same number of
/// observations and the full model must have strictly more parameters.
/// Whether the restricted regressors are genuinely a subset is the
/// caller's responsibility.
pub fn likelihood_ratio_test(
    restricted: &RegressionResult,
    full: &RegressionResult,
) -> Result<LikelihoodRatioTest> {
    if restricted.fit.n_observations != full.fit.n_observations {
        return Err(RegressionError::InvalidOptions(format!(
            "nested models must share observations: {} vs {}",
            restricted.fit.n_observations, full.fit.n_observations
        )));
    }
    let p_restricted = restricted.coefficients.len();
    let p_full = full.coefficients.len();
    if p_full <= p_restricted {
        return Err(RegressionError::InvalidOptions(format!(
            "full model must have more parameters than the restricted one ({} vs {})",
            p_full, p_restricted
        )));
    }

    let statistic = (2.0 * (full.fit.log_likelihood - restricted.fit.log_likelihood)).max(0.0);
    let degrees_of_freedom = p_full - p_restricted;
    Ok(LikelihoodRatioTest {
        statistic,
        degrees_of_freedom,
        p_value: chi_square_pvalue(statistic, degrees_of_freedom),
    })
}
