//! Estimation result types: coefficients, fit statistics, diagnostics.

use faer::Mat;
use serde::Serialize;
use std::time::SystemTime;

use crate::core::RegressionConfig;

/// Significance classification of a coefficient's p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignificanceTier {
    /// p < 0.01
    HighlySignificant,
    /// p < 0.05
    Significant,
    /// p < 0.10
    MarginallySignificant,
    /// p ≥ 0.10
    NotSignificant,
}

impl SignificanceTier {
    /// Classify a two-sided p-value.
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.01 {
            Self::HighlySignificant
        } else if p < 0.05 {
            Self::Significant
        } else if p < 0.10 {
            Self::MarginallySignificant
        } else {
            Self::NotSignificant
        }
    }
}

/// One estimated coefficient with its inference statistics.
///
/// Coefficients are ordered intercept-first, matching design-matrix
/// column order.
#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    /// Variable name (`(Intercept)` for the intercept column).
    pub name: String,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error.
    pub std_error: f64,
    /// t-statistic (estimate / std error).
    pub t_statistic: f64,
    /// Two-sided p-value from the normal approximation.
    pub p_value: f64,
    /// Confidence interval at the configured level.
    pub conf_interval: (f64, f64),
    /// Significance tier for the p-value.
    pub significance: SignificanceTier,
}

/// Model-level goodness-of-fit statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ModelFitStatistics {
    /// Coefficient of determination.
    pub r_squared: f64,
    /// R² penalized for parameter count and sample size.
    pub adj_r_squared: f64,
    /// Overall F-statistic.
    pub f_statistic: f64,
    /// Approximate p-value of the F-statistic.
    pub f_pvalue: f64,
    /// Gaussian log-likelihood of the residuals.
    pub log_likelihood: f64,
    /// Akaike Information Criterion: 2p − 2ℓ.
    pub aic: f64,
    /// Bayesian Information Criterion: ln(n)·p − 2ℓ.
    pub bic: f64,
    /// Residual standard error √(RSS / (n − p)).
    pub residual_std_error: f64,
    /// Observations used.
    pub n_observations: usize,
    /// Residual degrees of freedom (n − p), always positive.
    pub degrees_of_freedom: usize,
}

/// Outcome of one diagnostic test.
///
/// `computed` is authoritative: when false, `statistic`, `p_value`, and
/// `flag` are neutral placeholders and must not be read as a passing
/// result. A diagnostic never claims to have passed when it was not run.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticOutcome {
    /// Test statistic (0.0 when not computed).
    pub statistic: f64,
    /// p-value, when the test defines one.
    pub p_value: Option<f64>,
    /// Boolean alarm flag, when the test defines one.
    pub flag: Option<bool>,
    /// Whether this diagnostic was actually computed.
    pub computed: bool,
}

impl DiagnosticOutcome {
    /// Placeholder for a diagnostic that has not been implemented yet.
    pub fn not_computed() -> Self {
        Self {
            statistic: 0.0,
            p_value: None,
            flag: None,
            computed: false,
        }
    }
}

/// Bundle of residual diagnostics attached to every fit.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    /// Jarque-Bera normality test on residuals.
    pub normality: DiagnosticOutcome,
    /// Breusch-Pagan heteroskedasticity test (extension point).
    pub heteroskedasticity: DiagnosticOutcome,
    /// Durbin-Watson first-order autocorrelation statistic.
    pub autocorrelation: DiagnosticOutcome,
    /// Maximum variance inflation factor across regressors.
    pub multicollinearity: DiagnosticOutcome,
    /// IQR-fence outlier count on residuals.
    pub outliers: DiagnosticOutcome,
    /// RESET specification test (extension point).
    pub specification: DiagnosticOutcome,
    /// CUSUM parameter-stability test (extension point).
    pub stability: DiagnosticOutcome,
}

/// Complete result of one estimation call.
///
/// Created fresh per call, immutable, owned by the caller; carries no
/// identity or shared state between calls.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionResult {
    /// Echo of the configuration that produced this result.
    pub config: RegressionConfig,
    /// Estimated coefficients, intercept first.
    pub coefficients: Vec<Coefficient>,
    /// Model fit statistics.
    pub fit: ModelFitStatistics,
    /// Residual diagnostics.
    pub diagnostics: Diagnostics,
    /// Residuals `y − fitted`, in row order.
    pub residuals: Vec<f64>,
    /// Fitted values, in row order.
    pub fitted_values: Vec<f64>,
    /// When this result was produced.
    pub timestamp: SystemTime,
    /// `(XᵗX)⁻¹`, retained for prediction standard errors.
    #[serde(skip_serializing)]
    pub xtx_inverse: Mat<f64>,
}

impl RegressionResult {
    /// Coefficient point estimates in design-matrix column order.
    pub fn coefficient_values(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.estimate).collect()
    }
}

/// Combined result of a VAR system: one equation per endogenous variable.
#[derive(Debug, Clone, Serialize)]
pub struct VarSystemResult {
    /// Lag order used for every equation.
    pub lag_order: usize,
    /// Endogenous variable names, in equation order.
    pub variables: Vec<String>,
    /// Per-equation results, aligned with `variables`.
    pub equations: Vec<RegressionResult>,
}
