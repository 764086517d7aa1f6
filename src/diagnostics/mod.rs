//! Residual diagnostics attached to every fitted model.
//!
//! Four tests are actually computed: Jarque-Bera normality, Durbin-Watson
//! autocorrelation, variance-inflation-factor multicollinearity, and
//! IQR-fence outlier counting. Heteroskedasticity (Breusch-Pagan),
//! specification (RESET), and stability (CUSUM) are structural extension
//! points: they report `computed = false` with neutral values rather than
//! pretending to have passed.

use faer::{Col, Mat};

use crate::core::{DiagnosticOutcome, Diagnostics};
use crate::inference::distributions::chi_square_pvalue;
use crate::linalg;

/// Durbin-Watson statistic above/below which residuals are flagged as
/// autocorrelated (2.0 is the no-autocorrelation center).
const DURBIN_WATSON_BAND: (f64, f64) = (1.5, 2.5);

/// VIF above which multicollinearity is flagged.
const VIF_THRESHOLD: f64 = 10.0;

/// Run the diagnostic suite on a fitted model's residuals and design.
///
/// Diagnostics never fail the estimation: degenerate inputs produce
/// flagged or not-computed outcomes instead of errors.
pub fn run_diagnostics(x: &Mat<f64>, has_intercept: bool, residuals: &Col<f64>) -> Diagnostics {
    Diagnostics {
        normality: jarque_bera(residuals),
        heteroskedasticity: DiagnosticOutcome::not_computed(),
        autocorrelation: durbin_watson(residuals),
        multicollinearity: max_vif(x, has_intercept),
        outliers: iqr_outliers(residuals),
        specification: DiagnosticOutcome::not_computed(),
        stability: DiagnosticOutcome::not_computed(),
    }
}

/// Jarque-Bera normality test on residual skewness and excess kurtosis.
///
/// The p-value uses the exact χ²₂ tail `exp(−JB/2)`.
pub fn jarque_bera(residuals: &Col<f64>) -> DiagnosticOutcome {
    let n = residuals.nrows();
    if n < 4 {
        return DiagnosticOutcome::not_computed();
    }
    let nf = n as f64;
    let mean = (0..n).map(|i| residuals[i]).sum::<f64>() / nf;
    let m2 = (0..n).map(|i| (residuals[i] - mean).powi(2)).sum::<f64>() / nf;
    if m2 < f64::EPSILON {
        // Constant residuals carry no shape information.
        return DiagnosticOutcome::not_computed();
    }
    let m3 = (0..n).map(|i| (residuals[i] - mean).powi(3)).sum::<f64>() / nf;
    let m4 = (0..n).map(|i| (residuals[i] - mean).powi(4)).sum::<f64>() / nf;
    let skewness = m3 / m2.powf(1.5);
    let kurtosis = m4 / (m2 * m2);
    let jb = nf / 6.0 * (skewness * skewness + (kurtosis - 3.0).powi(2) / 4.0);
    let p = chi_square_pvalue(jb, 2);
    DiagnosticOutcome {
        statistic: jb,
        p_value: Some(p),
        flag: Some(p < 0.05),
        computed: true,
    }
}

/// Durbin-Watson first-order autocorrelation statistic.
///
/// Reports the statistic and a band flag; no p-value (the DW null
/// distribution depends on the design matrix).
pub fn durbin_watson(residuals: &Col<f64>) -> DiagnosticOutcome {
    let n = residuals.nrows();
    let denom: f64 = (0..n).map(|i| residuals[i].powi(2)).sum();
    if n < 2 || denom < f64::EPSILON {
        return DiagnosticOutcome::not_computed();
    }
    let numer: f64 = (1..n)
        .map(|i| (residuals[i] - residuals[i - 1]).powi(2))
        .sum();
    let dw = numer / denom;
    DiagnosticOutcome {
        statistic: dw,
        p_value: None,
        flag: Some(dw < DURBIN_WATSON_BAND.0 || dw > DURBIN_WATSON_BAND.1),
        computed: true,
    }
}

/// Maximum variance inflation factor across non-intercept regressors.
///
/// Each VIF comes from an auxiliary OLS of one regressor on the others
/// (intercept included). A singular auxiliary system means exact
/// collinearity and reports an infinite VIF.
pub fn max_vif(x: &Mat<f64>, has_intercept: bool) -> DiagnosticOutcome {
    let offset = usize::from(has_intercept);
    let k = x.ncols() - offset;
    if k < 2 {
        // A single regressor cannot be collinear with anything.
        return DiagnosticOutcome {
            statistic: 1.0,
            p_value: None,
            flag: Some(false),
            computed: true,
        };
    }

    let n = x.nrows();
    let mut worst: f64 = 1.0;
    for target in 0..k {
        // Auxiliary design: intercept + every other regressor.
        let mut z = Mat::zeros(n, k);
        let mut v = Col::zeros(n);
        for i in 0..n {
            z[(i, 0)] = 1.0;
            let mut col = 1;
            for j in 0..k {
                if j == target {
                    v[i] = x[(i, offset + j)];
                } else {
                    z[(i, col)] = x[(i, offset + j)];
                    col += 1;
                }
            }
        }
        let r2 = match auxiliary_r_squared(&z, &v) {
            Some(r2) => r2,
            None => {
                worst = f64::INFINITY;
                break;
            }
        };
        let vif = if r2 < 1.0 { 1.0 / (1.0 - r2) } else { f64::INFINITY };
        if vif > worst {
            worst = vif;
        }
    }

    DiagnosticOutcome {
        statistic: worst,
        p_value: None,
        flag: Some(worst > VIF_THRESHOLD),
        computed: true,
    }
}

/// R² of the auxiliary regression `v ~ z`, or `None` when `zᵗz` is singular.
fn auxiliary_r_squared(z: &Mat<f64>, v: &Col<f64>) -> Option<f64> {
    let zt = linalg::transpose(z);
    let ztz = linalg::multiply(&zt, z).ok()?;
    let ztz_inv = linalg::inverse(&ztz).ok()?;
    let ztv = linalg::multiply_vec(&zt, v).ok()?;
    let beta = linalg::multiply_vec(&ztz_inv, &ztv).ok()?;
    let fitted = linalg::multiply_vec(z, &beta).ok()?;

    let n = v.nrows();
    let mean = (0..n).map(|i| v[i]).sum::<f64>() / n as f64;
    let tss: f64 = (0..n).map(|i| (v[i] - mean).powi(2)).sum();
    if tss < f64::EPSILON {
        return Some(0.0);
    }
    let rss: f64 = (0..n).map(|i| (v[i] - fitted[i]).powi(2)).sum();
    Some((1.0 - rss / tss).clamp(0.0, 1.0))
}

/// Count residuals outside the 1.5·IQR Tukey fences.
pub fn iqr_outliers(residuals: &Col<f64>) -> DiagnosticOutcome {
    let n = residuals.nrows();
    if n < 4 {
        return DiagnosticOutcome::not_computed();
    }
    let mut sorted: Vec<f64> = (0..n).map(|i| residuals[i]).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 0.25);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;
    let (lo, hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
    let count = sorted.iter().filter(|&&e| e < lo || e > hi).count();

    DiagnosticOutcome {
        statistic: count as f64,
        p_value: None,
        flag: Some(count > 0),
        computed: true,
    }
}

/// Linear-interpolation percentile of pre-sorted data.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let frac = pos - lower as f64;
    if lower + 1 < sorted.len() {
        sorted[lower] * (1.0 - frac) + sorted[lower + 1] * frac
    } else {
        sorted[lower]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durbin_watson_alternating_residuals() {
        // Perfectly alternating residuals: dw near 4 (strong negative
        // autocorrelation), flagged.
        let residuals = Col::from_fn(20, |i| if i % 2 == 0 { 1.0 } else { -1.0 });
        let out = durbin_watson(&residuals);
        assert!(out.computed);
        assert!(out.statistic > 3.5);
        assert_eq!(out.flag, Some(true));
    }

    #[test]
    fn test_durbin_watson_smooth_trend_flagged_low() {
        // Slowly drifting residuals: dw well below 1.5.
        let residuals = Col::from_fn(20, |i| (i as f64 / 20.0).sin());
        let out = durbin_watson(&residuals);
        assert!(out.computed);
        assert!(out.statistic < 1.5);
        assert_eq!(out.flag, Some(true));
    }

    #[test]
    fn test_jarque_bera_symmetric_residuals() {
        let vals = [-1.5, -1.0, -0.5, -0.2, 0.0, 0.2, 0.5, 1.0, 1.5, 0.1, -0.1, 0.3];
        let residuals = Col::from_fn(vals.len(), |i| vals[i]);
        let out = jarque_bera(&residuals);
        assert!(out.computed);
        // Roughly symmetric sample: should not be alarmed.
        assert_eq!(out.flag, Some(false));
    }

    #[test]
    fn test_vif_collinear_columns_infinite() {
        let mut x = Mat::zeros(10, 3);
        for i in 0..10 {
            x[(i, 0)] = 1.0;
            x[(i, 1)] = i as f64;
            x[(i, 2)] = 2.0 * i as f64;
        }
        let out = max_vif(&x, true);
        assert!(out.computed);
        assert!(out.statistic.is_infinite());
        assert_eq!(out.flag, Some(true));
    }

    #[test]
    fn test_vif_single_regressor_neutral() {
        let x = Mat::from_fn(10, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
        let out = max_vif(&x, true);
        assert!(out.computed);
        assert_eq!(out.statistic, 1.0);
        assert_eq!(out.flag, Some(false));
    }

    #[test]
    fn test_iqr_outlier_detected() {
        let mut vals = vec![0.1, -0.2, 0.05, -0.1, 0.15, -0.05, 0.0, 0.12];
        vals.push(25.0);
        let residuals = Col::from_fn(vals.len(), |i| vals[i]);
        let out = iqr_outliers(&residuals);
        assert!(out.computed);
        assert_eq!(out.statistic, 1.0);
        assert_eq!(out.flag, Some(true));
    }

    #[test]
    fn test_extension_points_not_computed() {
        let x = Mat::from_fn(10, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
        let residuals = Col::from_fn(10, |i| (i as f64 * 0.37).sin() * 0.1);
        let d = run_diagnostics(&x, true, &residuals);
        assert!(!d.heteroskedasticity.computed);
        assert!(!d.specification.computed);
        assert!(!d.stability.computed);
        assert!(d.autocorrelation.computed);
    }
}
