//! Per-coefficient inference: standard errors to significance tiers.

use faer::Col;

use crate::core::{Coefficient, SignificanceTier};
use crate::error::{RegressionError, Result};
use crate::inference::distributions::{critical_value, two_sided_p_value};

/// Build the ordered coefficient listing from point estimates and
/// standard errors.
///
/// `names`, `estimates`, and `std_errors` must be aligned by design-matrix
/// column (intercept first). A zero standard error yields a zero
/// t-statistic and p-value 1 rather than a division blowup.
pub fn build_coefficients(
    names: &[String],
    estimates: &Col<f64>,
    std_errors: &[f64],
    confidence_level: f64,
) -> Result<Vec<Coefficient>> {
    if names.len() != estimates.nrows() || names.len() != std_errors.len() {
        return Err(RegressionError::DimensionMismatch {
            expected: format!("{} aligned estimates and std errors", names.len()),
            found: format!("{} estimates, {} std errors", estimates.nrows(), std_errors.len()),
        });
    }

    let z = critical_value(confidence_level);
    let mut out = Vec::with_capacity(names.len());
    for (j, name) in names.iter().enumerate() {
        let estimate = estimates[j];
        let std_error = std_errors[j];
        let (t_statistic, p_value) = if std_error > 0.0 {
            let t = estimate / std_error;
            (t, two_sided_p_value(t))
        } else {
            (0.0, 1.0)
        };
        let margin = z * std_error;
        out.push(Coefficient {
            name: name.clone(),
            estimate,
            std_error,
            t_statistic,
            p_value,
            conf_interval: (estimate - margin, estimate + margin),
            significance: SignificanceTier::from_p_value(p_value),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_larger_t_smaller_p() {
        let names = vec!["a".to_string(), "b".to_string()];
        let estimates = Col::from_fn(2, |i| if i == 0 { 1.0 } else { 3.0 });
        let std_errors = vec![1.0, 1.0];
        let coefs = build_coefficients(&names, &estimates, &std_errors, 0.95).unwrap();
        assert!(coefs[1].p_value < coefs[0].p_value);
        assert!(coefs[1].t_statistic > coefs[0].t_statistic);
    }

    #[test]
    fn test_zero_std_error_is_neutral() {
        let names = vec!["a".to_string()];
        let estimates = Col::from_fn(1, |_| 2.0);
        let coefs = build_coefficients(&names, &estimates, &[0.0], 0.95).unwrap();
        assert_eq!(coefs[0].t_statistic, 0.0);
        assert_eq!(coefs[0].p_value, 1.0);
        assert_eq!(coefs[0].significance, SignificanceTier::NotSignificant);
        assert_eq!(coefs[0].conf_interval, (2.0, 2.0));
    }

    #[test]
    fn test_interval_uses_critical_value() {
        let names = vec!["a".to_string()];
        let estimates = Col::from_fn(1, |_| 1.0);
        let coefs = build_coefficients(&names, &estimates, &[0.5], 0.99).unwrap();
        let (lo, hi) = coefs[0].conf_interval;
        assert!((hi - lo - 2.0 * 2.58 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_misaligned_inputs_rejected() {
        let names = vec!["a".to_string(), "b".to_string()];
        let estimates = Col::from_fn(1, |_| 1.0);
        assert!(matches!(
            build_coefficients(&names, &estimates, &[0.5], 0.95),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }
}
