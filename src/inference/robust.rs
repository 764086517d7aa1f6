//! Heteroskedasticity- and cluster-robust standard errors.
//!
//! Both estimators use the sandwich form `(XᵗX)⁻¹ M (XᵗX)⁻¹`:
//!
//! - HC1: `M = XᵗΩX` with `ω_i = n/(n−p) · e_i²` (White 1980 with the
//!   degrees-of-freedom correction most packages default to).
//! - CR1: `M = c · Σ_g (X_gᵗe_g)(X_gᵗe_g)ᵗ` over clusters `g`, with the
//!   small-sample scale `c = G/(G−1) · (n−1)/(n−p)`.

use faer::{Col, Mat};
use std::collections::HashMap;

use crate::error::{RegressionError, Result};
use crate::linalg;

/// HC1 sandwich standard errors for the design `x` given OLS residuals.
pub fn hc1_std_errors(
    x: &Mat<f64>,
    residuals: &Col<f64>,
    xtx_inverse: &Mat<f64>,
) -> Result<Vec<f64>> {
    let n = x.nrows();
    let p = x.ncols();
    if n <= p {
        return Err(RegressionError::InsufficientObservations { needed: p, got: n });
    }
    let scale = n as f64 / (n - p) as f64;

    // Meat: XᵗΩX accumulated row by row.
    let mut meat = Mat::zeros(p, p);
    for i in 0..n {
        let w = scale * residuals[i] * residuals[i];
        for j in 0..p {
            for k in 0..p {
                meat[(j, k)] += w * x[(i, j)] * x[(i, k)];
            }
        }
    }

    sandwich_diagonal(xtx_inverse, &meat)
}

/// CR1 cluster-robust standard errors.
///
/// `clusters` assigns each observation row to a cluster by value; at least
/// two distinct clusters are required.
pub fn cluster_std_errors(
    x: &Mat<f64>,
    residuals: &Col<f64>,
    xtx_inverse: &Mat<f64>,
    clusters: &[f64],
) -> Result<Vec<f64>> {
    let n = x.nrows();
    let p = x.ncols();
    if clusters.len() != n {
        return Err(RegressionError::LengthMismatch {
            left: clusters.len(),
            right: n,
        });
    }
    if n <= p {
        return Err(RegressionError::InsufficientObservations { needed: p, got: n });
    }

    // Per-cluster score sums s_g = X_gᵗ e_g, keyed by the cluster value's
    // bit pattern so equal values always land in the same group.
    let mut scores: HashMap<u64, Vec<f64>> = HashMap::new();
    for i in 0..n {
        let entry = scores
            .entry(clusters[i].to_bits())
            .or_insert_with(|| vec![0.0; p]);
        for j in 0..p {
            entry[j] += x[(i, j)] * residuals[i];
        }
    }

    let g = scores.len();
    if g < 2 {
        return Err(RegressionError::InvalidOptions(
            "cluster-robust standard errors require at least 2 clusters".to_string(),
        ));
    }
    let scale = (g as f64 / (g - 1) as f64) * ((n - 1) as f64 / (n - p) as f64);

    let mut meat = Mat::zeros(p, p);
    for s in scores.values() {
        for j in 0..p {
            for k in 0..p {
                meat[(j, k)] += scale * s[j] * s[k];
            }
        }
    }

    sandwich_diagonal(xtx_inverse, &meat)
}

/// Square roots of the diagonal of `bread · meat · bread`.
fn sandwich_diagonal(bread: &Mat<f64>, meat: &Mat<f64>) -> Result<Vec<f64>> {
    let half = linalg::multiply(bread, meat)?;
    let cov = linalg::multiply(&half, bread)?;
    Ok((0..cov.nrows()).map(|j| cov[(j, j)].max(0.0).sqrt()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Homoskedastic residuals: HC1 should land close to the classical SEs.
    #[test]
    fn test_hc1_close_to_classical_under_homoskedasticity() {
        let n = 60;
        let x = Mat::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { (i % 10) as f64 });
        let residuals = Col::from_fn(n, |i| if i % 2 == 0 { 0.5 } else { -0.5 });

        let xtx = linalg::multiply(&linalg::transpose(&x), &x).unwrap();
        let xtx_inv = linalg::inverse(&xtx).unwrap();
        let robust = hc1_std_errors(&x, &residuals, &xtx_inv).unwrap();

        let sigma2 = 0.25 * n as f64 / (n - 2) as f64;
        for j in 0..2 {
            let classical = (xtx_inv[(j, j)] * sigma2).sqrt();
            let ratio = robust[j] / classical;
            assert!(ratio > 0.5 && ratio < 2.0, "ratio = {}", ratio);
        }
    }

    #[test]
    fn test_cluster_requires_two_clusters() {
        let x = Mat::from_fn(4, 1, |i, _| i as f64 + 1.0);
        let residuals = Col::from_fn(4, |_| 0.1);
        let xtx = linalg::multiply(&linalg::transpose(&x), &x).unwrap();
        let xtx_inv = linalg::inverse(&xtx).unwrap();
        let err = cluster_std_errors(&x, &residuals, &xtx_inv, &[1.0; 4]).unwrap_err();
        assert!(matches!(err, RegressionError::InvalidOptions(_)));
    }

    #[test]
    fn test_cluster_assignment_length_checked() {
        let x = Mat::from_fn(4, 1, |i, _| i as f64 + 1.0);
        let residuals = Col::from_fn(4, |_| 0.1);
        let xtx = linalg::multiply(&linalg::transpose(&x), &x).unwrap();
        let xtx_inv = linalg::inverse(&xtx).unwrap();
        let err = cluster_std_errors(&x, &residuals, &xtx_inv, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, RegressionError::LengthMismatch { .. }));
    }
}
