//! Dense matrix kernel: multiply, transpose, and Gauss-Jordan inverse.
//!
//! This is the numerical foundation of every estimator. It deliberately
//! implements its own inverse instead of delegating to a decomposition
//! library: the engine's contract is that a numerically singular matrix
//! surfaces as [`RegressionError::SingularMatrix`], never as a silent
//! pseudo-inverse approximation.
//!
//! Pivot selection uses partial pivoting (largest absolute value in the
//! current column), with singularity declared when the best available
//! pivot falls below [`PIVOT_TOLERANCE`].

use crate::error::{RegressionError, Result};
use faer::{Col, Mat};

/// Absolute pivot magnitude below which a matrix is declared singular.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Multiply two matrices with the standard row×column dot product.
///
/// Fails with `DimensionMismatch` when `a.ncols() != b.nrows()`.
pub fn multiply(a: &Mat<f64>, b: &Mat<f64>) -> Result<Mat<f64>> {
    if a.ncols() != b.nrows() {
        return Err(RegressionError::DimensionMismatch {
            expected: format!("{} rows on right operand", a.ncols()),
            found: format!("{} rows", b.nrows()),
        });
    }
    let mut out = Mat::zeros(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        for j in 0..b.ncols() {
            let mut acc = 0.0;
            for k in 0..a.ncols() {
                acc += a[(i, k)] * b[(k, j)];
            }
            out[(i, j)] = acc;
        }
    }
    Ok(out)
}

/// Multiply a matrix by a column vector.
pub fn multiply_vec(a: &Mat<f64>, v: &Col<f64>) -> Result<Col<f64>> {
    if a.ncols() != v.nrows() {
        return Err(RegressionError::DimensionMismatch {
            expected: format!("vector of length {}", a.ncols()),
            found: format!("length {}", v.nrows()),
        });
    }
    let mut out = Col::zeros(a.nrows());
    for i in 0..a.nrows() {
        let mut acc = 0.0;
        for k in 0..a.ncols() {
            acc += a[(i, k)] * v[k];
        }
        out[i] = acc;
    }
    Ok(out)
}

/// Transpose a matrix. Pure structural swap; always succeeds.
pub fn transpose(a: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(a.ncols(), a.nrows(), |i, j| a[(j, i)])
}

/// The n×n identity matrix.
pub fn identity(n: usize) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
}

/// Invert a square matrix by Gauss-Jordan elimination on `[A | I]`.
///
/// Partial pivoting: for each column the row with the largest absolute
/// value is swapped into pivot position before normalization and
/// elimination. If the selected pivot's magnitude is below
/// [`PIVOT_TOLERANCE`] the matrix is singular and the call fails — there
/// is no fallback. The augmented working copy is local to this call.
pub fn inverse(a: &Mat<f64>) -> Result<Mat<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(RegressionError::DimensionMismatch {
            expected: format!("{}x{} square matrix", n, n),
            found: format!("{}x{}", n, a.ncols()),
        });
    }

    // Augmented working matrix [A | I].
    let mut aug = Mat::zeros(n, 2 * n);
    for i in 0..n {
        for j in 0..n {
            aug[(i, j)] = a[(i, j)];
        }
        aug[(i, n + i)] = 1.0;
    }

    for col in 0..n {
        // Partial pivot: largest |value| in this column at or below the diagonal.
        let mut pivot_row = col;
        let mut pivot_mag = aug[(col, col)].abs();
        for r in (col + 1)..n {
            let mag = aug[(r, col)].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = r;
            }
        }
        if pivot_mag < PIVOT_TOLERANCE {
            return Err(RegressionError::SingularMatrix);
        }
        if pivot_row != col {
            for j in 0..2 * n {
                let tmp = aug[(col, j)];
                aug[(col, j)] = aug[(pivot_row, j)];
                aug[(pivot_row, j)] = tmp;
            }
        }

        // Normalize the pivot row.
        let pivot = aug[(col, col)];
        for j in 0..2 * n {
            aug[(col, j)] /= pivot;
        }

        // Eliminate the column from every other row.
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = aug[(r, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                aug[(r, j)] -= factor * aug[(col, j)];
            }
        }
    }

    Ok(Mat::from_fn(n, n, |i, j| aug[(i, n + j)]))
}
