//! Design-matrix construction from named observation rows.

use faer::{Col, Mat};

use crate::core::{ObservationRow, RegressionConfig};
use crate::error::{RegressionError, Result};

/// A numeric design matrix paired with its response vector.
///
/// Invariants: `x.nrows() == y.nrows()`, and `x.ncols()` equals the number
/// of independent variables plus one when an intercept column is present.
/// The intercept column, when present, is the first column.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// Regressor matrix (rows = observations).
    pub x: Mat<f64>,
    /// Response vector, in row order.
    pub y: Col<f64>,
    /// Column names, intercept first when present.
    pub column_names: Vec<String>,
    /// Whether the first column is the constant intercept.
    pub has_intercept: bool,
}

impl DesignMatrix {
    /// Observations in the design.
    pub fn n_observations(&self) -> usize {
        self.x.nrows()
    }

    /// Parameters (columns, intercept included).
    pub fn n_parameters(&self) -> usize {
        self.x.ncols()
    }
}

/// Intercept column label used in coefficient listings.
pub const INTERCEPT_NAME: &str = "(Intercept)";

/// Build the design matrix and response vector for a configuration.
///
/// Validates that the dataset is non-empty, that at least one independent
/// variable is configured, and that the dependent and every independent
/// variable exist on the first row (rows are expected to be uniform; a
/// name missing from a later row also fails, naming the variable).
pub fn build_design_matrix(
    rows: &[ObservationRow],
    config: &RegressionConfig,
) -> Result<DesignMatrix> {
    if rows.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }
    if config.independents.is_empty() {
        return Err(RegressionError::NoIndependentVariables);
    }

    // Validate names against the first row so the offending variable is
    // reported before any numeric work happens.
    let first = &rows[0];
    if !first.contains(&config.dependent) {
        return Err(RegressionError::MissingVariable(config.dependent.clone()));
    }
    for name in &config.independents {
        if !first.contains(name) {
            return Err(RegressionError::MissingVariable(name.clone()));
        }
    }

    let n = rows.len();
    let p = config.parameter_count();
    let mut x = Mat::zeros(n, p);
    let mut y = Col::zeros(n);
    let offset = usize::from(config.intercept);

    for (i, row) in rows.iter().enumerate() {
        y[i] = row.get(&config.dependent)?;
        if config.intercept {
            x[(i, 0)] = 1.0;
        }
        for (j, name) in config.independents.iter().enumerate() {
            x[(i, offset + j)] = row.get(name)?;
        }
    }

    let mut column_names = Vec::with_capacity(p);
    if config.intercept {
        column_names.push(INTERCEPT_NAME.to_string());
    }
    column_names.extend(config.independents.iter().cloned());

    Ok(DesignMatrix {
        x,
        y,
        column_names,
        has_intercept: config.intercept,
    })
}
