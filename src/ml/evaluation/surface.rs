//! Positive-class probability evaluated on a regular 2D grid.

use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{Error, Result};
use crate::ml::classic::KnnClassifier;

/// Padding added on each side of the data range.
const MARGIN: f64 = 1.0;

/// A `grid_points_n × grid_points_n` mesh and the model's positive-class
/// probability at each node.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionSurface {
    /// Grid coordinates along the first feature.
    pub xs: Array1<f64>,
    /// Grid coordinates along the second feature.
    pub ys: Array1<f64>,
    /// `probabilities[[i, j]]` is the probability at `(xs[j], ys[i])`.
    pub probabilities: Array2<f64>,
}

/// Evaluates `model.predict_proba` on a mesh spanning the range of `x`
/// padded by one unit, and keeps the column of `positive`.
///
/// # Errors
///
/// - [`Error::NotFitted`] if the model has not been fitted.
/// - [`Error::InvalidInput`] if `x` is empty or not two-dimensional,
///   `grid_points_n` is zero, or `positive` is not a fitted class.
pub fn decision_surface<L: Ord + Clone>(
    model: &KnnClassifier<L>,
    x: ArrayView2<f64>,
    positive: &L,
    grid_points_n: usize,
) -> Result<DecisionSurface> {
    if x.ncols() != 2 {
        return Err(Error::invalid_input(format!(
            "decision surface needs 2 features, got {}",
            x.ncols()
        )));
    }
    if x.nrows() == 0 {
        return Err(Error::invalid_input("decision surface needs at least one sample"));
    }
    if grid_points_n == 0 {
        return Err(Error::invalid_input("grid_points_n must be >= 1"));
    }
    if !model.is_fitted() {
        return Err(Error::NotFitted);
    }
    let column = model
        .class_index(positive)
        .ok_or_else(|| Error::invalid_input("positive label is not one of the fitted classes"))?;

    let xs = padded_axis(x.column(0), grid_points_n);
    let ys = padded_axis(x.column(1), grid_points_n);
    let n = grid_points_n;

    // Row-major over (y, x), the same order as a flattened meshgrid.
    let grid = Array2::from_shape_fn((n * n, 2), |(r, c)| {
        if c == 0 {
            xs[r % n]
        } else {
            ys[r / n]
        }
    });
    let proba = model.predict_proba(grid.view())?;
    let probabilities = Array2::from_shape_fn((n, n), |(i, j)| proba[[i * n + j, column]]);

    debug!("decision surface evaluated on a {n}x{n} grid");

    Ok(DecisionSurface {
        xs,
        ys,
        probabilities,
    })
}

fn padded_axis(values: ArrayView1<f64>, n: usize) -> Array1<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Array1::linspace(min - MARGIN, max + MARGIN, n)
}
