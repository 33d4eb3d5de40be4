//! Evaluation utilities built on top of a fitted classifier's output.
//!
//! Everything in here consumes plain label slices and positive-class
//! probability columns, so it works with any model that exposes
//! `predict` / `predict_proba`:
//! - Confusion matrix and derived rates
//! - Calibration curve
//! - Per-class probability histograms
//! - ROC curve over a fixed threshold sweep
//! - 2D decision surface
//!
//! # Examples
//!
//! ```rust
//! use knnlab::{evaluate_classification_metrics, KnnClassifier};
//! use ndarray::array;
//!
//! let mut knn = KnnClassifier::new();
//! knn.fit(array![[0.0], [1.0], [9.0], [10.0]], vec![0, 0, 1, 1], 1, 2).unwrap();
//!
//! let y_pred = knn.predict(array![[0.2], [9.8]].view()).unwrap();
//! let report = evaluate_classification_metrics(&[0, 1], &y_pred, &1).unwrap();
//! assert_eq!(report.accuracy, 1.0);
//! ```

use ndarray::Array1;

use crate::error::{Error, Result};

pub mod calibration;
pub mod histogram;
pub mod metrics;
pub mod roc;
pub mod surface;

pub use calibration::{calibration_curve, CalibrationCurve};
pub use histogram::{probability_histograms, ProbabilityHistograms};
pub use metrics::{
    evaluate_classification_metrics, prediction_outcomes, ClassificationReport, ConfusionMatrix,
    Outcome,
};
pub use roc::{roc_curve, RocCurve, ROC_THRESHOLDS};
pub use surface::{decision_surface, DecisionSurface};

/// Maps each label to `true` when it equals the positive class.
pub(crate) fn binarize<L: PartialEq>(labels: &[L], positive: &L) -> Vec<bool> {
    labels.iter().map(|label| label == positive).collect()
}

pub(crate) fn check_same_length(expected: usize, found: usize, what: &str) -> Result<()> {
    if expected != found {
        return Err(Error::invalid_input(format!(
            "{what}: expected {expected} values, got {found}"
        )));
    }
    Ok(())
}

/// `num / den`, or 0.0 when the denominator is zero.
pub(crate) fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// `n + 1` equally spaced points from 0 to 1, the last one exactly 1.0.
pub(crate) fn unit_linspace(n: usize) -> Array1<f64> {
    let mut points = Array1::linspace(0.0, 1.0, n + 1);
    if let Some(last) = points.last_mut() {
        *last = 1.0;
    }
    points
}

/// Fixed-width bins over [0, 1].
///
/// Every bin is `[lo, hi)` except the last one, which is `[lo, hi]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UnitBins {
    edges: Array1<f64>,
}

impl UnitBins {
    pub(crate) fn new(n_bins: usize) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::invalid_input("n_bins must be >= 1"));
        }
        Ok(Self {
            edges: unit_linspace(n_bins),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub(crate) fn edges(&self) -> &Array1<f64> {
        &self.edges
    }

    pub(crate) fn centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .into_iter()
            .map(|w| (w[0] + w[1]) / 2.0)
            .collect()
    }

    /// Bin holding `value`, or `None` outside [0, 1] (and for NaN).
    pub(crate) fn index_of(&self, value: f64) -> Option<usize> {
        let last = self.len() - 1;
        (0..self.len()).find(|&i| {
            let (lo, hi) = (self.edges[i], self.edges[i + 1]);
            value >= lo && (value < hi || (i == last && value <= hi))
        })
    }

    /// Number of `values` falling in each bin.
    pub(crate) fn counts<'a>(&self, values: impl IntoIterator<Item = &'a f64>) -> Vec<usize> {
        let mut counts = vec![0; self.len()];
        for &v in values {
            if let Some(i) = self.index_of(v) {
                counts[i] += 1;
            }
        }
        counts
    }
}
