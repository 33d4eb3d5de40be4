//! ROC curve over a fixed sweep of decision thresholds.

use log::debug;
use ndarray::ArrayView1;

use super::{binarize, check_same_length, unit_linspace, ConfusionMatrix, Outcome};
use crate::error::Result;

/// Number of thresholds swept: 0.0, 0.1, ..., 1.0.
pub const ROC_THRESHOLDS: usize = 11;

/// False/true positive rates per threshold, in threshold order.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub thresholds: Vec<f64>,
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
}

impl RocCurve {
    /// Area under the swept points by the trapezoid rule, with the curve
    /// closed at the origin.
    pub fn auc(&self) -> f64 {
        let mut points: Vec<(f64, f64)> = self
            .fpr
            .iter()
            .copied()
            .zip(self.tpr.iter().copied())
            .collect();
        points.push((0.0, 0.0));
        points
            .windows(2)
            .map(|w| (w[0].0 - w[1].0) * (w[0].1 + w[1].1) / 2.0)
            .sum()
    }
}

/// Sweeps [`ROC_THRESHOLDS`] equally spaced thresholds over [0, 1],
/// predicting positive when `prob >= threshold`.
///
/// Each rate is 0.0 when its denominator is zero.
///
/// # Example
///
/// ```
/// use knnlab::roc_curve;
/// use ndarray::array;
///
/// let probs = array![0.9, 0.8, 0.3, 0.1];
/// let roc = roc_curve(&[1, 1, 0, 0], probs.view(), &1).unwrap();
/// assert_eq!(roc.fpr.len(), 11);
/// assert_eq!((roc.fpr[0], roc.tpr[0]), (1.0, 1.0));
/// assert_eq!(roc.auc(), 1.0);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the inputs
/// differ in length.
pub fn roc_curve<L: PartialEq>(
    y_true: &[L],
    y_probs: ArrayView1<f64>,
    positive: &L,
) -> Result<RocCurve> {
    check_same_length(y_true.len(), y_probs.len(), "y_probs")?;
    let actual = binarize(y_true, positive);
    let thresholds = unit_linspace(ROC_THRESHOLDS - 1).to_vec();

    let mut fpr = Vec::with_capacity(ROC_THRESHOLDS);
    let mut tpr = Vec::with_capacity(ROC_THRESHOLDS);
    for &threshold in &thresholds {
        let outcomes: Vec<Outcome> = y_probs
            .iter()
            .zip(&actual)
            .map(|(&prob, &is_positive)| Outcome::classify(is_positive, prob >= threshold))
            .collect();
        let cm = ConfusionMatrix::from_outcomes(&outcomes);
        fpr.push(cm.false_positive_rate());
        tpr.push(cm.recall());
    }

    debug!("ROC curve over {} samples", y_probs.len());

    Ok(RocCurve {
        thresholds,
        fpr,
        tpr,
    })
}
