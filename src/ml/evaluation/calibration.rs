//! Calibration (reliability) curve for positive-class probabilities.

use log::debug;
use ndarray::ArrayView1;

use super::{binarize, check_same_length, UnitBins};
use crate::error::Result;

/// Observed positive rate per probability bin.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationCurve {
    /// Midpoint of each bin.
    pub bin_centers: Vec<f64>,
    /// Fraction of positives among the samples in each bin; `None` for an empty bin.
    pub true_proportions: Vec<Option<f64>>,
    /// Number of samples in each bin.
    pub counts: Vec<usize>,
}

impl CalibrationCurve {
    /// `(bin_center, true_proportion)` pairs for the non-empty bins.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bin_centers
            .iter()
            .zip(&self.true_proportions)
            .filter_map(|(&center, proportion)| proportion.map(|p| (center, p)))
    }
}

/// Buckets `y_probs` into `n_bins` equal-width bins over [0, 1] and
/// reports the fraction of true positives per bin.
///
/// A perfectly calibrated model has every point on the diagonal.
/// Probabilities outside [0, 1] fall in no bin.
///
/// # Example
///
/// ```
/// use knnlab::calibration_curve;
/// use ndarray::array;
///
/// let probs = array![0.1, 0.2, 0.8, 0.9];
/// let curve = calibration_curve(&[0, 1, 1, 1], probs.view(), &1, 2).unwrap();
/// assert_eq!(curve.bin_centers, vec![0.25, 0.75]);
/// assert_eq!(curve.true_proportions, vec![Some(0.5), Some(1.0)]);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if
/// `n_bins == 0` or the inputs differ in length.
pub fn calibration_curve<L: PartialEq>(
    y_true: &[L],
    y_probs: ArrayView1<f64>,
    positive: &L,
    n_bins: usize,
) -> Result<CalibrationCurve> {
    check_same_length(y_true.len(), y_probs.len(), "y_probs")?;
    let bins = UnitBins::new(n_bins)?;
    let actual = binarize(y_true, positive);

    let mut counts = vec![0usize; bins.len()];
    let mut positives = vec![0usize; bins.len()];
    for (&prob, &is_positive) in y_probs.iter().zip(&actual) {
        if let Some(i) = bins.index_of(prob) {
            counts[i] += 1;
            if is_positive {
                positives[i] += 1;
            }
        }
    }

    let true_proportions = counts
        .iter()
        .zip(&positives)
        .map(|(&n, &pos)| (n > 0).then(|| pos as f64 / n as f64))
        .collect();

    debug!(
        "calibration curve over {} samples in {} bins",
        y_probs.len(),
        n_bins
    );

    Ok(CalibrationCurve {
        bin_centers: bins.centers(),
        true_proportions,
        counts,
    })
}
