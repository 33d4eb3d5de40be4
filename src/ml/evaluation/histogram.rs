//! Predicted-probability distributions split by true class.

use log::debug;
use ndarray::ArrayView1;

use super::{binarize, check_same_length, UnitBins};
use crate::error::Result;

/// Positive-class probabilities grouped by the sample's true class.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityHistograms {
    /// Probabilities of samples whose true label is the positive class, in input order.
    pub positive: Vec<f64>,
    /// Probabilities of all remaining samples, in input order.
    pub negative: Vec<f64>,
    /// `n_bins + 1` edges over [0, 1].
    pub bin_edges: Vec<f64>,
    pub positive_counts: Vec<usize>,
    pub negative_counts: Vec<usize>,
}

/// Splits `y_probs` by true class and bins each side over [0, 1].
///
/// A well-separating model piles positives near 1 and negatives near 0.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if
/// `n_bins == 0` or the inputs differ in length.
pub fn probability_histograms<L: PartialEq>(
    y_true: &[L],
    y_probs: ArrayView1<f64>,
    positive: &L,
    n_bins: usize,
) -> Result<ProbabilityHistograms> {
    check_same_length(y_true.len(), y_probs.len(), "y_probs")?;
    let bins = UnitBins::new(n_bins)?;

    let (pos, neg): (Vec<(f64, bool)>, Vec<(f64, bool)>) = y_probs
        .iter()
        .copied()
        .zip(binarize(y_true, positive))
        .partition(|&(_, is_positive)| is_positive);
    let positive: Vec<f64> = pos.into_iter().map(|(p, _)| p).collect();
    let negative: Vec<f64> = neg.into_iter().map(|(p, _)| p).collect();

    debug!(
        "probability histograms: {} positive, {} negative samples",
        positive.len(),
        negative.len()
    );

    Ok(ProbabilityHistograms {
        positive_counts: bins.counts(&positive),
        negative_counts: bins.counts(&negative),
        bin_edges: bins.edges().to_vec(),
        positive,
        negative,
    })
}
