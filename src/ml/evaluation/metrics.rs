//! Binary confusion-matrix metrics against a caller-chosen positive class.

use std::fmt;

use log::debug;

use super::{binarize, check_same_length, ratio};
use crate::error::Result;

/// Where a single prediction lands in the confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    TruePositive,
    FalsePositive,
    FalseNegative,
    TrueNegative,
}

impl Outcome {
    pub fn classify(actual_positive: bool, predicted_positive: bool) -> Self {
        match (actual_positive, predicted_positive) {
            (true, true) => Outcome::TruePositive,
            (false, true) => Outcome::FalsePositive,
            (true, false) => Outcome::FalseNegative,
            (false, false) => Outcome::TrueNegative,
        }
    }
}

/// Labels every sample with its [`Outcome`].
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the slices
/// differ in length.
pub fn prediction_outcomes<L: PartialEq>(
    y_true: &[L],
    y_pred: &[L],
    positive: &L,
) -> Result<Vec<Outcome>> {
    check_same_length(y_true.len(), y_pred.len(), "y_pred")?;
    let actual = binarize(y_true, positive);
    let predicted = binarize(y_pred, positive);
    Ok(actual
        .into_iter()
        .zip(predicted)
        .map(|(a, p)| Outcome::classify(a, p))
        .collect())
}

/// Binary confusion matrix counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut cm = Self::default();
        for outcome in outcomes {
            match outcome {
                Outcome::TrueNegative => cm.true_negatives += 1,
                Outcome::FalsePositive => cm.false_positives += 1,
                Outcome::FalseNegative => cm.false_negatives += 1,
                Outcome::TruePositive => cm.true_positives += 1,
            }
        }
        cm
    }

    /// Counts in the fixed order `[TN, FP, FN, TP]`.
    pub fn as_array(&self) -> [usize; 4] {
        [
            self.true_negatives,
            self.false_positives,
            self.false_negatives,
            self.true_positives,
        ]
    }

    pub fn total(&self) -> usize {
        self.as_array().iter().sum()
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// Sensitivity / true positive rate.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn specificity(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }

    pub fn false_positive_rate(&self) -> f64 {
        ratio(self.false_positives, self.false_positives + self.true_negatives)
    }

    /// Harmonic mean of precision and recall; 0.0 when both are zero.
    pub fn f1_score(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

/// Confusion matrix plus the rates derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationReport {
    pub confusion_matrix: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub specificity: f64,
    pub f1_score: f64,
}

impl From<ConfusionMatrix> for ClassificationReport {
    fn from(cm: ConfusionMatrix) -> Self {
        Self {
            confusion_matrix: cm,
            accuracy: cm.accuracy(),
            precision: cm.precision(),
            recall: cm.recall(),
            specificity: cm.specificity(),
            f1_score: cm.f1_score(),
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Confusion Matrix: {:?}",
            self.confusion_matrix.as_array()
        )?;
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f, "Precision: {:.4}", self.precision)?;
        writeln!(f, "Recall: {:.4}", self.recall)?;
        writeln!(f, "Specificity: {:.4}", self.specificity)?;
        write!(f, "F1 Score: {:.4}", self.f1_score)
    }
}

/// Computes the confusion matrix and derived rates of `y_pred` against
/// `y_true`, treating `positive` as the positive class and every other
/// label as negative.
///
/// Each rate is 0.0 when its denominator is zero.
///
/// # Example
///
/// ```
/// use knnlab::evaluate_classification_metrics;
///
/// let y_true = ["spam", "ham", "spam", "ham"];
/// let y_pred = ["spam", "spam", "ham", "ham"];
/// let report = evaluate_classification_metrics(&y_true, &y_pred, &"spam").unwrap();
/// assert_eq!(report.confusion_matrix.as_array(), [1, 1, 1, 1]);
/// assert_eq!(report.accuracy, 0.5);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the slices
/// differ in length.
pub fn evaluate_classification_metrics<L: PartialEq>(
    y_true: &[L],
    y_pred: &[L],
    positive: &L,
) -> Result<ClassificationReport> {
    let outcomes = prediction_outcomes(y_true, y_pred, positive)?;
    let cm = ConfusionMatrix::from_outcomes(&outcomes);
    debug!("confusion matrix [TN, FP, FN, TP] = {:?}", cm.as_array());
    Ok(cm.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_outcome_classify() {
        assert_eq!(Outcome::classify(true, true), Outcome::TruePositive);
        assert_eq!(Outcome::classify(false, true), Outcome::FalsePositive);
        assert_eq!(Outcome::classify(true, false), Outcome::FalseNegative);
        assert_eq!(Outcome::classify(false, false), Outcome::TrueNegative);
    }

    #[test]
    fn test_prediction_outcomes() {
        let outcomes = prediction_outcomes(&[1, 0, 1, 0], &[1, 1, 0, 0], &1).unwrap();
        assert_eq!(
            outcomes,
            vec![
                Outcome::TruePositive,
                Outcome::FalsePositive,
                Outcome::FalseNegative,
                Outcome::TrueNegative
            ]
        );
    }

    #[test]
    fn test_metrics_known_values() {
        // TP=3, FP=1, FN=2, TN=4
        let y_true = [1, 1, 1, 1, 1, 0, 0, 0, 0, 0];
        let y_pred = [1, 1, 1, 0, 0, 1, 0, 0, 0, 0];
        let report = evaluate_classification_metrics(&y_true, &y_pred, &1).unwrap();

        assert_eq!(report.confusion_matrix.as_array(), [4, 1, 2, 3]);
        assert_relative_eq!(report.accuracy, 0.7, epsilon = 1e-12);
        assert_relative_eq!(report.precision, 0.75, epsilon = 1e-12);
        assert_relative_eq!(report.recall, 0.6, epsilon = 1e-12);
        assert_relative_eq!(report.specificity, 0.8, epsilon = 1e-12);
        assert_relative_eq!(report.f1_score, 2.0 * 0.75 * 0.6 / 1.35, epsilon = 1e-12);
    }

    #[test]
    fn test_metrics_positive_label_choice() {
        let y_true = ["a", "b", "c"];
        let y_pred = ["a", "c", "b"];
        let report = evaluate_classification_metrics(&y_true, &y_pred, &"a").unwrap();
        assert_eq!(report.confusion_matrix.as_array(), [2, 0, 0, 1]);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_metrics_zero_denominators() {
        // no predicted positives, no actual positives
        let report = evaluate_classification_metrics(&[0, 0], &[0, 0], &1).unwrap();
        assert_eq!(report.precision, 0.0);
        assert_eq!(report.recall, 0.0);
        assert_eq!(report.f1_score, 0.0);
        assert_eq!(report.specificity, 1.0);

        let empty: [i32; 0] = [];
        let report = evaluate_classification_metrics(&empty, &empty, &1).unwrap();
        assert_eq!(report.confusion_matrix.total(), 0);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.specificity, 0.0);
    }

    #[test]
    fn test_metrics_length_mismatch() {
        assert!(matches!(
            evaluate_classification_metrics(&[1, 0], &[1], &1),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_report_display() {
        let cm = ConfusionMatrix {
            true_negatives: 1,
            false_positives: 0,
            false_negatives: 0,
            true_positives: 1,
        };
        let text = ClassificationReport::from(cm).to_string();
        assert!(text.starts_with("Confusion Matrix: [1, 0, 0, 1]"));
        assert!(text.contains("Accuracy: 1.0000"));
        assert!(text.ends_with("F1 Score: 1.0000"));
    }
}
