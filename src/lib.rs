//! A k-nearest-neighbors classifier over Minkowski distances, plus the
//! evaluation utilities used to judge it (confusion-matrix metrics,
//! calibration curve, probability histograms, ROC curve, decision surface).

pub mod error;
pub mod ml;

pub use error::{Error, Result, ValidationError};
pub use ml::classic::{minkowski_distance, most_common_label, KnnClassifier, KnnConfig};
pub use ml::evaluation::{
    calibration_curve, decision_surface, evaluate_classification_metrics, prediction_outcomes,
    probability_histograms, roc_curve, CalibrationCurve, ClassificationReport, ConfusionMatrix,
    DecisionSurface, Outcome, ProbabilityHistograms, RocCurve, ROC_THRESHOLDS,
};
