//! Evaluation utilities driven by a fitted classifier.

use approx::assert_relative_eq;
use knnlab::{
    calibration_curve, decision_surface, evaluate_classification_metrics, prediction_outcomes,
    probability_histograms, roc_curve, KnnClassifier, Outcome,
};
use ndarray::{array, Array2};

fn fitted() -> (KnnClassifier<&'static str>, Array2<f64>, Vec<&'static str>) {
    let x = array![
        [0.0, 0.0],
        [0.5, 0.2],
        [1.0, 0.8],
        [0.2, 1.1],
        [4.0, 4.0],
        [4.5, 3.8],
        [3.9, 4.6],
        [1.2, 1.0]
    ];
    let y = vec!["neg", "neg", "neg", "neg", "pos", "pos", "pos", "pos"];
    let mut knn = KnnClassifier::new();
    knn.fit(x.clone(), y.clone(), 3, 2).unwrap();
    (knn, x, y)
}

#[test]
fn metrics_from_predictions() {
    let (knn, x, y) = fitted();
    let y_pred = knn.predict(x.view()).unwrap();
    let report = evaluate_classification_metrics(&y, &y_pred, &"pos").unwrap();

    let cm = report.confusion_matrix;
    assert_eq!(cm.total(), y.len());
    // the lone "pos" sample inside the negative cluster is outvoted
    assert_eq!(cm.as_array(), [4, 0, 1, 3]);
    assert_relative_eq!(report.accuracy, 7.0 / 8.0, epsilon = 1e-12);
    assert_relative_eq!(report.precision, 1.0, epsilon = 1e-12);
    assert_relative_eq!(report.recall, 0.75, epsilon = 1e-12);
    assert_relative_eq!(report.specificity, 1.0, epsilon = 1e-12);

    let outcomes = prediction_outcomes(&y, &y_pred, &"pos").unwrap();
    assert_eq!(outcomes[7], Outcome::FalseNegative);
}

#[test]
fn curves_from_positive_column() {
    let (knn, x, y) = fitted();
    let proba = knn.predict_proba(x.view()).unwrap();
    let col = knn.class_index(&"pos").unwrap();
    let pos_probs = proba.column(col);

    let curve = calibration_curve(&y, pos_probs, &"pos", 10).unwrap();
    assert_eq!(curve.counts.iter().sum::<usize>(), y.len());

    let hist = probability_histograms(&y, pos_probs, &"pos", 10).unwrap();
    assert_eq!(hist.positive.len(), 4);
    assert_eq!(hist.negative.len(), 4);
    assert!(hist.positive.iter().sum::<f64>() > hist.negative.iter().sum::<f64>());

    let roc = roc_curve(&y, pos_probs, &"pos").unwrap();
    assert_eq!((roc.fpr[0], roc.tpr[0]), (1.0, 1.0));
    assert!(roc.auc() > 0.8);
}

#[test]
fn surface_over_training_range() {
    let (knn, x, _) = fitted();
    let surface = decision_surface(&knn, x.view(), &"pos", 20).unwrap();
    assert_eq!(surface.probabilities.shape(), &[20, 20]);
    assert_relative_eq!(surface.xs[0], -1.0);
    assert_relative_eq!(surface.xs[19], 5.5, epsilon = 1e-12);
    assert!(surface.probabilities[[0, 0]] < surface.probabilities[[19, 19]]);
}
