//! Trains on two seeded Gaussian blobs and prints the evaluation summary.

use knnlab::{
    calibration_curve, evaluate_classification_metrics, roc_curve, KnnClassifier, Result,
};
use ndarray::{concatenate, Array2, Axis};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

const SAMPLES_PER_CLASS: usize = 100;

fn blob(rng: &mut ChaCha8Rng, center: (f64, f64), n: usize) -> Array2<f64> {
    let noise = Normal::new(0.0, 1.2).unwrap();
    Array2::from_shape_fn((n, 2), |(_, j)| {
        let c = if j == 0 { center.0 } else { center.1 };
        c + noise.sample(rng)
    })
}

fn dataset(seed: u64) -> (Array2<f64>, Vec<&'static str>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let negatives = blob(&mut rng, (0.0, 0.0), SAMPLES_PER_CLASS);
    let positives = blob(&mut rng, (3.0, 3.0), SAMPLES_PER_CLASS);
    let x = concatenate(Axis(0), &[negatives.view(), positives.view()]).unwrap();
    let mut y = vec!["negative"; SAMPLES_PER_CLASS];
    y.extend(vec!["positive"; SAMPLES_PER_CLASS]);
    (x, y)
}

fn main() -> Result<()> {
    let (x_train, y_train) = dataset(42);
    let (x_test, y_test) = dataset(7);

    let mut knn = KnnClassifier::new();
    knn.fit(x_train, y_train, 5, 2)?;
    println!("{knn}");

    let y_pred = knn.predict(x_test.view())?;
    let report = evaluate_classification_metrics(&y_test, &y_pred, &"positive")?;
    println!("{report}");

    let proba = knn.predict_proba(x_test.view())?;
    let col = knn.class_index(&"positive").unwrap_or(1);
    let positive_probs = proba.column(col);

    let curve = calibration_curve(&y_test, positive_probs, &"positive", 10)?;
    println!("Calibration (bin center -> fraction positive):");
    for (center, fraction) in curve.points() {
        println!("  {center:.2} -> {fraction:.3}");
    }

    let roc = roc_curve(&y_test, positive_probs, &"positive")?;
    println!("ROC AUC (11 thresholds): {:.4}", roc.auc());
    Ok(())
}
