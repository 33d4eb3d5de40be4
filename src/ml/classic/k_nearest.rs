//! k-nearest-neighbors classification over Minkowski distances.
//!
//! The classifier is a lazy learner: [`KnnClassifier::fit`] validates and
//! stores the training set, and every prediction runs the same pipeline
//! per query row:
//!
//! ```text
//! compute_distances()        Minkowski distance to each training row
//!   └─ get_k_nearest_neighbors()   stable ascending sort, first k
//!        ├─ most_common_label()    hard label (predict)
//!        └─ class proportions      soft label (predict_proba)
//! ```
//!
//! # Example
//!
//! ```
//! use knnlab::KnnClassifier;
//! use ndarray::array;
//!
//! let features = array![[0.0, 0.0], [0.0, 1.0], [5.0, 5.0], [5.0, 6.0]];
//! let labels = vec!["A", "A", "B", "B"];
//!
//! let mut knn = KnnClassifier::new();
//! knn.fit(features, labels, 1, 2).unwrap();
//!
//! let queries = array![[0.0, 0.5], [5.0, 5.5]];
//! assert_eq!(knn.predict(queries.view()).unwrap(), vec!["A", "B"]);
//! assert_eq!(knn.to_string(), "kNN model (k=1, p=2)");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::error::{Error, Result, ValidationError};

/// Hyperparameters of a kNN model.
///
/// # Example
///
/// ```
/// use knnlab::KnnConfig;
///
/// let config = KnnConfig::new(3).with_p(1);
/// assert_eq!(config.k(), 3);
/// assert_eq!(config.p(), 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnnConfig {
    /// Number of neighbors consulted per query.
    k: usize,
    /// Order of the Minkowski distance (1 = Manhattan, 2 = Euclidean).
    p: u32,
}

impl KnnConfig {
    /// Creates a config with the given `k` and a Euclidean distance (`p = 2`).
    pub fn new(k: usize) -> Self {
        Self { k, p: 2 }
    }

    /// Sets the order of the Minkowski distance.
    pub fn with_p(mut self, p: u32) -> Self {
        self.p = p;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    /// Checks that both `k` and `p` are positive. `k` is checked first.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.k == 0 {
            return Err(ValidationError::InvalidK { k: self.k });
        }
        if self.p == 0 {
            return Err(ValidationError::InvalidP { p: self.p });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    /// `k = 5`, `p = 2`.
    fn default() -> Self {
        Self::new(5)
    }
}

/// Everything a successful fit stores. Read-only until the next fit.
#[derive(Debug, Clone)]
struct Fitted<L> {
    features: Array2<f64>,
    labels: Vec<L>,
    /// Sorted, deduplicated `labels`.
    classes: Vec<L>,
    config: KnnConfig,
}

impl<L: Ord + Clone> Fitted<L> {
    fn distances(&self, point: ArrayView1<f64>) -> Array1<f64> {
        debug_assert_eq!(point.len(), self.features.ncols());
        self.features
            .rows()
            .into_iter()
            .map(|row| minkowski_distance(row, point, self.config.p))
            .collect()
    }

    fn neighbors(&self, point: ArrayView1<f64>) -> Vec<usize> {
        nearest_indices(self.distances(point).view(), self.config.k)
    }

    fn vote(&self, point: ArrayView1<f64>) -> Result<L> {
        let neighbors = self.neighbors(point);
        majority(neighbors.iter().map(|&i| &self.labels[i]))
            .cloned()
            .ok_or(Error::EmptyTrainingSet)
    }

    /// Neighbor-label frequencies in `classes` order. Divides by the number of
    /// neighbors actually consulted so a row always sums to one.
    fn proportions(&self, point: ArrayView1<f64>) -> Array1<f64> {
        let neighbors = self.neighbors(point);
        let mut counts = Array1::<f64>::zeros(self.classes.len());
        for &i in &neighbors {
            if let Ok(col) = self.classes.binary_search(&self.labels[i]) {
                counts[col] += 1.0;
            }
        }
        let consulted = neighbors.len() as f64;
        counts.mapv_inplace(|c| c / consulted);
        counts
    }
}

/// A k-nearest-neighbors classifier.
///
/// Starts unfitted; [`fit`](Self::fit) stores the training set together
/// with `k` and `p`. Prediction methods take `&self` and never mutate the
/// model, so a fitted classifier can be shared across threads for reading.
///
/// # Type Parameters
/// - `L`: the label type. Must be `Ord` so classes have a stable ascending
///   order and vote ties resolve to the smallest label.
#[derive(Debug, Clone)]
pub struct KnnClassifier<L> {
    state: Option<Fitted<L>>,
}

impl<L> Default for KnnClassifier<L> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<L: Ord + Clone> KnnClassifier<L> {
    /// Creates an unfitted classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits the model on `features` (one sample per row) and `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] (wrapped in [`Error::Validation`]) if the
    /// row count differs from the label count, or if `k` or `p` is zero.
    /// On error the previous fit, if any, is kept unchanged.
    pub fn fit(&mut self, features: Array2<f64>, labels: Vec<L>, k: usize, p: u32) -> Result<()> {
        self.fit_with_config(features, labels, KnnConfig::new(k).with_p(p))
    }

    /// Same as [`fit`](Self::fit), taking the hyperparameters as a [`KnnConfig`].
    pub fn fit_with_config(
        &mut self,
        features: Array2<f64>,
        labels: Vec<L>,
        config: KnnConfig,
    ) -> Result<()> {
        if features.nrows() != labels.len() {
            return Err(ValidationError::LengthMismatch {
                samples: features.nrows(),
                labels: labels.len(),
            }
            .into());
        }
        config.validate()?;

        let mut classes = labels.clone();
        classes.sort();
        classes.dedup();

        debug!(
            "fitted kNN model on {} samples x {} features, {} classes (k={}, p={})",
            features.nrows(),
            features.ncols(),
            classes.len(),
            config.k,
            config.p
        );

        self.state = Some(Fitted {
            features,
            labels,
            classes,
            config,
        });
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fitted hyperparameters, or `None` before the first fit.
    pub fn config(&self) -> Option<KnnConfig> {
        self.state.as_ref().map(|s| s.config)
    }

    pub fn k(&self) -> Option<usize> {
        self.config().map(|c| c.k)
    }

    pub fn p(&self) -> Option<u32> {
        self.config().map(|c| c.p)
    }

    /// Distinct training labels in ascending order. Column `j` of
    /// [`predict_proba`](Self::predict_proba) belongs to `classes()[j]`.
    pub fn classes(&self) -> Option<&[L]> {
        self.state.as_ref().map(|s| s.classes.as_slice())
    }

    /// Column of `label` in the probability matrix.
    pub fn class_index(&self, label: &L) -> Option<usize> {
        self.classes()?.binary_search(label).ok()
    }

    /// Number of features per training sample.
    pub fn n_features(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.features.ncols())
    }

    /// Minkowski distances from `point` to every training sample, in training order.
    ///
    /// `point` is expected to have the training dimensionality; this is only
    /// debug-asserted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] before the first fit.
    pub fn compute_distances(&self, point: ArrayView1<f64>) -> Result<Array1<f64>> {
        Ok(self.fitted()?.distances(point))
    }

    /// Indices of the `k` smallest entries of `distances`, nearest first.
    ///
    /// Equal distances keep their original order, so the lower index wins.
    /// Returns every index when `k` exceeds the number of distances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] before the first fit.
    pub fn get_k_nearest_neighbors(&self, distances: ArrayView1<f64>) -> Result<Vec<usize>> {
        Ok(nearest_indices(distances, self.fitted()?.config.k))
    }

    /// Predicts one label per row of `x` by majority vote of the k nearest
    /// training samples.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFitted`] before the first fit.
    /// - [`Error::DimensionMismatch`] if `x` has a different column count than
    ///   the training set.
    /// - [`Error::EmptyTrainingSet`] if the model was fitted on zero samples.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<L>> {
        let state = self.ready_for(&x)?;
        trace!("predicting labels for {} queries", x.nrows());
        x.rows().into_iter().map(|row| state.vote(row)).collect()
    }

    /// Class probabilities per row of `x`: the share of the k nearest
    /// neighbors carrying each class, columns ordered as [`classes`](Self::classes).
    ///
    /// # Errors
    ///
    /// Same as [`predict`](Self::predict).
    pub fn predict_proba(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let state = self.ready_for(&x)?;
        trace!("predicting probabilities for {} queries", x.nrows());
        let mut proba = Array2::zeros((x.nrows(), state.classes.len()));
        for (row, mut out) in x.rows().into_iter().zip(proba.rows_mut()) {
            out.assign(&state.proportions(row));
        }
        Ok(proba)
    }

    fn fitted(&self) -> Result<&Fitted<L>> {
        self.state.as_ref().ok_or(Error::NotFitted)
    }

    fn ready_for(&self, x: &ArrayView2<f64>) -> Result<&Fitted<L>> {
        let state = self.fitted()?;
        if state.labels.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        if x.ncols() != state.features.ncols() {
            return Err(Error::DimensionMismatch {
                expected: state.features.ncols(),
                found: x.ncols(),
            });
        }
        Ok(state)
    }
}

impl<L: Ord + Clone + Send + Sync> KnnClassifier<L> {
    /// [`predict`](Self::predict) with the query rows spread over the rayon pool.
    pub fn predict_par(&self, x: ArrayView2<f64>) -> Result<Vec<L>> {
        let state = self.ready_for(&x)?;
        let rows: Vec<ArrayView1<f64>> = x.rows().into_iter().collect();
        rows.into_par_iter().map(|row| state.vote(row)).collect()
    }

    /// [`predict_proba`](Self::predict_proba) with the query rows spread over the rayon pool.
    pub fn predict_proba_par(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let state = self.ready_for(&x)?;
        let rows: Vec<ArrayView1<f64>> = x.rows().into_iter().collect();
        let computed: Vec<Array1<f64>> = rows
            .into_par_iter()
            .map(|row| state.proportions(row))
            .collect();

        let mut proba = Array2::zeros((x.nrows(), state.classes.len()));
        for (mut out, row) in proba.rows_mut().into_iter().zip(computed.iter()) {
            out.assign(row);
        }
        Ok(proba)
    }
}

impl<L> fmt::Display for KnnClassifier<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Some(s) => write!(f, "kNN model (k={}, p={})", s.config.k, s.config.p),
            None => write!(f, "kNN model (k=None, p=None)"),
        }
    }
}

/// Minkowski distance of order `p` between two equally long vectors:
/// `(Σ|a_i - b_i|^p)^(1/p)`.
///
/// `p = 1` and `p = 2` take exact Manhattan / Euclidean paths.
///
/// # Example
///
/// ```
/// use knnlab::minkowski_distance;
/// use ndarray::array;
///
/// let d = minkowski_distance(array![0.0, 0.0].view(), array![3.0, 4.0].view(), 2);
/// assert_eq!(d, 5.0);
/// ```
pub fn minkowski_distance(a: ArrayView1<f64>, b: ArrayView1<f64>, p: u32) -> f64 {
    debug_assert!(p > 0, "Minkowski order must be positive");
    debug_assert_eq!(a.len(), b.len());
    let diffs = a.iter().zip(b.iter()).map(|(&x, &y)| (x - y).abs());
    match p {
        1 => diffs.sum(),
        2 => diffs.map(|d| d * d).sum::<f64>().sqrt(),
        _ => {
            let p = f64::from(p);
            diffs.map(|d| d.powf(p)).sum::<f64>().powf(p.recip())
        }
    }
}

/// Returns the most frequent label, or `None` for an empty slice.
///
/// Ties go to the smallest label under `Ord`.
///
/// ```
/// use knnlab::most_common_label;
///
/// assert_eq!(most_common_label(&[1, 1, 2]), Some(1));
/// assert_eq!(most_common_label(&[2, 2, 1, 1]), Some(1));
/// ```
pub fn most_common_label<L: Ord + Clone>(labels: &[L]) -> Option<L> {
    majority(labels.iter()).cloned()
}

fn majority<'a, L: Ord + 'a>(labels: impl IntoIterator<Item = &'a L>) -> Option<&'a L> {
    let mut counts = BTreeMap::<&L, usize>::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    // Ascending keys with a strict `>` keep the smallest label among ties.
    let mut best: Option<(&L, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

fn nearest_indices(distances: ArrayView1<f64>, k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    // Stable sort; NaN orders after every number.
    order.sort_by(|&a, &b| {
        let (da, db) = (distances[a], distances[b]);
        da.partial_cmp(&db)
            .unwrap_or_else(|| da.is_nan().cmp(&db.is_nan()))
    });
    order.truncate(k);
    order
}
