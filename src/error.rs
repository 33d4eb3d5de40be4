//! Error types shared by the classifier and the evaluation utilities.

/// Rejected arguments to [`KnnClassifier::fit`](crate::KnnClassifier::fit).
///
/// A failed fit never touches the classifier's previous state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The feature matrix and the label vector disagree on the sample count.
    #[error("length of X ({samples}) and y ({labels}) must be equal")]
    LengthMismatch {
        /// Number of rows in the feature matrix.
        samples: usize,
        /// Number of labels.
        labels: usize,
    },

    /// `k` was not a positive integer.
    #[error("k must be a positive integer, got {k}")]
    InvalidK {
        /// The rejected value.
        k: usize,
    },

    /// `p` was not a positive integer.
    #[error("p must be a positive integer, got {p}")]
    InvalidP {
        /// The rejected value.
        p: u32,
    },
}

/// Crate-wide error type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Prediction was requested before a successful fit.
    #[error("model is not fitted")]
    NotFitted,

    /// A query batch has a different number of features than the training set.
    #[error("query has {found} features, model was fitted on {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The model was fitted on zero samples, so no neighbor exists.
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
