pub mod k_nearest;

// Re-export public types and functions
pub use k_nearest::{minkowski_distance, most_common_label, KnnClassifier, KnnConfig};
