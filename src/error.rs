//! Errors
//!
//! Custom error types used throughout the `rusty-trees` crate.
use thiserror::Error;

/// Errors surfaced by model construction, training and prediction.
///
/// Every error is detected eagerly: configuration problems at construction
/// time, data problems at the start of `fit` or `predict`. A failed call
/// leaves the model exactly as it was before.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    /// A hyperparameter was rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Features and labels disagree on their dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
    /// `predict` was called before a successful `fit`.
    #[error("The tree wasn't built yet.")]
    NotTrained,
    /// `fit` was called on a dataset with zero rows.
    #[error("The dataset contains no samples.")]
    EmptyDataset,
}
