//! Error types for ranking passes.
//!
//! Apart from model failures, every variant here is an invariant violation:
//! it means the caller built feature matrices out of sync with the candidate
//! traversal order, and must not be silently recovered.

use crate::model::ModelError;
use thiserror::Error;

/// Result type for ranking operations.
pub type RankingResult<T> = Result<T, RankingError>;

/// Errors raised by a ranking pass.
#[derive(Debug, Error)]
pub enum RankingError {
    /// The injected model failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The model returned a different number of predictions than feature
    /// vectors were submitted for a column.
    #[error("column {column}: model returned {actual} predictions for {expected} feature vectors")]
    PredictionCount {
        column: usize,
        expected: usize,
        actual: usize,
    },

    /// A candidate was encountered with no feature vector left to consume.
    #[error("column {column}: ran out of feature vectors at candidate {candidate:?}")]
    FeatureUnderrun { column: usize, candidate: String },

    /// The feature vector at the cursor belongs to a different candidate
    /// than the one being scored.
    #[error("column {column}: feature vector for {expected:?} consumed by candidate {found:?}")]
    CandidateMismatch {
        column: usize,
        expected: String,
        found: String,
    },

    /// Feature vectors were left unconsumed after walking every NE cell of
    /// the column.
    #[error("column {column}: {consumed} of {total} feature vectors consumed")]
    UnconsumedFeatures {
        column: usize,
        consumed: usize,
        total: usize,
    },
}
