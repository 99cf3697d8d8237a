//! Scoring model abstraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for model invocations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by a scoring model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model could not produce predictions.
    #[error("model prediction failed: {0}")]
    Prediction(String),
}

/// One model output: a label and its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class label.
    pub label: String,
    /// Probability of the positive class.
    pub probability: f64,
}

/// An externally supplied scoring capability.
///
/// `predict` takes a feature matrix (one fixed-order numeric vector per
/// candidate) and returns exactly one prediction per input row. The engine
/// has no knowledge of how scores are computed.
pub trait Predictor: Send + Sync {
    /// Scores a feature matrix.
    fn predict(&self, matrix: &[Vec<f64>]) -> ModelResult<Vec<Prediction>>;
}
