//! Model-driven ranking passes over resolved rows.
//!
//! The engine is synchronous and I/O-free: it consumes rows the fetcher
//! already populated, asks an injected [`Predictor`] for one probability per
//! candidate, writes the values back, and re-sorts each cell's candidate
//! list in place. It is designed to run multiple times with different
//! feature names; the final pass uses `"score"` to produce the definitive
//! ranking.

mod engine;
mod error;
mod model;

pub use engine::{apply_feature, FeatureVector, SCORE_FEATURE};
pub use error::{RankingError, RankingResult};
pub use model::{ModelError, ModelResult, Prediction, Predictor};
