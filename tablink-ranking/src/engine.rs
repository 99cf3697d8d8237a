//! The ranking pass itself.

use crate::error::{RankingError, RankingResult};
use crate::model::{Prediction, Predictor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tablink_types::{Candidate, Row};
use tracing::debug;

/// Feature name that writes into `Candidate::score` instead of the feature
/// map. The pass using it produces the definitive ranking.
pub const SCORE_FEATURE: &str = "score";

/// A feature vector extracted for one candidate occurrence.
///
/// Carries the candidate identifier so the engine can verify, at every
/// consumption, that predictions land on the candidate they were extracted
/// for instead of trusting traversal order blindly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Identifier of the candidate this vector was extracted for.
    pub candidate_id: String,
    /// Fixed-order numeric features.
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Creates a feature vector for a candidate.
    pub fn new(candidate_id: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            values,
        }
    }
}

/// Per-column prediction stream consumed while walking the rows.
struct ColumnCursor<'a> {
    vectors: &'a [FeatureVector],
    predictions: Vec<Prediction>,
    next: usize,
}

/// Applies one ranking pass over the rows, in place.
///
/// For each column present in `features_by_column`, the model is invoked
/// once on the full feature matrix. The engine then walks that column's NE
/// cells in row order, candidates in list order, consuming one prediction
/// per candidate. `round(probability, 3)` is written to `score` when
/// `feature_name` is [`SCORE_FEATURE`], otherwise to
/// `features[feature_name]`, and each cell's candidates are re-sorted
/// descending by the value just written (ties break by ascending candidate
/// id).
///
/// Any disagreement between feature vectors, predictions, and candidate
/// traversal is a fatal invariant violation returned as [`RankingError`].
pub fn apply_feature(
    rows: &mut [Row],
    features_by_column: &BTreeMap<usize, Vec<FeatureVector>>,
    feature_name: &str,
    model: &dyn Predictor,
) -> RankingResult<()> {
    let mut cursors: BTreeMap<usize, ColumnCursor<'_>> = BTreeMap::new();

    for (&column, vectors) in features_by_column {
        let predictions = if vectors.is_empty() {
            Vec::new()
        } else {
            let matrix: Vec<Vec<f64>> = vectors.iter().map(|v| v.values.clone()).collect();
            model.predict(&matrix)?
        };
        if predictions.len() != vectors.len() {
            return Err(RankingError::PredictionCount {
                column,
                expected: vectors.len(),
                actual: predictions.len(),
            });
        }
        debug!(column, candidates = vectors.len(), feature = feature_name, "scored column");
        cursors.insert(
            column,
            ColumnCursor {
                vectors,
                predictions,
                next: 0,
            },
        );
    }

    for row in rows.iter_mut() {
        for cell in row.ne_cells_mut() {
            let Some(cursor) = cursors.get_mut(&cell.column) else {
                continue;
            };
            for candidate in &mut cell.candidates {
                if cursor.next >= cursor.vectors.len() {
                    return Err(RankingError::FeatureUnderrun {
                        column: cell.column,
                        candidate: candidate.id.clone(),
                    });
                }
                let vector = &cursor.vectors[cursor.next];
                if vector.candidate_id != candidate.id {
                    return Err(RankingError::CandidateMismatch {
                        column: cell.column,
                        expected: vector.candidate_id.clone(),
                        found: candidate.id.clone(),
                    });
                }
                let value = round3(cursor.predictions[cursor.next].probability);
                cursor.next += 1;

                if feature_name == SCORE_FEATURE {
                    candidate.score = Some(value);
                } else {
                    candidate
                        .features
                        .insert(feature_name.to_string(), value);
                }
            }
            sort_candidates(&mut cell.candidates, feature_name);
        }
    }

    for (&column, cursor) in &cursors {
        if cursor.next != cursor.predictions.len() {
            return Err(RankingError::UnconsumedFeatures {
                column,
                consumed: cursor.next,
                total: cursor.predictions.len(),
            });
        }
    }

    Ok(())
}

/// Sorts candidates descending by the value just written; equal values fall
/// back to ascending candidate id so the order is deterministic.
fn sort_candidates(candidates: &mut [Candidate], feature_name: &str) {
    candidates.sort_by(|a, b| {
        let va = ranking_value(a, feature_name);
        let vb = ranking_value(b, feature_name);
        vb.partial_cmp(&va)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn ranking_value(candidate: &Candidate, feature_name: &str) -> f64 {
    if feature_name == SCORE_FEATURE {
        candidate.score.unwrap_or(f64::NEG_INFINITY)
    } else {
        candidate
            .feature(feature_name)
            .unwrap_or(f64::NEG_INFINITY)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
