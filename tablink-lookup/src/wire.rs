//! Provider wire shapes for candidate lookup responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tablink_types::{Candidate, TypeRef};

/// A successful lookup response: query text → candidates.
pub type LookupResponse = HashMap<String, Vec<CandidateWire>>;

/// Retrieval features computed provider-side for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WireFeatures {
    /// Edit-distance score between query and label.
    #[serde(default)]
    pub ed_score: f64,
    /// Token Jaccard score between query and label.
    #[serde(default)]
    pub jaccard_score: f64,
    /// Entity popularity in the knowledge graph.
    #[serde(default)]
    pub popularity: f64,
}

/// One candidate entity as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWire {
    /// Entity identifier.
    pub id: String,
    /// Entity label.
    pub name: String,
    /// Types the entity belongs to.
    #[serde(default)]
    pub types: Vec<TypeRef>,
    /// Entity description.
    #[serde(default)]
    pub description: String,
    /// Whether the provider considered this an exact match.
    #[serde(rename = "match", default)]
    pub match_flag: bool,
    /// Provider-side relevance score, if computed.
    #[serde(default)]
    pub score: Option<f64>,
    /// Provider-side retrieval features.
    #[serde(default)]
    pub features: WireFeatures,
}

impl From<CandidateWire> for Candidate {
    /// Builds a model candidate, seeding its feature map with the three
    /// provider-side retrieval features.
    fn from(wire: CandidateWire) -> Self {
        let mut candidate = Candidate::new(wire.id, wire.name);
        candidate.types = wire.types;
        candidate.description = wire.description;
        candidate.match_flag = wire.match_flag;
        candidate.score = wire.score;
        candidate
            .features
            .insert("ed_score".to_string(), wire.features.ed_score);
        candidate
            .features
            .insert("jaccard_score".to_string(), wire.features.jaccard_score);
        candidate
            .features
            .insert("popularity".to_string(), wire.features.popularity);
        candidate
    }
}
