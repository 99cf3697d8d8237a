//! Candidate entities proposed for a cell's text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to a knowledge-graph type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Type identifier in the knowledge graph.
    pub id: String,
    /// Human-readable type name.
    pub name: String,
}

/// A knowledge-graph entity proposed as a possible referent for a cell.
///
/// Fixed fields are enumerated explicitly; only `features` is an open map,
/// keyed by feature name, because ranking passes genuinely add signals at
/// runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Entity identifier in the knowledge graph.
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
    /// Definitive relevance score, written by the final ranking pass.
    #[serde(default)]
    pub score: Option<f64>,
    /// Named relevance features, written by intermediate ranking passes.
    #[serde(default)]
    pub features: BTreeMap<String, f64>,
}

impl Candidate {
    /// Creates a candidate with just an identifier and a label.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            types: Vec::new(),
            description: String::new(),
            match_flag: false,
            score: None,
            features: BTreeMap::new(),
        }
    }

    /// Returns a named feature value, if present.
    #[must_use]
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }
}
