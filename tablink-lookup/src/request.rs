//! Lookup request parameters.

use serde::{Deserialize, Serialize};

/// Default cap on candidates returned per lookup call.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 100;

/// Parameters for one candidate lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRequest {
    /// The cell text to resolve.
    pub query: String,
    /// Maximum number of candidates to return.
    pub limit: usize,
    /// Pre-known entity identifiers to bias/validate retrieval.
    pub ids: Vec<String>,
    /// Space-separated knowledge-graph type hints.
    pub types: Option<String>,
    /// Space-separated NER type hints.
    pub ner_types: Option<String>,
    /// Enable fuzzy matching.
    pub fuzzy: bool,
    /// Enable n-gram matching.
    pub ngrams: bool,
}

impl LookupRequest {
    /// Creates a request for a query text with default options.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_CANDIDATE_LIMIT,
            ids: Vec::new(),
            types: None,
            ner_types: None,
            fuzzy: false,
            ngrams: false,
        }
    }

    /// Sets the candidate limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets pre-known entity identifiers.
    #[must_use]
    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = ids;
        self
    }

    /// Sets knowledge-graph type hints.
    #[must_use]
    pub fn with_types(mut self, types: impl Into<String>) -> Self {
        self.types = Some(types.into());
        self
    }

    /// Sets NER type hints.
    #[must_use]
    pub fn with_ner_types(mut self, ner_types: impl Into<String>) -> Self {
        self.ner_types = Some(ner_types.into());
        self
    }

    /// Enables or disables fuzzy matching.
    #[must_use]
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Enables or disables n-gram matching.
    #[must_use]
    pub fn with_ngrams(mut self, ngrams: bool) -> Self {
        self.ngrams = ngrams;
        self
    }
}
