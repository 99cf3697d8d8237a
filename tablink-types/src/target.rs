//! Column classification targets.
//!
//! A [`Target`] partitions a table's column indices into three disjoint
//! classes: named-entity columns (resolved against the knowledge graph),
//! literal columns (dates, numbers, plain strings), and untagged columns
//! (everything else, implicitly).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Classification of a single column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnTag {
    /// Column contains named entities requiring resolution.
    NamedEntity,
    /// Column contains literal values, exempt from lookup.
    Literal,
    /// Column is untagged.
    NoTag,
}

/// Errors produced by target validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    /// A column index appears in both the NE and LIT sets.
    #[error("column {column} is classified as both named-entity and literal")]
    Overlap { column: usize },

    /// A classified column index is outside the table header.
    #[error("column {column} is out of range for a table with {width} columns")]
    OutOfRange { column: usize, width: usize },

    /// The subject column is not a named-entity column.
    #[error("subject column {column} is not a named-entity column")]
    SubjectNotNamedEntity { column: usize },
}

/// Disjoint classification of a table's column indices.
///
/// Every index in `0..width` belongs to exactly one class; indices absent
/// from both the NE and LIT sets are NOTAG. NE columns may carry optional
/// knowledge-graph type hints (space-separated identifiers) used to bias
/// lookup; LIT columns carry a datatype label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// NE column index → optional type hints.
    #[serde(rename = "NE")]
    ne: BTreeMap<usize, Option<String>>,
    /// LIT column index → datatype label.
    #[serde(rename = "LIT")]
    lit: BTreeMap<usize, String>,
    /// The subject NE column, if known.
    #[serde(rename = "SUBJ", default)]
    subject: Option<usize>,
}

impl Target {
    /// Creates an empty target (every column NOTAG).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a column as named-entity.
    #[must_use]
    pub fn with_ne_column(mut self, column: usize) -> Self {
        self.ne.insert(column, None);
        self
    }

    /// Marks a column as named-entity with knowledge-graph type hints.
    #[must_use]
    pub fn with_ne_column_typed(mut self, column: usize, types: impl Into<String>) -> Self {
        self.ne.insert(column, Some(types.into()));
        self
    }

    /// Marks a column as literal with a datatype label.
    #[must_use]
    pub fn with_lit_column(mut self, column: usize, datatype: impl Into<String>) -> Self {
        self.lit.insert(column, datatype.into());
        self
    }

    /// Marks the subject column.
    #[must_use]
    pub fn with_subject(mut self, column: usize) -> Self {
        self.subject = Some(column);
        self
    }

    /// Classifies a column index. Total over any index; indices in neither
    /// set are NOTAG.
    #[must_use]
    pub fn classify(&self, column: usize) -> ColumnTag {
        if self.ne.contains_key(&column) {
            ColumnTag::NamedEntity
        } else if self.lit.contains_key(&column) {
            ColumnTag::Literal
        } else {
            ColumnTag::NoTag
        }
    }

    /// Returns the type hints for an NE column, if any were set.
    #[must_use]
    pub fn type_hints(&self, column: usize) -> Option<&str> {
        self.ne.get(&column).and_then(|hints| hints.as_deref())
    }

    /// Returns the datatype label for a LIT column.
    #[must_use]
    pub fn lit_datatype(&self, column: usize) -> Option<&str> {
        self.lit.get(&column).map(String::as_str)
    }

    /// Returns whether a column is the subject column.
    #[must_use]
    pub fn is_subject(&self, column: usize) -> bool {
        self.subject == Some(column)
    }

    /// Iterates over the NE column indices in ascending order.
    pub fn ne_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.ne.keys().copied()
    }

    /// Validates the target against a table width.
    ///
    /// Rejects NE/LIT overlap, out-of-range indices, and a subject column
    /// that is not a named-entity column. Called before any lookup work so
    /// a malformed target aborts the run up front.
    pub fn validate(&self, width: usize) -> Result<(), TargetError> {
        for (&column, _) in &self.ne {
            if self.lit.contains_key(&column) {
                return Err(TargetError::Overlap { column });
            }
            if column >= width {
                return Err(TargetError::OutOfRange { column, width });
            }
        }
        for (&column, _) in &self.lit {
            if column >= width {
                return Err(TargetError::OutOfRange { column, width });
            }
        }
        if let Some(column) = self.subject {
            if !self.ne.contains_key(&column) {
                return Err(TargetError::SubjectNotNamedEntity { column });
            }
        }
        Ok(())
    }
}
