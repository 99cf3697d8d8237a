//! Built rows and their tagged cells.
//!
//! A [`Row`] owns exactly one [`Cell`] per column, in column order. The
//! variant is fixed when the row is built and carries only the fields that
//! class of cell actually has.

use crate::Candidate;
use serde::{Deserialize, Serialize};

/// A named-entity cell, subject to candidate retrieval and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeCell {
    /// The cell text.
    pub text: String,
    /// Whitespace-joined text of the whole row, for context features.
    pub row_context: String,
    /// Column index.
    pub column: usize,
    /// Whether this cell sits in the table's subject column.
    pub is_subject: bool,
    /// Pre-known external identifier, if the input supplied one.
    pub qid: Option<String>,
    /// Ranked candidate entities. Mutated in place by ranking passes.
    pub candidates: Vec<Candidate>,
}

/// A literal cell, exempt from lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LitCell {
    /// The cell text.
    pub text: String,
    /// Column index.
    pub column: usize,
    /// Datatype label from the column classification.
    pub datatype: String,
}

/// An untagged cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoTagCell {
    /// The cell text.
    pub text: String,
    /// Column index.
    pub column: usize,
}

/// A classified table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Cell {
    /// Named-entity cell with candidates.
    #[serde(rename = "ne")]
    NamedEntity(NeCell),
    /// Literal cell.
    #[serde(rename = "lit")]
    Literal(LitCell),
    /// Untagged cell.
    #[serde(rename = "notag")]
    NoTag(NoTagCell),
}

impl Cell {
    /// The cell text, regardless of variant.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Cell::NamedEntity(cell) => &cell.text,
            Cell::Literal(cell) => &cell.text,
            Cell::NoTag(cell) => &cell.text,
        }
    }

    /// The column index, regardless of variant.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Cell::NamedEntity(cell) => cell.column,
            Cell::Literal(cell) => cell.column,
            Cell::NoTag(cell) => cell.column,
        }
    }

    /// Returns the NE cell, if this is one.
    #[must_use]
    pub fn as_named_entity(&self) -> Option<&NeCell> {
        match self {
            Cell::NamedEntity(cell) => Some(cell),
            _ => None,
        }
    }

    /// Mutable access to the NE cell, if this is one.
    pub fn as_named_entity_mut(&mut self) -> Option<&mut NeCell> {
        match self {
            Cell::NamedEntity(cell) => Some(cell),
            _ => None,
        }
    }
}

/// A built table row: the single mutable artifact of a resolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Row identifier from the input.
    pub id_row: i64,
    /// One cell per column, in column order.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Iterates over the row's named-entity cells.
    pub fn ne_cells(&self) -> impl Iterator<Item = &NeCell> {
        self.cells.iter().filter_map(Cell::as_named_entity)
    }

    /// Iterates mutably over the row's named-entity cells.
    pub fn ne_cells_mut(&mut self) -> impl Iterator<Item = &mut NeCell> {
        self.cells.iter_mut().filter_map(Cell::as_named_entity_mut)
    }
}
