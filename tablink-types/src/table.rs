//! Raw table input shapes, as received from the ingestion layer.

use serde::{Deserialize, Serialize};

/// A table submitted for entity resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Dataset the table belongs to.
    #[serde(rename = "datasetName")]
    pub dataset_name: String,
    /// Table name within the dataset.
    #[serde(rename = "tableName")]
    pub table_name: String,
    /// Ordered column headers.
    pub header: Vec<String>,
    /// Table rows, in input order.
    pub rows: Vec<RowInput>,
}

impl Table {
    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// One raw row of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowInput {
    /// Row identifier, unique within the table.
    #[serde(rename = "idRow")]
    pub id_row: i64,
    /// Cell texts, one per column, in column order.
    pub data: Vec<String>,
    /// Optional pre-known external identifiers, one slot per column.
    /// `ids[i]` biases and validates the lookup for column `i`.
    #[serde(default)]
    pub ids: Option<Vec<Option<String>>>,
}

impl RowInput {
    /// Returns the pre-known external identifier for a column, if any.
    #[must_use]
    pub fn id_for(&self, column: usize) -> Option<&str> {
        self.ids
            .as_ref()
            .and_then(|ids| ids.get(column))
            .and_then(|id| id.as_deref())
    }
}
