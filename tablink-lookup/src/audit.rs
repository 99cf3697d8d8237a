//! Append-only audit sink for per-cell lookup failures.
//!
//! A failed cell degrades to an empty candidate list, which is externally
//! indistinguishable from "no matches found" — the audit sink is the only
//! place the failure is visible.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

/// One recorded lookup failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Dataset of the affected table.
    #[serde(rename = "datasetName")]
    pub dataset_name: String,
    /// Affected table.
    #[serde(rename = "tableName")]
    pub table_name: String,
    /// Affected row.
    #[serde(rename = "idRow")]
    pub id_row: i64,
    /// The cell text that failed to resolve.
    pub cell: String,
    /// Type hints of the cell's column, if any.
    pub types: Option<String>,
    /// Top-level error message.
    pub error: String,
    /// Rendered error cause chain.
    #[serde(rename = "stackTrace")]
    pub stack_trace: String,
    /// Raw provider response, if one was received.
    pub result: Option<serde_json::Value>,
}

/// Append-only failure log.
///
/// Appending is best-effort: the core never fails a resolution because the
/// audit trail could not be written.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Appends a failure record.
    async fn append(&self, record: AuditRecord);
}

/// In-memory audit sink, queryable after the fact.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded failures.
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().await.clone()
    }

    /// Number of recorded failures.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether no failures were recorded.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, record: AuditRecord) {
        self.records.lock().await.push(record);
    }
}

/// Audit sink appending line-delimited JSON to a file.
pub struct JsonlAuditSink {
    file: Mutex<tokio::fs::File>,
}

impl JsonlAuditSink {
    /// Opens (or creates) the log file in append mode.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    async fn append(&self, record: AuditRecord) {
        let mut line = match serde_json::to_vec(&record) {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to serialize audit record");
                return;
            }
        };
        line.push(b'\n');

        let mut file = self.file.lock().await;
        if let Err(err) = file.write_all(&line).await {
            warn!(error = %err, "failed to append audit record");
        }
    }
}
