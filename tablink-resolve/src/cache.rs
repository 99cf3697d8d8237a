//! Per-run candidate memoization.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tablink_types::Candidate;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

/// Single-flight cache mapping cell text to a fetched candidate list.
///
/// Scoped to one resolve run; never persisted across tables or requests.
/// Concurrent callers for the same uncached text share a single in-flight
/// fetch: the first caller runs it, the rest await the same cell, and every
/// caller receives a value-identical list.
#[derive(Debug, Default)]
pub struct CandidateCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Vec<Candidate>>>>>,
}

impl CandidateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached candidates for `text`, fetching them with `fetch`
    /// if absent. At most one fetch runs per distinct text.
    pub async fn get_or_fetch<F, Fut>(&self, text: &str, fetch: F) -> Vec<Candidate>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<Candidate>>,
    {
        let slot = {
            let mut entries = self.entries.lock().await;
            entries.entry(text.to_string()).or_default().clone()
        };

        if let Some(candidates) = slot.get() {
            debug!(cell = %text, "candidate cache hit");
            return candidates.clone();
        }

        slot.get_or_init(fetch).await.clone()
    }

    /// Number of distinct texts with a completed entry.
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|slot| slot.get().is_some()).count()
    }

    /// Whether no entry has completed yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
