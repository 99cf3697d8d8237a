//! Table-level candidate resolution.

use crate::cache::CandidateCache;
use crate::error::ResolveResult;
use futures::future;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tablink_lookup::{AuditRecord, AuditSink, LookupClient, LookupError, LookupRequest};
use tablink_types::{
    Candidate, Cell, ColumnTag, LitCell, NeCell, NoTagCell, Row, RowInput, Table, Target,
};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Retry budget and backoff schedule for provider calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts per cell, including the first.
    pub attempts: u32,
    /// Backoff before the first retry.
    pub initial_backoff: Duration,
    /// Backoff ceiling.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_backoff: Duration::from_secs(3),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Backoff before the retry following attempt number `attempt`
    /// (0-based): doubles per attempt, capped at `max_backoff`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Configuration for a resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Cap on candidates kept per cell.
    pub candidate_limit: usize,
    /// Cap on simultaneously in-flight provider calls.
    pub max_concurrent_lookups: usize,
    /// Enable fuzzy matching in lookups.
    pub fuzzy: bool,
    /// Enable n-gram matching in lookups.
    pub ngrams: bool,
    /// Retry budget and backoff schedule.
    pub retry: RetryPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 100,
            max_concurrent_lookups: 50,
            fuzzy: false,
            ngrams: false,
            retry: RetryPolicy::default(),
        }
    }
}

/// Resolves a table's NE cells to ranked candidate lists.
pub struct Resolver {
    client: Arc<dyn LookupClient>,
    audit: Arc<dyn AuditSink>,
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver with the default configuration.
    pub fn new(client: Arc<dyn LookupClient>, audit: Arc<dyn AuditSink>) -> Self {
        Self::with_config(client, audit, ResolverConfig::default())
    }

    /// Creates a resolver with a custom configuration.
    pub fn with_config(
        client: Arc<dyn LookupClient>,
        audit: Arc<dyn AuditSink>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            client,
            audit,
            config,
        }
    }

    /// Returns the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Builds one [`Row`] per input row, in input order, populating NE cells
    /// with candidate lists.
    ///
    /// Provider failures never abort the run: an affected cell ends up with
    /// an empty candidate list and one audit record. The only error this
    /// returns itself is a malformed target, rejected before any lookup.
    pub async fn resolve(&self, table: &Table, target: &Target) -> ResolveResult<Vec<Row>> {
        target.validate(table.width())?;

        let cache = CandidateCache::new();
        let limiter = Semaphore::new(self.config.max_concurrent_lookups);

        info!(
            dataset = %table.dataset_name,
            table = %table.table_name,
            rows = table.rows.len(),
            "resolving table"
        );

        let rows = future::join_all(
            table
                .rows
                .iter()
                .map(|row| self.build_row(table, target, row, &cache, &limiter)),
        )
        .await;

        debug!(cached_texts = cache.len().await, "resolve finished");
        Ok(rows)
    }

    /// Builds one row, fetching candidates for each NE cell.
    async fn build_row(
        &self,
        table: &Table,
        target: &Target,
        input: &RowInput,
        cache: &CandidateCache,
        limiter: &Semaphore,
    ) -> Row {
        let row_context = input.data.join(" ");
        let mut cells = Vec::with_capacity(table.width());

        for column in 0..table.width() {
            let text = input.data.get(column).cloned().unwrap_or_default();
            match target.classify(column) {
                ColumnTag::NamedEntity => {
                    let qid = input.id_for(column).map(str::to_owned);
                    let candidates = self
                        .candidates_for(table, target, input.id_row, &text, column, qid.as_deref(), cache, limiter)
                        .await;
                    cells.push(Cell::NamedEntity(NeCell {
                        text,
                        row_context: row_context.clone(),
                        column,
                        is_subject: target.is_subject(column),
                        qid,
                        candidates,
                    }));
                }
                ColumnTag::Literal => cells.push(Cell::Literal(LitCell {
                    text,
                    column,
                    datatype: target.lit_datatype(column).unwrap_or_default().to_string(),
                })),
                ColumnTag::NoTag => cells.push(Cell::NoTag(NoTagCell { text, column })),
            }
        }

        Row {
            id_row: input.id_row,
            cells,
        }
    }

    /// Candidates for one NE cell, via the per-run cache.
    #[allow(clippy::too_many_arguments)]
    async fn candidates_for(
        &self,
        table: &Table,
        target: &Target,
        id_row: i64,
        text: &str,
        column: usize,
        qid: Option<&str>,
        cache: &CandidateCache,
        limiter: &Semaphore,
    ) -> Vec<Candidate> {
        // Placeholder texts carry no signal; skip the provider entirely.
        if text.is_empty() || text.eq_ignore_ascii_case("nan") {
            return Vec::new();
        }

        cache
            .get_or_fetch(text, || {
                self.fetch_candidates(table, target, id_row, text, column, qid, limiter)
            })
            .await
    }

    /// One retried provider fetch, degrading to an empty list on failure.
    #[allow(clippy::too_many_arguments)]
    async fn fetch_candidates(
        &self,
        table: &Table,
        target: &Target,
        id_row: i64,
        text: &str,
        column: usize,
        qid: Option<&str>,
        limiter: &Semaphore,
    ) -> Vec<Candidate> {
        let mut request = LookupRequest::new(text)
            .with_limit(self.config.candidate_limit)
            .with_fuzzy(self.config.fuzzy)
            .with_ngrams(self.config.ngrams);
        if let Some(qid) = qid {
            request = request.with_ids(vec![qid.to_string()]);
        }
        if let Some(types) = target.type_hints(column) {
            request = request.with_types(types);
        }

        let mut attempt = 0;
        loop {
            let outcome = {
                let _permit = limiter
                    .acquire()
                    .await
                    .expect("admission limiter closed during resolve");
                self.client.lookup(&request).await
            };

            match outcome {
                Ok(wire) => {
                    let mut candidates: Vec<Candidate> =
                        wire.into_iter().map(Candidate::from).collect();
                    candidates.truncate(self.config.candidate_limit);
                    debug!(cell = %text, count = candidates.len(), "candidates fetched");
                    return candidates;
                }
                Err(err) if err.is_retryable() && attempt + 1 < self.config.retry.attempts => {
                    let delay = self.config.retry.backoff(attempt);
                    warn!(
                        cell = %text,
                        attempt,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "retryable lookup failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(cell = %text, error = %err, "lookup failed, cell degrades to no candidates");
                    self.audit
                        .append(AuditRecord {
                            dataset_name: table.dataset_name.clone(),
                            table_name: table.table_name.clone(),
                            id_row,
                            cell: text.to_string(),
                            types: target.type_hints(column).map(str::to_owned),
                            error: err.to_string(),
                            stack_trace: error_chain(&err),
                            result: err.raw_result().cloned(),
                        })
                        .await;
                    return Vec::new();
                }
            }
        }
    }
}

/// Renders an error and its source chain, one cause per line.
fn error_chain(err: &LookupError) -> String {
    let mut rendered = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        rendered.push_str("\ncaused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
