//! Concurrent candidate fetcher for tablink.
//!
//! Turns a [`tablink_types::Table`] plus a column [`tablink_types::Target`]
//! into built rows whose NE cells carry candidate entities.
//!
//! # Architecture
//!
//! - **Resolver**: fan-out/fan-in over rows, one cooperative task per row,
//!   caller-visible order preserved regardless of completion order.
//! - **CandidateCache**: per-run single-flight memoization keyed by cell
//!   text, so identical texts share one provider call.
//! - **Admission limiter**: a semaphore capping simultaneously in-flight
//!   provider calls, independent of how many row tasks are queued. Acquired
//!   per attempt, released before any backoff sleep.
//! - **Degradation**: retryable provider failures are retried with
//!   exponential backoff; an exhausted budget or a terminal failure leaves
//!   the cell with an empty candidate list and appends one record to the
//!   [`tablink_lookup::AuditSink`]. Provider failures never abort the run.
//!
//! Programming faults are deliberately not isolated: a panic in a row task
//! propagates out of [`Resolver::resolve`].

mod cache;
mod error;
mod resolver;

pub use cache::CandidateCache;
pub use error::{ResolveError, ResolveResult};
pub use resolver::{Resolver, ResolverConfig, RetryPolicy};
