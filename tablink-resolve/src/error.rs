//! Error types for the resolve layer.
//!
//! Provider failures are contained inside the resolver (they degrade to
//! empty candidate lists plus an audit record), so the only errors that
//! surface here are invariant violations caught before any I/O.

use tablink_types::TargetError;
use thiserror::Error;

/// Result type for resolve operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can surface from a resolve run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The target does not form a valid partition of the table's columns.
    #[error("invalid target: {0}")]
    InvalidTarget(#[from] TargetError),
}
