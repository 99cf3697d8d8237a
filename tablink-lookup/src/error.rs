//! Error types for the lookup layer.

use thiserror::Error;

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can occur during a single lookup attempt.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The provider answered with a non-success status.
    #[error("provider returned status {status}")]
    Provider { status: u16 },

    /// The request timed out.
    #[error("lookup request timed out")]
    Timeout,

    /// Transport-level failure (connect, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not valid JSON of the expected shape.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 200 response whose body does not contain the queried text as a key.
    /// Terminal for the cell; the raw body is retained for the audit record.
    #[error("response missing query text {query:?}")]
    MissingQuery {
        query: String,
        raw: serde_json::Value,
    },
}

impl LookupError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Timeouts, transport failures, and provider-side (5xx) errors are
    /// retryable; client errors and malformed bodies are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            LookupError::Timeout | LookupError::Network(_) => true,
            LookupError::Provider { status } => *status >= 500,
            LookupError::Decode(_) | LookupError::MissingQuery { .. } => false,
        }
    }

    /// The raw provider response associated with the failure, if one was
    /// received. Attached to audit records.
    #[must_use]
    pub fn raw_result(&self) -> Option<&serde_json::Value> {
        match self {
            LookupError::MissingQuery { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else {
            LookupError::Network(err.to_string())
        }
    }
}
