//! Lookup client abstraction.
//!
//! Defines the collaborator interface for candidate retrieval so the
//! resolver can work against any provider (or a test double).

use crate::error::LookupResult;
use crate::request::LookupRequest;
use crate::wire::CandidateWire;
use async_trait::async_trait;

/// A provider of candidate entities for a text query.
///
/// One call is exactly one provider attempt. Retry budgets, backoff, and
/// admission control are the caller's responsibility.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Returns the name of the provider.
    fn provider_name(&self) -> &'static str;

    /// Fetches candidate entities for the request's query text.
    async fn lookup(&self, request: &LookupRequest) -> LookupResult<Vec<CandidateWire>>;
}
