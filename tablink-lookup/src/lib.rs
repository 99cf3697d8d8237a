//! Entity-retrieval provider client for tablink.
//!
//! Defines the [`LookupClient`] collaborator seam (one provider attempt per
//! call — retry budgets belong to the caller), the HTTP implementation
//! against the entity-retrieval endpoint, the wire candidate shapes, and the
//! append-only [`AuditSink`] where per-cell lookup failures are recorded.

mod audit;
mod client;
mod error;
mod http;
mod request;
mod wire;

pub use audit::{AuditRecord, AuditSink, JsonlAuditSink, MemoryAuditSink};
pub use client::LookupClient;
pub use error::{LookupError, LookupResult};
pub use http::{HttpLookupClient, HttpLookupConfig};
pub use request::{LookupRequest, DEFAULT_CANDIDATE_LIMIT};
pub use wire::{CandidateWire, LookupResponse, WireFeatures};
