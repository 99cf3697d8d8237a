//! HTTP implementation of the lookup client.
//!
//! Talks to the entity-retrieval endpoint over GET with query parameters.

use crate::client::LookupClient;
use crate::error::{LookupError, LookupResult};
use crate::request::LookupRequest;
use crate::wire::{CandidateWire, LookupResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP lookup client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpLookupConfig {
    /// Base URL of the entity-retrieval service.
    pub base_url: String,
    /// Access token sent with every request.
    pub token: String,
    /// Knowledge graph to query.
    pub kg: String,
    /// Overall timeout per request (seconds).
    pub timeout_secs: u64,
}

impl Default for HttpLookupConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token: String::new(),
            kg: "wikidata".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Lookup client backed by the entity-retrieval HTTP service.
pub struct HttpLookupClient {
    config: HttpLookupConfig,
    client: Client,
}

impl HttpLookupClient {
    /// Creates a new HTTP lookup client.
    pub fn new(config: HttpLookupConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    fn lookup_url(&self) -> String {
        format!("{}/lookup/entity-retrieval", self.config.base_url)
    }

    fn query_params(&self, request: &LookupRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("token", self.config.token.clone()),
            ("name", request.query.clone()),
            ("limit", request.limit.to_string()),
            ("kg", self.config.kg.clone()),
            ("fuzzy", request.fuzzy.to_string()),
            ("ngrams", request.ngrams.to_string()),
            ("ids", request.ids.join(" ")),
        ];
        if let Some(types) = &request.types {
            params.push(("types", types.clone()));
        }
        if let Some(ner_types) = &request.ner_types {
            params.push(("NERtype", ner_types.clone()));
        }
        params
    }
}

#[async_trait]
impl LookupClient for HttpLookupClient {
    fn provider_name(&self) -> &'static str {
        "entity-retrieval"
    }

    async fn lookup(&self, request: &LookupRequest) -> LookupResult<Vec<CandidateWire>> {
        debug!(query = %request.query, limit = request.limit, "lookup request");

        let response = self
            .client
            .get(self.lookup_url())
            .query(&self.query_params(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Provider {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = serde_json::from_str(&response.text().await?)?;

        // The provider sometimes nests the result map under the kg name.
        let raw = match &body {
            serde_json::Value::Object(map) if map.contains_key(&self.config.kg) => {
                body[&self.config.kg].clone()
            }
            _ => body.clone(),
        };

        let mut parsed: LookupResponse = serde_json::from_value(raw)?;
        match parsed.remove(&request.query) {
            Some(candidates) => {
                debug!(
                    query = %request.query,
                    count = candidates.len(),
                    "lookup response"
                );
                Ok(candidates)
            }
            None => Err(LookupError::MissingQuery {
                query: request.query.clone(),
                raw: body,
            }),
        }
    }
}
