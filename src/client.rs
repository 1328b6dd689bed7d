//! Backend seam and HTTP implementation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{AggregationResponse, QueryError, QueryRequest, Result};

/// Trait for submitting a query to the aggregation backend.
///
/// The controller only depends on this seam; tests substitute in-process
/// fakes the same way network engines are mocked elsewhere.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Submits one query and returns the parsed response.
    ///
    /// Transport-level failures (connection errors, non-2xx statuses,
    /// unparseable bodies) are errors. A well-formed response is returned
    /// as-is even when its `success` field is false; interpreting that is
    /// the caller's job.
    async fn submit(&self, request: &QueryRequest) -> Result<AggregationResponse>;
}

/// HTTP backend talking to the aggregation API via reqwest.
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    query_url: Url,
    health_url: Url,
}

impl HttpBackend {
    /// Creates a backend for the given base URL (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            query_url: base.join("api/query")?,
            health_url: base.join("api/health")?,
            client: Client::new(),
        })
    }

    /// Replaces the reqwest client, keeping the endpoints.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Probes the backend health endpoint and returns its status string.
    pub async fn health(&self) -> Result<String> {
        let response = self.client.get(self.health_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                code: status.as_u16(),
                text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))?;
        Ok(body
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown")
            .to_string())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn submit(&self, request: &QueryRequest) -> Result<AggregationResponse> {
        debug!(query = %request.query, engines = ?request.selected_engines, "submitting query");

        let response = self
            .client
            .post(self.query_url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                code: status.as_u16(),
                text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let parsed: AggregationResponse = response
            .json()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))?;

        debug!(
            success = parsed.success,
            merged = parsed.results.len(),
            "response received"
        );
        Ok(parsed)
    }
}
