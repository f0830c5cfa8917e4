//! Tavily search API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{SearchError, Snippet, WebSearch};

const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";

/// Whole-request timeout used by [`TavilySearch::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Tavily client (`POST /search` with the API key in the body).
///
/// Every request is bounded by the client timeout; an expired request fails
/// with `SearchError::Timeout`.
pub struct TavilySearch {
    api_key: String,
    endpoint: String,
    timeout: Duration,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<Snippet>,
}

impl TavilySearch {
    /// Client with [`DEFAULT_TIMEOUT`].
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Request(format!("http client: {}", e)))?;
        Ok(Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout,
            http,
        })
    }

    /// Overrides the endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request_body(&self, query: &str, k: usize) -> serde_json::Value {
        json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": k,
        })
    }

    fn request_error(&self, e: reqwest::Error) -> SearchError {
        if e.is_timeout() {
            SearchError::Timeout(self.timeout)
        } else {
            SearchError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Snippet>, SearchError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&self.request_body(query, k))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: TavilyResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout(self.timeout)
            } else {
                SearchError::Decode(e.to_string())
            }
        })?;
        debug!(results = body.results.len(), "tavily search");
        Ok(body.results.into_iter().take(k).collect())
    }
}
