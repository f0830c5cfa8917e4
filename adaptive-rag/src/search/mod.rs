//! Web search service contract and implementations.
//!
//! The web search node calls [`WebSearch::search`] with the question and joins
//! the returned snippet bodies into a single passage.

mod mock;
#[cfg(feature = "tavily")]
mod tavily;

pub use mock::MockWebSearch;
#[cfg(feature = "tavily")]
pub use tavily::TavilySearch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One ranked web result. Only `content` reaches the workflow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl Snippet {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Error from a web search call; mapped to `RagError::SearchUnavailable`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(String),

    #[error("search service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected search response: {0}")]
    Decode(String),

    #[error("search request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Web search service: ranked snippets for a query.
///
/// **Interaction**: Shared as `Arc<dyn WebSearch>` across runs; called by the
/// web search node with `(question, top_k)`.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Snippet>, SearchError>;
}
