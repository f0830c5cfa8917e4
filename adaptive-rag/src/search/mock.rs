use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{SearchError, Snippet, WebSearch};

/// Web search returning fixed snippets (first `k`), or always failing.
#[derive(Default)]
pub struct MockWebSearch {
    snippets: Vec<Snippet>,
    failure: Option<String>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockWebSearch {
    /// Mock answering every query with snippets built from `contents`.
    pub fn new<I, T>(contents: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            snippets: contents.into_iter().map(Snippet::new).collect(),
            ..Default::default()
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// `(query, k)` of every call, in order.
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl WebSearch for MockWebSearch {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Snippet>, SearchError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((query.to_string(), k));
        match &self.failure {
            Some(message) => Err(SearchError::Request(message.clone())),
            None => Ok(self.snippets.iter().take(k).cloned().collect()),
        }
    }
}
