use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::passage::Passage;

use super::{DocumentIndex, IndexError};

/// Index returning a fixed passage list (first `k`), or always failing.
///
/// Records every `(query, k)` it was asked for.
#[derive(Default)]
pub struct MockIndex {
    passages: Vec<Passage>,
    failure: Option<String>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockIndex {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self {
            passages,
            ..Default::default()
        }
    }

    /// Index whose every retrieval fails with `IndexError::Unavailable(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl DocumentIndex for MockIndex {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, IndexError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((query.to_string(), k));
        if let Some(message) = &self.failure {
            return Err(IndexError::Unavailable(message.clone()));
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}
