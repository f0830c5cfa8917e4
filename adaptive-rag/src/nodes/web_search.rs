use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::RagError;
use crate::graph::Node;
use crate::passage::Passage;
use crate::search::WebSearch;
use crate::state::WorkflowState;
use crate::workflow::{Step, Verdict};

pub const DEFAULT_WEB_SEARCH_TOP_K: usize = 3;

/// Appends one passage built from the web search snippets for the question.
///
/// Snippet bodies are joined with `"\n"` into a single passage tagged `"web"`.
/// The search counts against the run's web search budget and starts a new
/// evidence set, so the regeneration counter is reset.
pub struct WebSearchNode {
    search: Arc<dyn WebSearch>,
    top_k: usize,
}

impl WebSearchNode {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self {
            search,
            top_k: DEFAULT_WEB_SEARCH_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait]
impl Node<WorkflowState, Verdict> for WebSearchNode {
    fn id(&self) -> &str {
        Step::WebSearch.as_str()
    }

    async fn run(&self, mut state: WorkflowState) -> Result<(WorkflowState, Verdict), RagError> {
        let snippets = self
            .search
            .search(state.question(), self.top_k)
            .await
            .map_err(|e| RagError::SearchUnavailable(e.to_string()))?;

        if snippets.is_empty() {
            warn!("web search returned no results");
        } else {
            let joined = snippets
                .iter()
                .map(|s| s.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            state.documents.push(Passage::web(joined));
        }
        info!(results = snippets.len(), "web search done");

        state.web_searches += 1;
        state.generation_attempts = 0;
        Ok((state, Verdict::Searched))
    }
}
