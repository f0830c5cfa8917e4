use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::RagError;
use crate::graph::Node;
use crate::index::DocumentIndex;
use crate::state::WorkflowState;
use crate::workflow::{Step, Verdict};

pub const DEFAULT_RETRIEVE_TOP_K: usize = 5;

/// Replaces `documents` with the index's top passages for the question.
pub struct RetrieveNode {
    index: Arc<dyn DocumentIndex>,
    top_k: usize,
}

impl RetrieveNode {
    pub fn new(index: Arc<dyn DocumentIndex>) -> Self {
        Self {
            index,
            top_k: DEFAULT_RETRIEVE_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait]
impl Node<WorkflowState, Verdict> for RetrieveNode {
    fn id(&self) -> &str {
        Step::Retrieve.as_str()
    }

    async fn run(&self, mut state: WorkflowState) -> Result<(WorkflowState, Verdict), RagError> {
        let documents = self
            .index
            .retrieve(state.question(), self.top_k)
            .await
            .map_err(|e| RagError::RetrievalUnavailable(e.to_string()))?;
        debug!(count = documents.len(), "retrieved documents");
        state.documents = documents;
        Ok((state, Verdict::Retrieved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MockIndex;
    use crate::passage::Passage;

    /// **Scenario**: Retrieval replaces prior documents and asks for top_k.
    #[tokio::test]
    async fn replaces_documents_with_ranked_result() {
        let index = Arc::new(MockIndex::new(vec![
            Passage::new("one", "a.txt"),
            Passage::new("two", "a.txt"),
        ]));
        let node = RetrieveNode::new(index.clone());
        let state = WorkflowState::new("q").with_documents(vec![Passage::web("stale")]);

        let (state, verdict) = node.run(state).await.unwrap();
        assert_eq!(verdict, Verdict::Retrieved);
        assert_eq!(state.documents().len(), 2);
        assert_eq!(state.documents()[0].content, "one");
        assert_eq!(index.queries(), vec![("q".to_string(), 5)]);
    }

    /// **Scenario**: Index failure surfaces as RetrievalUnavailable.
    #[tokio::test]
    async fn index_failure_is_retrieval_unavailable() {
        let node = RetrieveNode::new(Arc::new(MockIndex::failing("disk gone"))).with_top_k(2);
        match node.run(WorkflowState::new("q")).await {
            Err(RagError::RetrievalUnavailable(msg)) => assert!(msg.contains("disk gone")),
            other => panic!("expected RetrievalUnavailable, got {:?}", other),
        }
    }
}
