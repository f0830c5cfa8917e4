use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::error::RagError;
use crate::graph::Node;
use crate::judgment::{JudgmentClient, Score};
use crate::state::WorkflowState;
use crate::workflow::{Step, Verdict};

/// Keeps the passages judged relevant, in order, and flags web search when any
/// passage was dropped.
///
/// Judgments run one at a time unless `with_concurrency` allows more; output
/// order never depends on completion order.
pub struct GradeDocumentsNode {
    judge: JudgmentClient,
    concurrency: usize,
}

impl GradeDocumentsNode {
    pub fn new(judge: JudgmentClient) -> Self {
        Self {
            judge,
            concurrency: 1,
        }
    }

    /// At most `limit` relevance judgments in flight (zero is treated as one).
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }
}

#[async_trait]
impl Node<WorkflowState, Verdict> for GradeDocumentsNode {
    fn id(&self) -> &str {
        Step::GradeDocuments.as_str()
    }

    async fn run(&self, mut state: WorkflowState) -> Result<(WorkflowState, Verdict), RagError> {
        let documents = std::mem::take(&mut state.documents);

        let grades = documents.iter().map(|doc| {
            let judge = self.judge.clone();
            let question = state.question().to_string();
            let content = doc.content.clone();
            async move { judge.grade_relevance(&question, &content).await }
        });
        let scores: Vec<Score> = stream::iter(grades.collect::<Vec<_>>())
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let total = documents.len();
        let mut kept = Vec::with_capacity(total);
        for (doc, score) in documents.into_iter().zip(scores) {
            if score.is_yes() {
                debug!(source = %doc.source_tag, "document relevant");
                kept.push(doc);
            } else {
                info!(source = %doc.source_tag, "document not relevant");
            }
        }

        let web_search = kept.len() < total;
        state.documents = kept;
        state.web_search_flag = web_search;
        Ok((state, Verdict::DocumentsGraded { web_search }))
    }
}
