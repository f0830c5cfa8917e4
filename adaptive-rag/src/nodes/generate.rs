use async_trait::async_trait;
use tracing::debug;

use crate::error::RagError;
use crate::graph::Node;
use crate::judgment::JudgmentClient;
use crate::state::WorkflowState;
use crate::workflow::{Step, Verdict};

/// Answers the question from the current documents, overwriting any earlier generation.
pub struct GenerateNode {
    judge: JudgmentClient,
}

impl GenerateNode {
    pub fn new(judge: JudgmentClient) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Node<WorkflowState, Verdict> for GenerateNode {
    fn id(&self) -> &str {
        Step::Generate.as_str()
    }

    async fn run(&self, mut state: WorkflowState) -> Result<(WorkflowState, Verdict), RagError> {
        let generation = self
            .judge
            .generate(state.question(), state.documents())
            .await?;
        state.generation = Some(generation);
        state.generation_attempts += 1;
        debug!(attempt = state.generation_attempts, "generated answer");
        Ok((state, Verdict::Generated))
    }
}
