use async_trait::async_trait;
use tracing::info;

use crate::error::RagError;
use crate::graph::Node;
use crate::judgment::JudgmentClient;
use crate::state::WorkflowState;
use crate::workflow::{Step, Verdict};

/// Picks the evidence source for the question. Leaves the state unchanged.
pub struct RouterNode {
    judge: JudgmentClient,
}

impl RouterNode {
    pub fn new(judge: JudgmentClient) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Node<WorkflowState, Verdict> for RouterNode {
    fn id(&self) -> &str {
        Step::Route.as_str()
    }

    async fn run(&self, state: WorkflowState) -> Result<(WorkflowState, Verdict), RagError> {
        let datasource = self.judge.route(state.question()).await?;
        info!(?datasource, "routed question");
        Ok((state, Verdict::Routed(datasource)))
    }
}
