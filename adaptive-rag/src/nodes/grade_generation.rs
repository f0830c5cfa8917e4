use async_trait::async_trait;
use tracing::info;

use crate::error::RagError;
use crate::graph::Node;
use crate::judgment::JudgmentClient;
use crate::state::WorkflowState;
use crate::workflow::{GenerationGrade, Step, Verdict};

/// Two-stage gate: grounding against the documents, then usefulness for the
/// question. The usefulness check only runs for grounded answers.
pub struct GradeGenerationNode {
    judge: JudgmentClient,
}

impl GradeGenerationNode {
    pub fn new(judge: JudgmentClient) -> Self {
        Self { judge }
    }

    async fn grade(&self, state: &WorkflowState) -> Result<GenerationGrade, RagError> {
        let generation = state.generation().ok_or_else(|| {
            RagError::ExecutionFailed("grade_generation ran before any generation".into())
        })?;

        let grounded = self
            .judge
            .grade_grounding(state.documents(), generation)
            .await?;
        if !grounded.is_yes() {
            info!("generation is not grounded in documents");
            return Ok(GenerationGrade::NotSupported);
        }

        let useful = self
            .judge
            .grade_usefulness(state.question(), generation)
            .await?;
        if useful.is_yes() {
            info!("generation addresses question");
            Ok(GenerationGrade::Useful)
        } else {
            info!("generation does not address question");
            Ok(GenerationGrade::NotUseful)
        }
    }
}

#[async_trait]
impl Node<WorkflowState, Verdict> for GradeGenerationNode {
    fn id(&self) -> &str {
        Step::GradeGeneration.as_str()
    }

    async fn run(&self, state: WorkflowState) -> Result<(WorkflowState, Verdict), RagError> {
        let grade = self.grade(&state).await?;
        Ok((state, Verdict::GenerationGraded(grade)))
    }
}
