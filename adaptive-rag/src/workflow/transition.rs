//! Transition table of the workflow machine.
//!
//! `transition` is pure: it reads the step, the verdict the step's node
//! reported, the loop counters on the state and the retry policy. It is
//! registered as the conditional edge of every step.

use tracing::warn;

use crate::error::{LoopKind, RagError};
use crate::graph::Next;
use crate::judgment::Datasource;
use crate::state::WorkflowState;

use super::step::{GenerationGrade, Step, Verdict};

/// Caps on the two self-correcting loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Regenerations allowed after a "not grounded" verdict, per evidence set.
    pub max_regenerations: usize,
    /// Web search passes allowed per run, counting router-initiated ones.
    pub max_web_searches: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_regenerations: 3,
            max_web_searches: 2,
        }
    }
}

impl RetryPolicy {
    /// Upper bound on node executions of one run under this policy.
    ///
    /// Each evidence set (initial plus one per web search) costs at most
    /// `2 * (max_regenerations + 1)` generate/grade steps; add route, retrieve,
    /// grade_documents and the web search steps themselves.
    /// Saturates at `usize::MAX` for very large caps.
    pub fn max_steps(&self) -> usize {
        let evidence_sets = self.max_web_searches.saturating_add(1);
        let per_set = self.max_regenerations.saturating_add(1).saturating_mul(2);
        evidence_sets
            .saturating_mul(per_set)
            .saturating_add(self.max_web_searches)
            .saturating_add(3)
    }
}

/// Next step after `step` reported `verdict`, leaving `state`.
///
/// Fails with `IterationCapExceeded` when a correcting loop is exhausted and
/// with `ExecutionFailed` when the verdict does not belong to the step.
pub fn transition(
    step: Step,
    verdict: &Verdict,
    state: &WorkflowState,
    policy: &RetryPolicy,
) -> Result<Next<Step>, RagError> {
    match (step, verdict) {
        (Step::Route, Verdict::Routed(Datasource::WebSearch)) => web_search(state, policy),
        (Step::Route, Verdict::Routed(Datasource::Vectorstore)) => Ok(Next::Node(Step::Retrieve)),
        (Step::Retrieve, Verdict::Retrieved) => Ok(Next::Node(Step::GradeDocuments)),
        (Step::GradeDocuments, Verdict::DocumentsGraded { web_search: true }) => {
            web_search(state, policy)
        }
        (Step::GradeDocuments, Verdict::DocumentsGraded { web_search: false }) => {
            Ok(Next::Node(Step::Generate))
        }
        (Step::WebSearch, Verdict::Searched) => Ok(Next::Node(Step::Generate)),
        (Step::Generate, Verdict::Generated) => Ok(Next::Node(Step::GradeGeneration)),
        (Step::GradeGeneration, Verdict::GenerationGraded(grade)) => match grade {
            GenerationGrade::Useful => Ok(Next::End),
            GenerationGrade::NotSupported => {
                let regenerations = state.generation_attempts().saturating_sub(1);
                if regenerations >= policy.max_regenerations {
                    warn!(limit = policy.max_regenerations, "regeneration cap reached");
                    return Err(RagError::IterationCapExceeded {
                        loop_kind: LoopKind::Regeneration,
                        limit: policy.max_regenerations,
                        last_generation: state.generation().map(str::to_string),
                    });
                }
                Ok(Next::Node(Step::Generate))
            }
            GenerationGrade::NotUseful => web_search(state, policy),
        },
        (step, verdict) => Err(RagError::ExecutionFailed(format!(
            "verdict {:?} is not valid for step {}",
            verdict, step
        ))),
    }
}

/// WEBSEARCH unless the run already used its web search budget.
fn web_search(state: &WorkflowState, policy: &RetryPolicy) -> Result<Next<Step>, RagError> {
    if state.web_searches() >= policy.max_web_searches {
        warn!(limit = policy.max_web_searches, "web search cap reached");
        return Err(RagError::IterationCapExceeded {
            loop_kind: LoopKind::WebSearch,
            limit: policy.max_web_searches,
            last_generation: state.generation().map(str::to_string),
        });
    }
    Ok(Next::Node(Step::WebSearch))
}
