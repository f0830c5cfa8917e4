//! Workflow execution error types.
//!
//! Every node and the engine return `RagError`. Collaborator-specific errors
//! (`IndexError`, `SearchError`) are mapped into the matching variant by the
//! node that calls the collaborator.

use std::fmt;

use thiserror::Error;

use crate::judgment::JudgmentKind;

/// Which bounded loop of the workflow hit its cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopKind {
    /// Generation was judged not grounded and regenerated too many times.
    Regeneration,
    /// Answer was judged not useful and escalated to web search too many times.
    WebSearch,
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopKind::Regeneration => write!(f, "regeneration"),
            LoopKind::WebSearch => write!(f, "web search"),
        }
    }
}

/// Workflow execution error.
///
/// Returned by `Node::run`, `CompiledStateGraph::invoke` and `RagWorkflow::run`.
/// All variants abort the run; nothing is retried except the bounded loops whose
/// exhaustion is reported as `IterationCapExceeded`.
#[derive(Debug, Error)]
pub enum RagError {
    /// The judgment service answered outside the vocabulary of the call site
    /// (or not with the required single-key object).
    #[error("invalid {kind} judgment: {reply:?}")]
    InvalidJudgment { kind: JudgmentKind, reply: String },

    /// The judgment service itself failed (transport, API error, no choices).
    #[error("judgment service unavailable: {0}")]
    JudgmentUnavailable(String),

    /// The document index could not serve the query.
    #[error("retrieval unavailable: {0}")]
    RetrievalUnavailable(String),

    /// The web search service could not serve the query.
    #[error("web search unavailable: {0}")]
    SearchUnavailable(String),

    /// A bounded loop exceeded its cap. `last_generation` is the most recent
    /// answer, which was never verified.
    #[error("{loop_kind} cap of {limit} exceeded")]
    IterationCapExceeded {
        loop_kind: LoopKind,
        limit: usize,
        last_generation: Option<String>,
    },

    /// The engine ran more node steps than its recursion limit allows.
    #[error("recursion limit of {limit} steps reached")]
    RecursionLimit { limit: usize },

    /// Engine or node contract failure (e.g. grading before any generation).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
