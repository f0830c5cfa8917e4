//! Workflow state threaded through every node, and the outcome returned to callers.
//!
//! Nodes take the state by value and return a new one (state-in, state-out).
//! The question is fixed at construction; only the workflow's own nodes can
//! replace documents, flags or the generation.

use serde::Serialize;

use crate::passage::Passage;

/// The single record passed through every transition of one workflow run.
///
/// One run owns one instance; concurrent runs each build their own via
/// [`WorkflowState::new`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
    question: String,
    pub(crate) documents: Vec<Passage>,
    pub(crate) web_search_flag: bool,
    pub(crate) generation: Option<String>,
    /// Generations produced since the evidence last changed.
    pub(crate) generation_attempts: usize,
    /// Web search passes run so far.
    pub(crate) web_searches: usize,
}

impl WorkflowState {
    /// Fresh state for `question`: no documents, flag false, no generation.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn documents(&self) -> &[Passage] {
        &self.documents
    }

    pub fn web_search_flag(&self) -> bool {
        self.web_search_flag
    }

    pub fn generation(&self) -> Option<&str> {
        self.generation.as_deref()
    }

    pub fn generation_attempts(&self) -> usize {
        self.generation_attempts
    }

    pub fn web_searches(&self) -> usize {
        self.web_searches
    }

    /// Seeds documents before a run; used to resume from prior evidence and by tests.
    pub fn with_documents(mut self, documents: Vec<Passage>) -> Self {
        self.documents = documents;
        self
    }
}

/// Final contents of a successful run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// The accepted answer.
    pub generation: String,
    /// Evidence the accepted answer was generated from.
    pub documents: Vec<Passage>,
    /// True when at least one web search pass ran.
    pub web_search_used: bool,
}

impl TryFrom<WorkflowState> for RunOutcome {
    type Error = crate::error::RagError;

    fn try_from(state: WorkflowState) -> Result<Self, Self::Error> {
        let generation = state.generation.ok_or_else(|| {
            crate::error::RagError::ExecutionFailed("run ended without a generation".into())
        })?;
        Ok(Self {
            generation,
            documents: state.documents,
            web_search_used: state.web_searches > 0,
        })
    }
}
