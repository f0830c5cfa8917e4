//! RAG workflow runner: builds the graph from injected collaborators, runs and streams it.
//!
//! Interacts with [`StateGraph`](crate::graph::StateGraph), the nodes in
//! [`crate::nodes`] and [`transition`](super::transition).

use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::error::RagError;
use crate::graph::{
    CompilationError, CompiledStateGraph, LoggingNodeMiddleware, StateGraph, StreamEvent,
    DEFAULT_RECURSION_LIMIT,
};
use crate::index::DocumentIndex;
use crate::judgment::JudgmentClient;
use crate::nodes::{
    GenerateNode, GradeDocumentsNode, GradeGenerationNode, RetrieveNode, RouterNode,
    WebSearchNode, DEFAULT_RETRIEVE_TOP_K, DEFAULT_WEB_SEARCH_TOP_K,
};
use crate::search::WebSearch;
use crate::state::{RunOutcome, WorkflowState};

use super::step::{Step, Verdict};
use super::transition::{transition, RetryPolicy};

/// Builder for [`RagWorkflow`]. Every collaborator is passed in; nothing is global.
///
/// # Example
///
/// ```ignore
/// let workflow = RagWorkflow::builder(judge, index, search)
///     .retry_policy(RetryPolicy { max_regenerations: 2, max_web_searches: 1 })
///     .build()?;
/// let outcome = workflow.run("What is Frankenstein about?").await?;
/// ```
pub struct RagWorkflowBuilder {
    judge: JudgmentClient,
    index: Arc<dyn DocumentIndex>,
    search: Arc<dyn WebSearch>,
    policy: RetryPolicy,
    retrieve_top_k: usize,
    web_search_top_k: usize,
    grading_concurrency: usize,
    verbose: bool,
}

impl RagWorkflowBuilder {
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn retrieve_top_k(mut self, k: usize) -> Self {
        self.retrieve_top_k = k;
        self
    }

    pub fn web_search_top_k(mut self, k: usize) -> Self {
        self.web_search_top_k = k;
        self
    }

    /// Relevance judgments allowed in flight at once (default 1).
    pub fn grading_concurrency(mut self, limit: usize) -> Self {
        self.grading_concurrency = limit;
        self
    }

    /// Attaches node logging middleware (enter/exit at info level).
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Compiles the workflow graph.
    ///
    /// The recursion limit is derived from the retry policy so it never fires
    /// before the policy's caps do.
    pub fn build(self) -> Result<RagWorkflow, CompilationError> {
        let policy = self.policy;
        let mut graph = StateGraph::<WorkflowState, Step, Verdict>::new();
        graph
            .add_node(Step::Route, Arc::new(RouterNode::new(self.judge.clone())))
            .add_node(
                Step::Retrieve,
                Arc::new(RetrieveNode::new(self.index).with_top_k(self.retrieve_top_k)),
            )
            .add_node(
                Step::GradeDocuments,
                Arc::new(
                    GradeDocumentsNode::new(self.judge.clone())
                        .with_concurrency(self.grading_concurrency),
                ),
            )
            .add_node(
                Step::WebSearch,
                Arc::new(WebSearchNode::new(self.search).with_top_k(self.web_search_top_k)),
            )
            .add_node(Step::Generate, Arc::new(GenerateNode::new(self.judge.clone())))
            .add_node(
                Step::GradeGeneration,
                Arc::new(GradeGenerationNode::new(self.judge)),
            )
            .set_entry_point(Step::Route);
        for step in Step::ALL {
            graph.add_conditional_edges(step, move |verdict, state| {
                transition(step, verdict, state, &policy)
            });
        }

        let mut graph =
            graph.with_recursion_limit(policy.max_steps().max(DEFAULT_RECURSION_LIMIT));
        if self.verbose {
            graph = graph.with_middleware(Arc::new(LoggingNodeMiddleware));
        }
        let compiled = graph.compile()?;
        Ok(RagWorkflow { compiled, policy })
    }
}

/// Compiled adaptive RAG workflow.
///
/// Cheap to clone and safe to run concurrently: every run owns its own
/// [`WorkflowState`]; collaborators are shared.
#[derive(Clone)]
pub struct RagWorkflow {
    compiled: CompiledStateGraph<WorkflowState, Step, Verdict>,
    policy: RetryPolicy,
}

impl RagWorkflow {
    /// Starts a builder with default policy and top-k values.
    pub fn builder(
        judge: JudgmentClient,
        index: Arc<dyn DocumentIndex>,
        search: Arc<dyn WebSearch>,
    ) -> RagWorkflowBuilder {
        RagWorkflowBuilder {
            judge,
            index,
            search,
            policy: RetryPolicy::default(),
            retrieve_top_k: DEFAULT_RETRIEVE_TOP_K,
            web_search_top_k: DEFAULT_WEB_SEARCH_TOP_K,
            grading_concurrency: 1,
            verbose: false,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn recursion_limit(&self) -> usize {
        self.compiled.recursion_limit()
    }

    /// Answers `question`, or fails with the first unrecoverable error or an exhausted cap.
    pub async fn run(&self, question: &str) -> Result<RunOutcome, RagError> {
        let state = self.run_state(WorkflowState::new(question)).await?;
        RunOutcome::try_from(state)
    }

    /// Runs from a prepared state (e.g. seeded documents) and returns the final state.
    pub async fn run_state(&self, state: WorkflowState) -> Result<WorkflowState, RagError> {
        self.compiled.invoke(state).await
    }

    /// Streams one `Updates` event per finished step, then `Finished`.
    pub fn stream(&self, question: &str) -> ReceiverStream<StreamEvent<WorkflowState, Step>> {
        self.compiled.stream(WorkflowState::new(question))
    }

    /// Streams a run, calling `on_step` after each finished step, and returns the outcome.
    pub async fn run_with_progress<F>(
        &self,
        question: &str,
        mut on_step: F,
    ) -> Result<RunOutcome, RagError>
    where
        F: FnMut(Step, &WorkflowState),
    {
        let mut stream = self.stream(question);
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::Updates { node, state } => on_step(node, &state),
                StreamEvent::Finished(result) => return RunOutcome::try_from(result?),
            }
        }
        Err(RagError::ExecutionFailed(
            "stream ended without a final state".into(),
        ))
    }
}
