//! # Adaptive RAG
//!
//! A self-correcting retrieval-augmented generation workflow. Given a question,
//! the workflow routes it to a local document index or to web search, filters
//! the evidence for relevance, generates an answer and gates it on groundedness
//! and usefulness, regenerating or escalating to web search when a gate fails.
//!
//! ## Design Principles
//!
//! - **State-in, state-out**: one [`WorkflowState`] flows through every node; each
//!   node takes it by value and returns a new one.
//! - **Typed control flow**: nodes report a [`Verdict`]; a pure [`transition`]
//!   function over `(Step, Verdict, counters)` picks the next [`Step`].
//! - **Closed vocabularies**: routing and grading replies parse into
//!   [`Datasource`] and [`Score`]; anything else is [`RagError::InvalidJudgment`].
//! - **Bounded loops**: [`RetryPolicy`] caps regeneration and web search
//!   escalation; exhausting a cap is [`RagError::IterationCapExceeded`].
//! - **Injected collaborators**: the judgment service ([`LlmClient`]), the
//!   [`DocumentIndex`] and the [`WebSearch`] service are passed to
//!   [`RagWorkflow::builder`]; nothing is global.
//!
//! ## Main Modules
//!
//! - [`graph`]: generic `StateGraph` / `CompiledStateGraph` engine keyed by a typed step.
//! - [`workflow`]: `Step`, `Verdict`, `transition`, `RetryPolicy`, `RagWorkflow`.
//! - [`nodes`]: the six decision nodes.
//! - [`judgment`]: `JudgmentClient`, prompts and vocabulary parsing.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and `ChatOpenAI` (feature `openai`).
//! - [`index`]: `DocumentIndex`, in-memory vector index, chunker and directory loader.
//! - [`search`]: `WebSearch`, `MockWebSearch`, and `TavilySearch` (feature `tavily`).
//!
//! ## Features
//!
//! - `openai` (default): OpenAI-compatible chat client via `async-openai`.
//! - `tavily` (default): Tavily web search client via `reqwest`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use adaptive_rag::{
//!     JudgmentClient, JudgmentKind, MockIndex, MockLlm, MockWebSearch, Passage, RagWorkflow,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let llm = MockLlm::new()
//!     .with_reply(JudgmentKind::Route, r#"{"datasource": "vectorstore"}"#)
//!     .with_reply(JudgmentKind::Relevance, r#"{"score": "yes"}"#)
//!     .with_reply(JudgmentKind::Generate, "A scientist creates a living being.")
//!     .with_reply(JudgmentKind::Grounding, r#"{"score": "yes"}"#)
//!     .with_reply(JudgmentKind::Usefulness, r#"{"score": "yes"}"#);
//! let workflow = RagWorkflow::builder(
//!     JudgmentClient::new(Arc::new(llm)),
//!     Arc::new(MockIndex::new(vec![Passage::new("Victor builds a creature.", "frankenstein.txt")])),
//!     Arc::new(MockWebSearch::new(Vec::<String>::new())),
//! )
//! .build()
//! .unwrap();
//! let outcome = workflow.run("What is Frankenstein about?").await.unwrap();
//! assert!(!outcome.web_search_used);
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod index;
pub mod judgment;
pub mod llm;
pub mod message;
pub mod nodes;
pub mod passage;
pub mod search;
pub mod state;
pub mod workflow;

pub use error::{LoopKind, RagError};
pub use graph::{
    CompilationError, CompiledStateGraph, LoggingNodeMiddleware, Next, Node, NodeMiddleware,
    StateGraph, StreamEvent,
};
pub use index::{
    describe_sources, load_directory, split_text, ChunkingConfig, DocumentIndex, Embedder, HashingEmbedder,
    InMemoryIndex, IndexError, MockIndex,
};
pub use judgment::{Datasource, JudgmentClient, JudgmentKind, Score};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use llm::{LlmClient, LlmRequest, LlmResponse, MockLlm};
pub use message::Message;
pub use nodes::{
    GenerateNode, GradeDocumentsNode, GradeGenerationNode, RetrieveNode, RouterNode,
    WebSearchNode,
};
pub use passage::{Passage, WEB_SOURCE_TAG};
pub use search::{MockWebSearch, SearchError, Snippet, WebSearch};
#[cfg(feature = "tavily")]
pub use search::TavilySearch;
pub use state::{RunOutcome, WorkflowState};
pub use workflow::{
    transition, GenerationGrade, RagWorkflow, RagWorkflowBuilder, RetryPolicy, Step, Verdict,
};
