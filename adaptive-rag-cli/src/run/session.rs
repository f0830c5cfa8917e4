//! Session: collaborators built once from config, then any number of questions.
//!
//! Builds `ChatOpenAI` from the endpoint settings, `TavilySearch` from the
//! search key and an `InMemoryIndex` from the documents directory, and hands
//! them to `RagWorkflow::builder`. The router is told what the corpus holds:
//! `CORPUS_DESCRIPTION` when set, otherwise the loaded file names.

use std::io::Write;
use std::sync::Arc;

use adaptive_rag::{
    describe_sources, load_directory, ChatOpenAI, DocumentIndex, HashingEmbedder, InMemoryIndex,
    JudgmentClient, LlmClient, Passage, RagWorkflow, RunOutcome, TavilySearch, WebSearch,
};
use async_openai::config::OpenAIConfig;
use tracing::info;

use crate::config::{Error, RunConfig};

/// Builds a workflow over explicit collaborators with the sizes and caps from `config`.
pub fn build_workflow(
    config: &RunConfig,
    llm: Arc<dyn LlmClient>,
    index: Arc<dyn DocumentIndex>,
    search: Arc<dyn WebSearch>,
) -> Result<RagWorkflow, Error> {
    let mut judge = JudgmentClient::new(llm);
    if let Some(desc) = &config.corpus_description {
        judge = judge.with_corpus_description(desc.clone());
    }
    let workflow = RagWorkflow::builder(judge, index, search)
        .retry_policy(config.retry_policy())
        .retrieve_top_k(config.retrieve_top_k)
        .web_search_top_k(config.web_search_top_k)
        .grading_concurrency(config.grading_concurrency)
        .verbose(config.verbose)
        .build()?;
    Ok(workflow)
}

/// Configured corpus description, or one derived from the passages' source files.
pub(crate) fn corpus_description(config: &RunConfig, passages: &[Passage]) -> Option<String> {
    config.corpus_description.clone().or_else(|| {
        let derived = describe_sources(passages);
        (!derived.is_empty()).then_some(derived)
    })
}

/// Loaded workflow plus output settings.
pub struct Session {
    workflow: RagWorkflow,
    stream: bool,
}

impl Session {
    /// Builds the real collaborators from `config`.
    ///
    /// Fails when `TAVILY_API_KEY` is missing or the documents directory does not exist.
    pub fn from_config(config: &RunConfig) -> Result<Self, Error> {
        info!(config = %config.summary(), "starting session");

        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.api_base)
            .with_api_key(config.api_key.clone());
        let mut llm = ChatOpenAI::with_config(openai_config, config.model.clone())
            .with_timeout(config.llm_timeout());
        if let Some(t) = config.temperature {
            llm = llm.with_temperature(t);
        }
        if let Some(t) = config.judgment_temperature {
            llm = llm.with_judgment_temperature(t);
        }

        let tavily_key = config.tavily_api_key.clone().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "TAVILY_API_KEY is not set; please configure it in .env",
            )
        })?;
        let search = TavilySearch::with_timeout(tavily_key, config.web_search_timeout())?;

        let passages = load_directory(&config.docs_dir, &config.chunking())?;
        let mut config = config.clone();
        config.corpus_description = corpus_description(&config, &passages);
        let index = InMemoryIndex::new(Arc::new(HashingEmbedder::default()));
        index.add_passages(passages)?;
        info!(passages = index.len(), "corpus indexed");

        let workflow = build_workflow(&config, Arc::new(llm), Arc::new(index), Arc::new(search))?;
        Ok(Self::new(workflow, config.stream))
    }

    /// Session over a prebuilt workflow (tests, custom collaborators).
    pub fn new(workflow: RagWorkflow, stream: bool) -> Self {
        Self { workflow, stream }
    }

    pub fn workflow(&self) -> &RagWorkflow {
        &self.workflow
    }

    /// Answers one question. In stream mode, prints each finished step to stdout.
    pub async fn ask(&self, question: &str) -> Result<RunOutcome, Error> {
        let outcome = if self.stream {
            self.workflow
                .run_with_progress(question, |step, _| {
                    let mut out = std::io::stdout();
                    let _ = writeln!(out, "finished running: {}", step);
                    let _ = out.flush();
                })
                .await?
        } else {
            self.workflow.run(question).await?
        };
        Ok(outcome)
    }
}
