//! Judgment client: typed routing, grading and generation over an `LlmClient`.
//!
//! Every structured call site has a closed vocabulary: `Datasource` for the
//! router, `Score` for the three graders. Replies outside the vocabulary fail
//! with `RagError::InvalidJudgment`; nothing is coerced to a default.

mod parse;
pub mod prompts;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RagError;
use crate::llm::{LlmClient, LlmRequest};
use crate::passage::Passage;

/// Call site of a judgment service request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentKind {
    /// Question → `{"datasource": ...}`.
    Route,
    /// Question + one passage → `{"score": ...}`.
    Relevance,
    /// Question + passages → free text answer.
    Generate,
    /// Passages + answer → `{"score": ...}`.
    Grounding,
    /// Question + answer → `{"score": ...}`.
    Usefulness,
}

impl JudgmentKind {
    /// Whether the reply is a single-key JSON object rather than free text.
    pub fn is_structured(self) -> bool {
        !matches!(self, JudgmentKind::Generate)
    }

    /// The one key a structured reply must carry.
    pub fn result_key(self) -> &'static str {
        match self {
            JudgmentKind::Route => "datasource",
            _ => "score",
        }
    }
}

impl fmt::Display for JudgmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JudgmentKind::Route => "route",
            JudgmentKind::Relevance => "relevance",
            JudgmentKind::Generate => "generate",
            JudgmentKind::Grounding => "grounding",
            JudgmentKind::Usefulness => "usefulness",
        };
        f.write_str(s)
    }
}

/// Router vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datasource {
    Vectorstore,
    WebSearch,
}

impl FromStr for Datasource {
    type Err = ();

    /// Exact match only: `"vectorstore"` or `"web_search"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vectorstore" => Ok(Self::Vectorstore),
            "web_search" => Ok(Self::WebSearch),
            _ => Err(()),
        }
    }
}

/// Grader vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Score {
    Yes,
    No,
}

impl Score {
    pub fn is_yes(self) -> bool {
        self == Score::Yes
    }
}

impl FromStr for Score {
    type Err = ();

    /// Exact match only: `"yes"` or `"no"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(()),
        }
    }
}

/// Typed front of the judgment service, shared by all nodes of a workflow.
///
/// Cheap to clone; clones share the underlying `LlmClient`, which must tolerate
/// concurrent calls from independent runs.
#[derive(Clone)]
pub struct JudgmentClient {
    llm: Arc<dyn LlmClient>,
    corpus_description: Option<String>,
}

impl JudgmentClient {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            corpus_description: None,
        }
    }

    /// Tells the router what the local corpus covers (topics, titles, file names).
    pub fn with_corpus_description(mut self, description: impl Into<String>) -> Self {
        self.corpus_description = Some(description.into());
        self
    }

    pub fn corpus_description(&self) -> Option<&str> {
        self.corpus_description.as_deref()
    }

    /// Chooses the evidence source for `question`.
    pub async fn route(&self, question: &str) -> Result<Datasource, RagError> {
        let messages = prompts::route(question, self.corpus_description.as_deref());
        self.classify(JudgmentKind::Route, messages).await
    }

    /// Binary relevance of one passage body to `question`.
    pub async fn grade_relevance(&self, question: &str, document: &str) -> Result<Score, RagError> {
        self.classify(
            JudgmentKind::Relevance,
            prompts::relevance(question, document),
        )
        .await
    }

    /// Whether `generation` is supported by `documents`.
    pub async fn grade_grounding(
        &self,
        documents: &[Passage],
        generation: &str,
    ) -> Result<Score, RagError> {
        self.classify(
            JudgmentKind::Grounding,
            prompts::grounding(documents, generation),
        )
        .await
    }

    /// Whether `generation` resolves `question`.
    pub async fn grade_usefulness(
        &self,
        question: &str,
        generation: &str,
    ) -> Result<Score, RagError> {
        self.classify(
            JudgmentKind::Usefulness,
            prompts::usefulness(question, generation),
        )
        .await
    }

    /// Free-text answer to `question` from `documents`, returned as produced.
    pub async fn generate(&self, question: &str, documents: &[Passage]) -> Result<String, RagError> {
        let request = LlmRequest::new(
            JudgmentKind::Generate,
            prompts::generate(question, documents),
        );
        let response = self.llm.invoke(&request).await?;
        Ok(response.content)
    }

    async fn classify<T: FromStr>(
        &self,
        kind: JudgmentKind,
        messages: Vec<crate::message::Message>,
    ) -> Result<T, RagError> {
        let request = LlmRequest::new(kind, messages);
        let response = self.llm.invoke(&request).await?;
        let value = parse::single_value(kind, &response.content)?;
        debug!(%kind, %value, "judgment");
        value.parse::<T>().map_err(|_| RagError::InvalidJudgment {
            kind,
            reply: response.content,
        })
    }
}
