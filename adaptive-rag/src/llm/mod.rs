//! LLM client abstraction behind the judgment client.
//!
//! `JudgmentClient` renders a prompt per call site into an `LlmRequest` and
//! hands it to an `LlmClient`; this module defines the trait, a scripted mock
//! and the OpenAI-compatible implementation (feature `openai`).

mod mock;

#[cfg(feature = "openai")]
mod openai;

pub use mock::MockLlm;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::RagError;
use crate::judgment::JudgmentKind;
use crate::message::Message;

/// One request to the language model.
///
/// `kind` names the call site so clients can pick per-site settings and mocks
/// can answer per site; `messages` is the rendered prompt.
#[derive(Clone, Debug)]
pub struct LlmRequest {
    pub kind: JudgmentKind,
    pub messages: Vec<Message>,
}

impl LlmRequest {
    pub fn new(kind: JudgmentKind, messages: Vec<Message>) -> Self {
        Self { kind, messages }
    }

    /// Whether the reply must be a single JSON object (all call sites except generation).
    pub fn expects_json(&self) -> bool {
        self.kind.is_structured()
    }
}

/// Response from an LLM completion: assistant message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,
}

/// LLM client: given a rendered request, returns the assistant text.
///
/// Implementations must be safe to call concurrently from independent workflow runs.
/// Transport and API failures map to `RagError::JudgmentUnavailable`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, request: &LlmRequest) -> Result<LlmResponse, RagError>;
}
