//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Works against any OpenAI-compatible endpoint (OpenAI, OpenRouter, local
//! servers) through `async_openai`. Requires `OPENAI_API_KEY` or explicit config.

use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use crate::error::RagError;
use crate::llm::{LlmClient, LlmRequest, LlmResponse};
use crate::message::Message;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

/// Bound on one chat completion, retries included, used unless `with_timeout` overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI Chat Completions client implementing `LlmClient` (aligns with LangChain ChatOpenAI).
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide
/// config via `ChatOpenAI::with_config` (e.g. an OpenRouter base URL).
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
    /// Temperature for structured judgments; falls back to `temperature`.
    judgment_temperature: Option<f32>,
    timeout: Duration,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
            judgment_temperature: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
            judgment_temperature: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set a separate temperature for the routing and grading calls.
    pub fn with_judgment_temperature(mut self, temperature: f32) -> Self {
        self.judgment_temperature = Some(temperature);
        self
    }

    /// Fail a call with `JudgmentUnavailable` when no reply arrives within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn temperature_for(&self, request: &LlmRequest) -> Option<f32> {
        if request.expects_json() {
            self.judgment_temperature.or(self.temperature)
        } else {
            self.temperature
        }
    }

    /// Convert our `Message` list to OpenAI request messages.
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, request: &LlmRequest) -> Result<LlmResponse, RagError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(&request.messages));
        if let Some(t) = self.temperature_for(request) {
            args.temperature(t);
        }

        let chat_request = args.build().map_err(|e| {
            RagError::JudgmentUnavailable(format!("OpenAI request build failed: {}", e))
        })?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(chat_request))
            .await
            .map_err(|_| {
                RagError::JudgmentUnavailable(format!(
                    "OpenAI request timed out after {:?}",
                    self.timeout
                ))
            })?
            .map_err(|e| RagError::JudgmentUnavailable(format!("OpenAI API error: {}", e)))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            RagError::JudgmentUnavailable("OpenAI returned no choices".to_string())
        })?;

        let content = choice.message.content.unwrap_or_default();
        trace!(kind = %request.kind, reply = %content, "llm reply");
        Ok(LlmResponse { content })
    }
}
