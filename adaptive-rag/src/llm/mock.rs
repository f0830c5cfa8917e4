//! Scripted LLM for tests and offline runs.
//!
//! Replies are queued per `JudgmentKind`; the last reply of a queue repeats once
//! the queue is drained, so "always answer no" needs a single entry.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::RagError;
use crate::judgment::JudgmentKind;

use super::{LlmClient, LlmRequest, LlmResponse};

#[derive(Default)]
struct Script {
    queue: VecDeque<String>,
    last: Option<String>,
}

/// Mock LLM: per-call-site reply scripts plus a log of every request seen.
///
/// **Interaction**: Implements `LlmClient`; used by node and workflow tests
/// through `JudgmentClient`.
#[derive(Default)]
pub struct MockLlm {
    scripts: Mutex<HashMap<JudgmentKind, Script>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `replies` for `kind` (builder style).
    pub fn with_replies<I, T>(self, kind: JudgmentKind, replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.push_replies(kind, replies);
        self
    }

    /// Queues one reply for `kind` (builder style).
    pub fn with_reply(self, kind: JudgmentKind, reply: impl Into<String>) -> Self {
        self.with_replies(kind, [reply.into()])
    }

    /// Queues more replies for `kind`.
    pub fn push_replies<I, T>(&self, kind: JudgmentKind, replies: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
        let script = scripts.entry(kind).or_default();
        script.queue.extend(replies.into_iter().map(Into::into));
    }

    /// Requests in the order they were invoked.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Request kinds in the order they were invoked.
    pub fn calls(&self) -> Vec<JudgmentKind> {
        self.requests().into_iter().map(|r| r.kind).collect()
    }

    /// Number of requests of `kind` seen so far.
    pub fn call_count(&self, kind: JudgmentKind) -> usize {
        self.calls().into_iter().filter(|k| *k == kind).count()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, request: &LlmRequest) -> Result<LlmResponse, RagError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
        let script = scripts.get_mut(&request.kind).ok_or_else(|| {
            RagError::JudgmentUnavailable(format!("no scripted reply for {}", request.kind))
        })?;
        let content = match script.queue.pop_front() {
            Some(reply) => {
                script.last = Some(reply.clone());
                reply
            }
            None => script.last.clone().ok_or_else(|| {
                RagError::JudgmentUnavailable(format!("no scripted reply for {}", request.kind))
            })?,
        };
        Ok(LlmResponse { content })
    }
}
