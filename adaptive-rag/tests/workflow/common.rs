//! Shared fixtures: scripted judgment replies and collaborator doubles.

use std::sync::Arc;

use adaptive_rag::{
    JudgmentClient, JudgmentKind, MockIndex, MockLlm, MockWebSearch, Passage, RagWorkflow,
    RetryPolicy,
};

pub const YES: &str = r#"{"score": "yes"}"#;
pub const NO: &str = r#"{"score": "no"}"#;
pub const TO_VECTORSTORE: &str = r#"{"datasource": "vectorstore"}"#;
pub const TO_WEB: &str = r#"{"datasource": "web_search"}"#;

/// The two Frankenstein passages the corpus returns.
pub fn frankenstein_passages() -> Vec<Passage> {
    vec![
        Passage::new(
            "Victor Frankenstein, a young scientist, discovers how to give life to dead matter.",
            "frankenstein.txt",
        ),
        Passage::new(
            "The creature, rejected by its maker, seeks revenge across Europe and the Arctic.",
            "frankenstein.txt",
        ),
    ]
}

/// Doubles held by a test so it can inspect calls after the run.
pub struct Harness {
    pub llm: Arc<MockLlm>,
    pub index: Arc<MockIndex>,
    pub search: Arc<MockWebSearch>,
}

impl Harness {
    pub fn new(llm: MockLlm) -> Self {
        Self {
            llm: Arc::new(llm),
            index: Arc::new(MockIndex::new(frankenstein_passages())),
            search: Arc::new(MockWebSearch::new(["Frankenstein was written by Mary Shelley."])),
        }
    }

    pub fn with_index(mut self, index: MockIndex) -> Self {
        self.index = Arc::new(index);
        self
    }

    pub fn with_search(mut self, search: MockWebSearch) -> Self {
        self.search = Arc::new(search);
        self
    }

    pub fn workflow(&self) -> RagWorkflow {
        self.workflow_with(RetryPolicy::default())
    }

    pub fn workflow_with(&self, policy: RetryPolicy) -> RagWorkflow {
        RagWorkflow::builder(
            JudgmentClient::new(self.llm.clone()),
            self.index.clone(),
            self.search.clone(),
        )
        .retry_policy(policy)
        .build()
        .expect("workflow compiles")
    }
}

/// LLM that routes to the corpus, finds everything relevant and accepts `answer`.
pub fn happy_llm(answer: &str) -> MockLlm {
    MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_reply(JudgmentKind::Relevance, YES)
        .with_reply(JudgmentKind::Generate, answer)
        .with_reply(JudgmentKind::Grounding, YES)
        .with_reply(JudgmentKind::Usefulness, YES)
}
