//! Hard failures: invalid judgments and unavailable collaborators abort the run.

use adaptive_rag::{JudgmentKind, MockIndex, MockLlm, MockWebSearch, RagError};

use crate::common::{happy_llm, Harness, TO_VECTORSTORE, TO_WEB, YES};

/// **Scenario**: A router reply outside the vocabulary fails the run before any retrieval.
#[tokio::test]
async fn invalid_router_judgment_fails_run() {
    let llm = MockLlm::new().with_reply(JudgmentKind::Route, r#"{"datasource": "both"}"#);
    let h = Harness::new(llm);

    match h.workflow().run("q").await {
        Err(RagError::InvalidJudgment { kind, reply }) => {
            assert_eq!(kind, JudgmentKind::Route);
            assert!(reply.contains("both"));
        }
        other => panic!("expected InvalidJudgment, got {:?}", other),
    }
    assert!(h.index.queries().is_empty());
    assert!(h.search.queries().is_empty());
}

/// **Scenario**: Index failure aborts with RetrievalUnavailable; no fallback to the web.
#[tokio::test]
async fn index_failure_is_not_retried_on_the_web() {
    let h = Harness::new(happy_llm("unused")).with_index(MockIndex::failing("index offline"));
    assert!(matches!(
        h.workflow().run("q").await,
        Err(RagError::RetrievalUnavailable(_))
    ));
    assert!(h.search.queries().is_empty());
    assert_eq!(h.llm.call_count(JudgmentKind::Generate), 0);
}

/// **Scenario**: Web search failure aborts with SearchUnavailable.
#[tokio::test]
async fn search_failure_aborts_run() {
    let llm = MockLlm::new().with_reply(JudgmentKind::Route, TO_WEB);
    let h = Harness::new(llm).with_search(MockWebSearch::failing("quota exceeded"));
    match h.workflow().run("q").await {
        Err(RagError::SearchUnavailable(msg)) => assert!(msg.contains("quota exceeded")),
        other => panic!("expected SearchUnavailable, got {:?}", other),
    }
}

/// **Scenario**: An unavailable judgment service mid-run aborts with JudgmentUnavailable.
#[tokio::test]
async fn judgment_service_failure_aborts_run() {
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_reply(JudgmentKind::Relevance, YES);
    let h = Harness::new(llm);
    assert!(matches!(
        h.workflow().run("q").await,
        Err(RagError::JudgmentUnavailable(_))
    ));
}
