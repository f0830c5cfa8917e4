//! Bounded self-correction: regeneration and web search caps.

use adaptive_rag::{JudgmentKind, LoopKind, MockLlm, RagError, RetryPolicy};

use crate::common::{Harness, NO, TO_VECTORSTORE, YES};

/// **Scenario**: The hallucination grader always says no; the run fails after
/// max_regenerations + 1 generations, carrying the last draft.
#[tokio::test]
async fn grounding_retry_is_bounded() {
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_reply(JudgmentKind::Relevance, YES)
        .with_replies(JudgmentKind::Generate, ["d1", "d2", "d3", "d4"])
        .with_reply(JudgmentKind::Grounding, NO);
    let h = Harness::new(llm);

    match h.workflow().run("q").await {
        Err(RagError::IterationCapExceeded {
            loop_kind,
            limit,
            last_generation,
        }) => {
            assert_eq!(loop_kind, LoopKind::Regeneration);
            assert_eq!(limit, 3);
            assert_eq!(last_generation.as_deref(), Some("d4"));
        }
        other => panic!("expected IterationCapExceeded, got {:?}", other),
    }
    assert_eq!(h.llm.call_count(JudgmentKind::Generate), 4);
    assert_eq!(h.llm.call_count(JudgmentKind::Usefulness), 0);
}

/// **Scenario**: The regeneration cap follows the configured policy.
#[tokio::test]
async fn regeneration_cap_is_configurable() {
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_reply(JudgmentKind::Relevance, YES)
        .with_reply(JudgmentKind::Generate, "draft")
        .with_reply(JudgmentKind::Grounding, NO);
    let h = Harness::new(llm);
    let policy = RetryPolicy {
        max_regenerations: 1,
        max_web_searches: 2,
    };

    let err = h.workflow_with(policy).run("q").await.unwrap_err();
    assert!(matches!(
        err,
        RagError::IterationCapExceeded {
            loop_kind: LoopKind::Regeneration,
            limit: 1,
            ..
        }
    ));
    assert_eq!(h.llm.call_count(JudgmentKind::Generate), 2);
}

/// **Scenario**: The answer grader always says no; escalation stops after
/// max_web_searches passes.
#[tokio::test]
async fn web_search_escalation_is_bounded() {
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_reply(JudgmentKind::Relevance, YES)
        .with_replies(JudgmentKind::Generate, ["a1", "a2", "a3"])
        .with_reply(JudgmentKind::Grounding, YES)
        .with_reply(JudgmentKind::Usefulness, NO);
    let h = Harness::new(llm);

    match h.workflow().run("q").await {
        Err(RagError::IterationCapExceeded {
            loop_kind,
            limit,
            last_generation,
        }) => {
            assert_eq!(loop_kind, LoopKind::WebSearch);
            assert_eq!(limit, 2);
            assert_eq!(last_generation.as_deref(), Some("a3"));
        }
        other => panic!("expected IterationCapExceeded, got {:?}", other),
    }
    assert_eq!(h.search.queries().len(), 2);
    assert_eq!(h.llm.call_count(JudgmentKind::Generate), 3);
}

/// **Scenario**: A web search resets the regeneration budget for the new evidence.
#[tokio::test]
async fn web_search_starts_a_fresh_regeneration_budget() {
    // Evidence set 1: not useful. Evidence set 2: two ungrounded drafts, then accepted.
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_reply(JudgmentKind::Relevance, YES)
        .with_replies(JudgmentKind::Generate, ["a", "b", "c", "d"])
        .with_replies(JudgmentKind::Grounding, [YES, NO, NO, YES])
        .with_replies(JudgmentKind::Usefulness, [NO, YES]);
    let h = Harness::new(llm);
    let policy = RetryPolicy {
        max_regenerations: 2,
        max_web_searches: 1,
    };

    let outcome = h.workflow_with(policy).run("q").await.unwrap();
    assert_eq!(outcome.generation, "d");
    assert!(outcome.web_search_used);
}
