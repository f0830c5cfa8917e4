//! Accepted answers: corpus path, web path, fallback after rejected passages.

use adaptive_rag::{JudgmentKind, MockLlm, Passage};

use crate::common::{frankenstein_passages, happy_llm, Harness, NO, TO_VECTORSTORE, TO_WEB, YES};

const ANSWER: &str = "Frankenstein is about a scientist who creates life and the consequences.";

/// **Scenario**: "What is Frankenstein about?" answered from the corpus:
/// generator text returned, two documents, no web search.
#[tokio::test]
async fn frankenstein_question_answered_from_corpus() {
    let h = Harness::new(happy_llm(ANSWER));
    let outcome = h.workflow().run("What is Frankenstein about?").await.unwrap();

    assert_eq!(outcome.generation, ANSWER);
    assert_eq!(outcome.documents, frankenstein_passages());
    assert!(!outcome.web_search_used);
    assert_eq!(
        h.index.queries(),
        vec![("What is Frankenstein about?".to_string(), 5)]
    );
    assert!(h.search.queries().is_empty());
}

/// **Scenario**: Acceptance ends the run: the accepted generation is returned
/// and no judgment call follows the usefulness check.
#[tokio::test]
async fn acceptance_is_terminal() {
    let h = Harness::new(happy_llm(ANSWER));
    let outcome = h.workflow().run("q").await.unwrap();

    assert_eq!(outcome.generation, ANSWER);
    assert_eq!(
        h.llm.calls(),
        vec![
            JudgmentKind::Route,
            JudgmentKind::Relevance,
            JudgmentKind::Relevance,
            JudgmentKind::Generate,
            JudgmentKind::Grounding,
            JudgmentKind::Usefulness,
        ]
    );
}

/// **Scenario**: Router picks web search; the answer is generated from the web passage only.
#[tokio::test]
async fn web_route_skips_the_corpus() {
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_WEB)
        .with_reply(JudgmentKind::Generate, "Mary Shelley wrote it.")
        .with_reply(JudgmentKind::Grounding, YES)
        .with_reply(JudgmentKind::Usefulness, YES);
    let h = Harness::new(llm);
    let outcome = h.workflow().run("Who wrote Frankenstein?").await.unwrap();

    assert!(outcome.web_search_used);
    assert_eq!(
        outcome.documents,
        vec![Passage::web("Frankenstein was written by Mary Shelley.")]
    );
    assert!(h.index.queries().is_empty());
    assert_eq!(h.llm.call_count(JudgmentKind::Relevance), 0);
}

/// **Scenario**: One rejected passage triggers web search; the web passage is
/// appended after the kept one.
#[tokio::test]
async fn rejected_passage_falls_back_to_web_search() {
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_replies(JudgmentKind::Relevance, [YES, NO])
        .with_reply(JudgmentKind::Generate, ANSWER)
        .with_reply(JudgmentKind::Grounding, YES)
        .with_reply(JudgmentKind::Usefulness, YES);
    let h = Harness::new(llm);
    let outcome = h.workflow().run("What is Frankenstein about?").await.unwrap();

    let kept = frankenstein_passages().remove(0);
    assert_eq!(
        outcome.documents,
        vec![kept, Passage::web("Frankenstein was written by Mary Shelley.")]
    );
    assert!(outcome.web_search_used);
    assert_eq!(h.search.queries().len(), 1);
}

/// **Scenario**: A grounded but unhelpful answer escalates to web search and
/// the regenerated answer is accepted.
#[tokio::test]
async fn unhelpful_answer_escalates_then_accepts() {
    let llm = MockLlm::new()
        .with_reply(JudgmentKind::Route, TO_VECTORSTORE)
        .with_reply(JudgmentKind::Relevance, YES)
        .with_replies(JudgmentKind::Generate, ["vague", "precise"])
        .with_reply(JudgmentKind::Grounding, YES)
        .with_replies(JudgmentKind::Usefulness, [NO, YES]);
    let h = Harness::new(llm);
    let outcome = h.workflow().run("q").await.unwrap();

    assert_eq!(outcome.generation, "precise");
    assert!(outcome.web_search_used);
    assert_eq!(outcome.documents.len(), 3);
    assert!(outcome.documents[2].is_web());
}
