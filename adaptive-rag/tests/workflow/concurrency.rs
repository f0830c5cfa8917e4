//! Independent runs share collaborators but never state.

use adaptive_rag::JudgmentKind;

use crate::common::{happy_llm, Harness};

/// **Scenario**: Many concurrent runs on one workflow each get their own outcome.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_runs_are_independent() {
    let h = Harness::new(happy_llm("shared answer"));
    let workflow = h.workflow();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let wf = workflow.clone();
            tokio::spawn(async move { wf.run(&format!("question {}", i)).await })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.generation, "shared answer");
        assert_eq!(outcome.documents.len(), 2);
        assert!(!outcome.web_search_used);
    }

    let mut questions: Vec<_> = h.index.queries().into_iter().map(|(q, _)| q).collect();
    questions.sort();
    questions.dedup();
    assert_eq!(questions.len(), 8);
    assert_eq!(h.llm.call_count(JudgmentKind::Generate), 8);
}
