//! Tests for [`Session`](crate::Session), [`build_workflow`](crate::build_workflow)
//! and [`run_with_config`](crate::run_with_config).
//!
//! Mocks stand in for the judgment service, index and search; `from_config`
//! failures are checked without touching the network.

use std::path::PathBuf;
use std::sync::Arc;

use adaptive_rag::{
    JudgmentKind, MockIndex, MockLlm, MockWebSearch, Passage, RagError, RetryPolicy,
};

use crate::config::RunConfig;
use crate::run::corpus_description;
use crate::{build_workflow, run_with_config, Session};

const YES: &str = r#"{"score": "yes"}"#;
const NO: &str = r#"{"score": "no"}"#;

fn config(docs_dir: PathBuf) -> RunConfig {
    RunConfig {
        api_base: "http://127.0.0.1:9/v1".into(),
        api_key: "test-key".into(),
        model: "test-model".into(),
        temperature: Some(0.0),
        judgment_temperature: None,
        tavily_api_key: Some("tvly-test".into()),
        docs_dir,
        corpus_description: None,
        chunk_size: 1000,
        chunk_overlap: 200,
        retrieve_top_k: 2,
        web_search_top_k: 3,
        max_regenerations: 1,
        max_web_searches: 1,
        grading_concurrency: 1,
        llm_timeout_secs: 60,
        web_search_timeout_secs: 15,
        stream: false,
        verbose: false,
    }
}

fn llm(grounding: &[&str]) -> MockLlm {
    MockLlm::new()
        .with_reply(JudgmentKind::Route, r#"{"datasource": "vectorstore"}"#)
        .with_reply(JudgmentKind::Relevance, YES)
        .with_replies(JudgmentKind::Generate, ["first", "second", "third"])
        .with_replies(JudgmentKind::Grounding, grounding.iter().copied())
        .with_reply(JudgmentKind::Usefulness, YES)
}

fn index() -> Arc<MockIndex> {
    Arc::new(MockIndex::new(vec![Passage::new(
        "Victor Frankenstein builds a creature.",
        "frankenstein.txt",
    )]))
}

/// **Scenario**: build_workflow carries the caps and top-k from the config.
#[tokio::test]
async fn build_workflow_applies_config() {
    let index = index();
    let workflow = build_workflow(
        &config(PathBuf::from("unused")),
        Arc::new(llm(&[YES])),
        index.clone(),
        Arc::new(MockWebSearch::new(Vec::<String>::new())),
    )
    .unwrap();

    assert_eq!(
        *workflow.policy(),
        RetryPolicy {
            max_regenerations: 1,
            max_web_searches: 1
        }
    );
    let outcome = workflow.run("Who built the creature?").await.unwrap();
    assert_eq!(outcome.generation, "first");
    assert_eq!(index.queries(), vec![("Who built the creature?".to_string(), 2)]);
}

/// **Scenario**: A configured corpus description reaches the router prompt.
#[tokio::test]
async fn build_workflow_passes_corpus_description_to_router() {
    let llm = Arc::new(llm(&[YES]));
    let mut config = config(PathBuf::from("unused"));
    config.corpus_description = Some("Gothic novels: Frankenstein, Dracula".into());
    let workflow = build_workflow(
        &config,
        llm.clone(),
        index(),
        Arc::new(MockWebSearch::new(Vec::<String>::new())),
    )
    .unwrap();

    workflow.run("Who built the creature?").await.unwrap();

    let route = llm
        .requests()
        .into_iter()
        .find(|r| r.kind == JudgmentKind::Route)
        .expect("route request");
    assert!(route.messages[0]
        .content()
        .contains("Gothic novels: Frankenstein, Dracula"));
}

/// **Scenario**: Without CORPUS_DESCRIPTION the description comes from the loaded file names;
/// a configured one wins.
#[test]
fn corpus_description_defaults_to_loaded_file_names() {
    let passages = vec![
        Passage::new("x", "frankenstein.txt"),
        Passage::new("y", "dracula.txt"),
    ];
    let mut config = config(PathBuf::from("unused"));

    let derived = corpus_description(&config, &passages).unwrap();
    assert!(derived.contains("frankenstein.txt, dracula.txt"), "{}", derived);
    assert_eq!(corpus_description(&config, &[]), None);

    config.corpus_description = Some("Gothic novels".into());
    assert_eq!(
        corpus_description(&config, &passages).as_deref(),
        Some("Gothic novels")
    );
}

/// **Scenario**: Session::ask in stream mode returns the same outcome as plain mode.
///
/// Given: a session with stream = true and a script that regenerates once  
/// When: ask is called  
/// Then: the second generation is accepted
#[tokio::test]
async fn session_ask_in_stream_mode_returns_outcome() {
    let workflow = build_workflow(
        &config(PathBuf::from("unused")),
        Arc::new(llm(&[NO, YES])),
        index(),
        Arc::new(MockWebSearch::new(Vec::<String>::new())),
    )
    .unwrap();
    let session = Session::new(workflow, true);

    let outcome = session.ask("Who built the creature?").await.unwrap();

    assert_eq!(outcome.generation, "second");
    assert!(!outcome.web_search_used);
}

/// **Scenario**: Exhausting the regeneration cap surfaces RagError through the boxed error.
#[tokio::test]
async fn session_ask_surfaces_cap_error() {
    let workflow = build_workflow(
        &config(PathBuf::from("unused")),
        Arc::new(llm(&[NO])),
        index(),
        Arc::new(MockWebSearch::new(Vec::<String>::new())),
    )
    .unwrap();
    let session = Session::new(workflow, false);

    let err = session.ask("Who built the creature?").await.unwrap_err();

    match err.downcast_ref::<RagError>() {
        Some(RagError::IterationCapExceeded {
            last_generation, ..
        }) => assert_eq!(last_generation.as_deref(), Some("second")),
        other => panic!("expected IterationCapExceeded, got {:?}", other),
    }
}

/// **Scenario**: from_config fails before any request when no Tavily key is configured.
#[test]
fn from_config_requires_tavily_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path().to_path_buf());
    config.tavily_api_key = None;

    let err = Session::from_config(&config).err().expect("must fail");
    assert!(err.to_string().contains("TAVILY_API_KEY"), "{}", err);
}

/// **Scenario**: from_config fails when the documents directory does not exist.
#[tokio::test]
async fn run_with_config_fails_on_missing_docs_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path().join("no-such-dir"));

    let err = run_with_config(&config, "anything").await.unwrap_err();
    assert!(err.to_string().contains("no-such-dir"), "{}", err);
}

/// **Scenario**: from_config loads the corpus from a directory of text files.
#[test]
fn from_config_indexes_docs_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "The creature reads Paradise Lost.").unwrap();
    let config = config(dir.path().to_path_buf());

    let session = Session::from_config(&config).unwrap();
    assert!(session.workflow().recursion_limit() >= 25);
}
