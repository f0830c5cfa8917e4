//! Integration tests for the `adaptive-rag` binary: startup order of .env and logging.
//!
//! **Scenario**: The binary runs in a temp directory holding a `.env`; no
//! network is touched because session setup stops at the missing Tavily key.

use std::path::Path;
use std::process::{Command, Output};

const CLEARED: &[&str] = &[
    "RUST_LOG",
    "OPENAI_API_KEY",
    "OPENAI_API_BASE",
    "TAVILY_API_KEY",
    "DOCS_DIR",
    "CORPUS_DESCRIPTION",
];

fn run_in(dir: &Path, env_file: &str) -> Output {
    std::fs::write(dir.join(".env"), env_file).unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_adaptive-rag"));
    cmd.current_dir(dir).args(["-m", "who built the creature?"]);
    for var in CLEARED {
        cmd.env_remove(var);
    }
    cmd.output().unwrap()
}

/// **Scenario**: RUST_LOG set only in .env controls the log filter.
///
/// Given: a .env with RUST_LOG=info and an API key, but no Tavily key
/// When: the binary starts
/// Then: it exits non-zero naming TAVILY_API_KEY, and the info-level session log was emitted
#[test]
fn rust_log_from_dotenv_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_in(dir.path(), "RUST_LOG=info\nOPENAI_API_KEY=k\n");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success());
    assert!(stderr.contains("TAVILY_API_KEY"), "{}", stderr);
    assert!(stderr.contains("starting session"), "{}", stderr);
}

/// **Scenario**: Without RUST_LOG the default filter (warn) hides info logs.
#[test]
fn default_filter_hides_info_logs() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_in(dir.path(), "OPENAI_API_KEY=k\n");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success());
    assert!(stderr.contains("TAVILY_API_KEY"), "{}", stderr);
    assert!(!stderr.contains("starting session"), "{}", stderr);
}
