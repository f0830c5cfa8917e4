//! Run entry points: run with default config, run_with_config, or run_with_options.
//!
//! Re-exports [`run`], [`run_with_config`], [`run_with_options`], [`Session`] and [`Error`].

pub use crate::config::Error;

mod session;

use adaptive_rag::RunOutcome;

use crate::config::{RunConfig, RunOptions};

pub use session::{build_workflow, Session};
#[cfg(test)]
pub(crate) use session::corpus_description;

/// Answer `question` with default config (from .env).
///
/// Loads `.env` internally, then calls `run_with_config`.
pub async fn run(question: &str) -> Result<RunOutcome, Error> {
    dotenv::dotenv().ok();
    let config = RunConfig::from_env()?;
    run_with_config(&config, question).await
}

/// Answer `question` with config from env and optional overrides.
///
/// Loads `.env`, builds `RunConfig` from env, applies `options`, then runs the workflow.
pub async fn run_with_options(question: &str, options: &RunOptions) -> Result<RunOutcome, Error> {
    dotenv::dotenv().ok();
    let mut config = RunConfig::from_env()?;
    config.apply_options(options);
    run_with_config(&config, question).await
}

/// Answer `question` with the given config; does not read .env.
///
/// Builds the collaborators (loads the corpus) for this one question. Use a
/// [`Session`] to ask several questions against one loaded corpus.
pub async fn run_with_config(config: &RunConfig, question: &str) -> Result<RunOutcome, Error> {
    Session::from_config(config)?.ask(question).await
}
