//! adaptive-rag-cli library: reusable run logic for the adaptive RAG workflow.
//!
//! Reads config from .env, loads the documents directory into an in-memory
//! index, wires the OpenAI-compatible judgment service and Tavily search into a
//! `RagWorkflow`, and answers questions.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let outcome = adaptive_rag_cli::run("What is Frankenstein about?").await?;
//! println!("{}", outcome.generation);
//! ```

mod config;
mod run;

pub use adaptive_rag::{RagError, RunOutcome};
pub use config::{Error, RunConfig, RunOptions};
pub use run::{build_workflow, run, run_with_config, run_with_options, Session};

#[cfg(test)]
mod tests;
