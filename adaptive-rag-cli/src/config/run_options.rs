//! Optional overrides for a run (CLI args or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options) and
//! [`run_with_options`](crate::run_with_options).

use std::path::PathBuf;

/// Optional overrides: model settings, corpus location, retrieval sizes, caps.
///
/// All fields are optional; only set fields override the base config (from env).
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Override model name.
    pub model: Option<String>,
    /// Override sampling temperature (0–2).
    pub temperature: Option<f32>,
    /// Override the documents directory.
    pub docs_dir: Option<PathBuf>,
    /// Override passages retrieved per query.
    pub retrieve_top_k: Option<usize>,
    /// Override web results per search.
    pub web_search_top_k: Option<usize>,
    /// Override the regeneration cap.
    pub max_regenerations: Option<usize>,
    /// Override the web search cap.
    pub max_web_searches: Option<usize>,
    /// Print each finished step while running.
    pub stream: bool,
    /// Attach node logging middleware.
    pub verbose: bool,
}
