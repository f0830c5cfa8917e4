//! Run config: model endpoint, search key, corpus, retrieval sizes and caps. Filled from env / .env.
//!
//! Interacts with [`RunOptions`](super::RunOptions), [`run_with_config`](crate::run_with_config)
//! and adaptive-rag's `RetryPolicy` / `ChunkingConfig`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use adaptive_rag::{ChunkingConfig, RetryPolicy};

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_DOCS_DIR: &str = "books";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_WEB_SEARCH_TIMEOUT_SECS: u64 = 15;

/// Run config. Can be filled from env / .env with [`RunConfig::from_env`].
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI-compatible API base URL. Default: OpenRouter.
    pub api_base: String,
    /// API key for the judgment service.
    pub api_key: String,
    /// Model name used for routing, grading and generation.
    pub model: String,
    /// Sampling temperature for generation (and judgments unless overridden).
    pub temperature: Option<f32>,
    /// Separate temperature for routing and grading calls.
    pub judgment_temperature: Option<f32>,
    /// Tavily API key; web search is unavailable without it.
    pub tavily_api_key: Option<String>,
    /// Directory searched recursively for `*.txt` documents.
    pub docs_dir: PathBuf,
    /// What the local corpus covers, shown to the router. When unset, the
    /// session derives one from the loaded file names.
    pub corpus_description: Option<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub retrieve_top_k: usize,
    pub web_search_top_k: usize,
    pub max_regenerations: usize,
    pub max_web_searches: usize,
    /// Relevance judgments in flight at once.
    pub grading_concurrency: usize,
    /// Seconds before one judgment service call is abandoned.
    pub llm_timeout_secs: u64,
    /// Seconds before one web search request is abandoned.
    pub web_search_timeout_secs: u64,
    /// When true, print "finished running: <step>" after each step.
    pub stream: bool,
    /// When true, attach node logging middleware (enter/exit at info level).
    pub verbose: bool,
}

impl RunConfig {
    /// Apply optional overrides from `RunOptions` to this config.
    ///
    /// Only set fields in `options` override; `stream` only switches streaming on.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(m) = &options.model {
            self.model = m.clone();
        }
        if let Some(t) = options.temperature {
            self.temperature = Some(t);
        }
        if let Some(dir) = &options.docs_dir {
            self.docs_dir = dir.clone();
        }
        if let Some(k) = options.retrieve_top_k {
            self.retrieve_top_k = k;
        }
        if let Some(k) = options.web_search_top_k {
            self.web_search_top_k = k;
        }
        if let Some(n) = options.max_regenerations {
            self.max_regenerations = n;
        }
        if let Some(n) = options.max_web_searches {
            self.max_web_searches = n;
        }
        if options.stream {
            self.stream = true;
        }
        self.verbose = options.verbose;
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_regenerations: self.max_regenerations,
            max_web_searches: self.max_web_searches,
        }
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn web_search_timeout(&self) -> Duration {
        Duration::from_secs(self.web_search_timeout_secs)
    }

    pub fn chunking(&self) -> ChunkingConfig {
        ChunkingConfig::new(self.chunk_size, self.chunk_overlap)
    }

    /// One-line description for logs; never includes keys.
    pub fn summary(&self) -> String {
        format!(
            "model={} api_base={} docs_dir={} top_k={}/{} caps={}/{} web_search={}",
            self.model,
            self.api_base,
            self.docs_dir.display(),
            self.retrieve_top_k,
            self.web_search_top_k,
            self.max_regenerations,
            self.max_web_searches,
            if self.tavily_api_key.is_some() { "tavily" } else { "off" },
        )
    }
}

impl RunConfig {
    /// Fill config from env vars (and .env). Requires `dotenv::dotenv().ok()` or load inside `run()`.
    ///
    /// `OPENAI_API_KEY` required; `OPENAI_API_BASE`, `OPENAI_MODEL`, `OPENAI_TEMPERATURE` have defaults.
    /// `JUDGMENT_TEMPERATURE`, `TAVILY_API_KEY` optional.
    /// Corpus: `DOCS_DIR`, `CORPUS_DESCRIPTION`, `CHUNK_SIZE`, `CHUNK_OVERLAP`. Workflow:
    /// `RETRIEVE_TOP_K`, `WEB_SEARCH_TOP_K`, `MAX_REGENERATIONS`, `MAX_WEB_SEARCHES`,
    /// `GRADING_CONCURRENCY`. Timeouts: `LLM_TIMEOUT_SECS`, `WEB_SEARCH_TIMEOUT_SECS`.
    /// Numeric variables that are set but do not parse are an error.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env",
            )
        })?;
        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = Some(env_parse("OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?);
        let judgment_temperature = env_parse_opt("JUDGMENT_TEMPERATURE")?;
        let tavily_api_key = std::env::var("TAVILY_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let docs_dir = std::env::var("DOCS_DIR").unwrap_or_else(|_| DEFAULT_DOCS_DIR.to_string());
        let corpus_description = std::env::var("CORPUS_DESCRIPTION")
            .ok()
            .filter(|d| !d.trim().is_empty());
        let chunking = ChunkingConfig::default();
        let policy = RetryPolicy::default();

        Ok(Self {
            api_base,
            api_key,
            model,
            temperature,
            judgment_temperature,
            tavily_api_key,
            docs_dir: PathBuf::from(docs_dir),
            corpus_description,
            chunk_size: env_parse("CHUNK_SIZE", chunking.chunk_size)?,
            chunk_overlap: env_parse("CHUNK_OVERLAP", chunking.chunk_overlap)?,
            retrieve_top_k: env_parse("RETRIEVE_TOP_K", adaptive_rag::nodes::DEFAULT_RETRIEVE_TOP_K)?,
            web_search_top_k: env_parse(
                "WEB_SEARCH_TOP_K",
                adaptive_rag::nodes::DEFAULT_WEB_SEARCH_TOP_K,
            )?,
            max_regenerations: env_parse("MAX_REGENERATIONS", policy.max_regenerations)?,
            max_web_searches: env_parse("MAX_WEB_SEARCHES", policy.max_web_searches)?,
            grading_concurrency: env_parse("GRADING_CONCURRENCY", 1)?,
            llm_timeout_secs: env_parse("LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
            web_search_timeout_secs: env_parse(
                "WEB_SEARCH_TIMEOUT_SECS",
                DEFAULT_WEB_SEARCH_TIMEOUT_SECS,
            )?,
            stream: false,
            verbose: false,
        })
    }
}

fn env_parse_opt<T: FromStr>(name: &str) -> Result<Option<T>, Error> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has an invalid value: {:?}", name, raw),
            )) as Error
        }),
        Err(_) => Ok(None),
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> Result<T, Error> {
    Ok(env_parse_opt(name)?.unwrap_or(default))
}
