//! # Document index: ranked passages for a query
//!
//! The workflow consumes any [`DocumentIndex`]; it never builds or mutates one.
//!
//! ## Implementations
//!
//! | Type            | Storage   | Ranking                                  |
//! |-----------------|-----------|------------------------------------------|
//! | [`InMemoryIndex`] | In-memory | Cosine similarity over an [`Embedder`]   |
//! | [`MockIndex`]     | In-memory | Fixed order (tests, offline runs)        |
//!
//! [`load_directory`] reads `*.txt` files and splits them with [`split_text`]
//! into passages ready for [`InMemoryIndex::add_passages`].

mod chunker;
mod embedder;
mod in_memory;
mod loader;
mod mock;

pub use chunker::{split_text, ChunkingConfig};
pub use embedder::{Embedder, HashingEmbedder};
pub use in_memory::InMemoryIndex;
pub use loader::{describe_sources, load_directory};
pub use mock::MockIndex;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::passage::Passage;

/// Error from building or querying a document index.
///
/// The retrieval node maps every variant to `RagError::RetrievalUnavailable`.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index unavailable: {0}")]
    Unavailable(String),

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("documents directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid chunking config: {0}")]
    InvalidConfig(String),
}

/// Source of ranked passages for a query.
///
/// **Interaction**: Shared as `Arc<dyn DocumentIndex>` between all runs of a
/// workflow; called by the retrieval node with `(question, top_k)`.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Up to `k` passages, best first.
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, IndexError>;
}
