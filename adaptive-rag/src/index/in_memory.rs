use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::passage::Passage;

use super::{DocumentIndex, Embedder, IndexError};

/// Pure in-memory vector index over passages.
///
/// **Interaction**: Used as `Arc<dyn DocumentIndex>` by the retrieval node.
/// Filled once with [`InMemoryIndex::add_passages`]; safe to query from
/// concurrent runs.
///
/// **In-Memory**: All data stored in memory, lost when the index is dropped.
pub struct InMemoryIndex {
    data: DashMap<usize, VectorEntry>,
    next_id: AtomicUsize,
    embedder: Arc<dyn Embedder>,
}

#[derive(Clone)]
struct VectorEntry {
    vector: Vec<f32>,
    passage: Passage,
}

impl InMemoryIndex {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            data: DashMap::new(),
            next_id: AtomicUsize::new(0),
            embedder,
        }
    }

    /// Embeds and stores `passages`. Insertion order breaks ranking ties.
    pub fn add_passages(&self, passages: Vec<Passage>) -> Result<(), IndexError> {
        if passages.is_empty() {
            return Ok(());
        }
        let texts: Vec<&str> = passages.iter().map(|p| p.content.as_str()).collect();
        let vectors = self.embedder.embed(&texts)?;
        if vectors.len() != passages.len() {
            return Err(IndexError::Embedding(format!(
                "expected {} vectors, got {}",
                passages.len(),
                vectors.len()
            )));
        }

        for (passage, vector) in passages.into_iter().zip(vectors) {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.data.insert(id, VectorEntry { vector, passage });
        }
        debug!(total = self.data.len(), "passages indexed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Computes cosine similarity between two vectors.
    ///
    /// Returns 0.0 if either vector has zero magnitude.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot_product / (norm_a * norm_b)
        }
    }
}

#[async_trait]
impl DocumentIndex for InMemoryIndex {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, IndexError> {
        if k == 0 || self.data.is_empty() {
            return Ok(Vec::new());
        }
        let query_vec = self
            .embedder
            .embed(&[query])?
            .into_iter()
            .next()
            .ok_or_else(|| IndexError::Embedding("no vector returned".into()))?;

        let mut scores: Vec<(usize, f32)> = self
            .data
            .iter()
            .map(|entry| {
                (
                    *entry.key(),
                    Self::cosine_similarity(&query_vec, &entry.vector),
                )
            })
            .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        Ok(scores
            .into_iter()
            .take(k)
            .filter_map(|(id, _)| self.data.get(&id).map(|e| e.passage.clone()))
            .collect())
    }
}
