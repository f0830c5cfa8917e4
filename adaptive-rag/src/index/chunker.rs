//! Fixed-size character chunking with overlap.

use super::IndexError;

/// Size and overlap of chunks, in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if self.chunk_size == 0 {
            return Err(IndexError::InvalidConfig(
                "chunk_size must be greater than 0".into(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(IndexError::InvalidConfig(
                "chunk_overlap must be less than chunk_size".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Splits `text` into chunks of at most `chunk_size` characters, consecutive
/// chunks sharing up to `chunk_overlap` characters.
///
/// A chunk ends at the last whitespace inside its window when there is one past
/// the overlap region, so words are not cut. Chunks are trimmed; blank chunks
/// are dropped.
pub fn split_text(text: &str, config: &ChunkingConfig) -> Result<Vec<String>, IndexError> {
    config.validate()?;
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = (start + config.chunk_size).min(len);
        if end < len {
            let floor = start + config.chunk_overlap + 1;
            if let Some(ws) = (floor..end).rev().find(|&i| chars[i].is_whitespace()) {
                end = ws;
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        if end >= len {
            break;
        }
        let mut next = end.saturating_sub(config.chunk_overlap).max(start + 1);
        while next < end && !chars[next - 1].is_whitespace() {
            next += 1;
        }
        start = next;
    }

    Ok(chunks)
}
