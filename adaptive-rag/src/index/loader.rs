//! Loads `*.txt` files from a directory tree into chunked passages.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::passage::Passage;

use super::chunker::{split_text, ChunkingConfig};
use super::IndexError;

/// Reads every `*.txt` file under `dir` (recursively, in file-name order) and
/// splits it into passages tagged with the file name.
///
/// A missing directory is an error; a directory without text files yields no
/// passages.
pub fn load_directory(dir: &Path, config: &ChunkingConfig) -> Result<Vec<Passage>, IndexError> {
    config.validate()?;
    if !dir.is_dir() {
        return Err(IndexError::MissingDirectory(dir.to_path_buf()));
    }

    let mut passages = Vec::new();
    let mut files = 0usize;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| IndexError::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }

        let text = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tag = entry.file_name().to_string_lossy().to_string();
        let chunks = split_text(&text, config)?;
        debug!(file = %tag, chunks = chunks.len(), "loaded");
        passages.extend(chunks.into_iter().map(|c| Passage::new(c, tag.clone())));
        files += 1;
    }

    info!(dir = %dir.display(), files, passages = passages.len(), "documents loaded");
    Ok(passages)
}

/// Describes a loaded corpus by its distinct source tags, in first-seen order.
///
/// Used as the router's default picture of the local corpus when none is configured.
pub fn describe_sources(passages: &[Passage]) -> String {
    let mut seen = HashSet::new();
    let tags: Vec<&str> = passages
        .iter()
        .map(|p| p.source_tag.as_str())
        .filter(|tag| seen.insert(*tag))
        .collect();
    if tags.is_empty() {
        return String::new();
    }
    format!("documents from the files {}", tags.join(", "))
}
