//! Passage: one unit of retrieved or searched evidence.

use serde::{Deserialize, Serialize};

/// Source tag given to the synthetic passage built from web search snippets.
pub const WEB_SOURCE_TAG: &str = "web";

/// One retrieved unit of evidence: text plus where it came from.
///
/// Created by a `DocumentIndex` or by the web search node, dropped (never
/// edited) by the relevance grader. `source_tag` is for display only; no
/// grading decision reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,
    pub source_tag: String,
}

impl Passage {
    pub fn new(content: impl Into<String>, source_tag: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source_tag: source_tag.into(),
        }
    }

    /// Passage tagged as coming from web search.
    pub fn web(content: impl Into<String>) -> Self {
        Self::new(content, WEB_SOURCE_TAG)
    }

    pub fn is_web(&self) -> bool {
        self.source_tag == WEB_SOURCE_TAG
    }
}
