//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the entry point or an edge references
//! an unknown node, or a node has no (or more than one) outgoing rule.

use thiserror::Error;

/// Error when compiling a state graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// A key used by the entry point or an edge was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// `set_entry_point` was never called.
    #[error("graph has no entry point")]
    MissingEntry,

    /// A registered node has no outgoing edge, so the run could never leave it.
    #[error("node has no outgoing edge: {0}")]
    MissingEdge(String),

    /// A node was given more than one outgoing rule.
    #[error("node has more than one outgoing edge: {0}")]
    DuplicateEdge(String),
}
