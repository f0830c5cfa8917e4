//! Events emitted by `CompiledStateGraph::stream`.

use std::fmt::Debug;

use crate::error::RagError;

/// Streamed event emitted while running a graph.
#[derive(Debug)]
pub enum StreamEvent<S, K>
where
    S: Debug,
    K: Debug,
{
    /// A node finished; `state` is the state it returned.
    Updates { node: K, state: S },
    /// The run ended: final state, or the error that aborted it. Always the last event.
    Finished(Result<S, RagError>),
}
