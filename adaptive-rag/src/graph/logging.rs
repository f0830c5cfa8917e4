//! Logging for graph execution: run-level events and a node middleware.

use std::fmt::Debug;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::RagError;

use super::node_middleware::{NodeMiddleware, NodeRunFn};

pub(super) fn log_graph_start(entry: &dyn Debug) {
    debug!(?entry, "Starting graph execution");
}

pub(super) fn log_node_start(node_id: &str, step: usize) {
    debug!(node_id, step, "Starting node execution");
}

pub(super) fn log_node_complete(node_id: &str, next: &dyn Debug) {
    debug!(node_id, ?next, "Node execution complete");
}

pub(super) fn log_graph_complete(steps: usize) {
    debug!(steps, "Graph execution complete");
}

pub(super) fn log_stream_abandoned() {
    debug!("Stream receiver dropped, graph execution stopped");
}

pub(super) fn log_graph_error(error: &RagError) {
    error!(%error, "Graph execution error");
}

/// Middleware that logs node enter/exit, the verdict and elapsed time.
///
/// Logs at info level so `RUST_LOG=info` shows the path a run took.
pub struct LoggingNodeMiddleware;

#[async_trait]
impl<S, V> NodeMiddleware<S, V> for LoggingNodeMiddleware
where
    S: Send + 'static,
    V: Debug + Send + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S, V>,
    ) -> Result<(S, V), RagError> {
        info!(node = node_id, "enter");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok((_, verdict)) => info!(node = node_id, ?verdict, elapsed_ms, "exit"),
            Err(e) => info!(node = node_id, error = %e, elapsed_ms, "exit"),
        }
        result
    }
}
