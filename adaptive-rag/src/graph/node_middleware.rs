//! Node middleware: wraps every node run of a compiled graph.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::RagError;

/// Future returned by the wrapped node run.
pub type NodeRunFuture<S, V> = Pin<Box<dyn Future<Output = Result<(S, V), RagError>> + Send>>;

/// The wrapped node run, handed to the middleware to call (once).
pub type NodeRunFn<S, V> = Box<dyn FnOnce(S) -> NodeRunFuture<S, V> + Send>;

/// Around-advice for node execution (logging, timing, state inspection).
///
/// Set with `StateGraph::with_middleware`; the compiled graph calls
/// `around_run` instead of `Node::run` and the middleware decides when to call `inner`.
#[async_trait]
pub trait NodeMiddleware<S, V>: Send + Sync
where
    S: Send + 'static,
    V: Send + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S, V>,
    ) -> Result<(S, V), RagError>;
}
