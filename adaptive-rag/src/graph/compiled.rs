//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Starts every run at the entry node; after each
//! node, the node's outgoing rule (fixed or conditional on the verdict) picks the
//! next node or ends the run.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::RagError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_stream_abandoned,
};
use super::next::Next;
use super::node::{GraphKey, Node};
use super::node_middleware::NodeMiddleware;
use super::state_graph::Edge;
use super::stream::StreamEvent;

/// Compiled graph: immutable structure, cheap to clone, safe to run concurrently.
///
/// Each `invoke` owns its state; nodes and middleware are shared behind `Arc`.
pub struct CompiledStateGraph<S, K, V> {
    pub(super) nodes: HashMap<K, Arc<dyn Node<S, V>>>,
    pub(super) edges: HashMap<K, Edge<S, K, V>>,
    pub(super) entry: K,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S, V>>>,
    pub(super) recursion_limit: usize,
}

impl<S, K: Copy, V> Clone for CompiledStateGraph<S, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            entry: self.entry,
            middleware: self.middleware.clone(),
            recursion_limit: self.recursion_limit,
        }
    }
}

impl<S, K, V> CompiledStateGraph<S, K, V>
where
    S: Clone + Send + Sync + Debug + 'static,
    K: GraphKey,
    V: Debug + Send + Sync + 'static,
{
    /// Runs the graph from the entry node until an edge returns `Next::End`.
    ///
    /// Fails with the first node or transition error, or with
    /// `RagError::RecursionLimit` when more than `recursion_limit` nodes ran.
    pub async fn invoke(&self, state: S) -> Result<S, RagError> {
        let result = self.run_loop(state, None).await;
        if let Err(e) = &result {
            log_graph_error(e);
        }
        result
    }

    /// Runs the graph in a background task, emitting one `Updates` event per
    /// finished node and a final `Finished` event with the run result.
    ///
    /// Dropping the returned stream stops the run after the node in progress.
    pub fn stream(&self, state: S) -> ReceiverStream<StreamEvent<S, K>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();

        tokio::spawn(async move {
            let result = graph.run_loop(state, Some(&tx)).await;
            if tx.is_closed() {
                log_stream_abandoned();
                return;
            }
            if let Err(e) = &result {
                log_graph_error(e);
            }
            let _ = tx.send(StreamEvent::Finished(result)).await;
        });

        ReceiverStream::new(rx)
    }

    /// Entry node key.
    pub fn entry(&self) -> K {
        self.entry
    }

    /// Maximum node steps per run.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    async fn run_loop(
        &self,
        mut state: S,
        updates: Option<&mpsc::Sender<StreamEvent<S, K>>>,
    ) -> Result<S, RagError> {
        log_graph_start(&self.entry);
        let mut current = self.entry;
        let mut steps = 0usize;
        loop {
            if steps >= self.recursion_limit {
                return Err(RagError::RecursionLimit {
                    limit: self.recursion_limit,
                });
            }
            steps += 1;

            let node_id = current.to_string();
            log_node_start(&node_id, steps);
            let (new_state, verdict) = self.run_node(current, state).await?;

            if let Some(tx) = updates {
                let event = StreamEvent::Updates {
                    node: current,
                    state: new_state.clone(),
                };
                if tx.send(event).await.is_err() {
                    return Err(RagError::ExecutionFailed(
                        "stream receiver dropped".into(),
                    ));
                }
            }

            let next = self.next_step(current, &verdict, &new_state)?;
            log_node_complete(&node_id, &next);
            state = new_state;

            match next {
                Next::End => {
                    log_graph_complete(steps);
                    return Ok(state);
                }
                Next::Node(key) => {
                    if !self.nodes.contains_key(&key) {
                        return Err(RagError::ExecutionFailed(format!(
                            "edge from {} leads to unknown node {}",
                            current, key
                        )));
                    }
                    current = key;
                }
            }
        }
    }

    async fn run_node(&self, key: K, state: S) -> Result<(S, V), RagError> {
        let node = self
            .nodes
            .get(&key)
            .cloned()
            .ok_or_else(|| RagError::ExecutionFailed(format!("node not found: {}", key)))?;

        match &self.middleware {
            Some(middleware) => {
                let node_id = node.id().to_string();
                middleware
                    .around_run(
                        &node_id,
                        state,
                        Box::new(move |s| Box::pin(async move { node.run(s).await })),
                    )
                    .await
            }
            None => node.run(state).await,
        }
    }

    fn next_step(&self, key: K, verdict: &V, state: &S) -> Result<Next<K>, RagError> {
        match self.edges.get(&key) {
            Some(Edge::Fixed(next)) => Ok(*next),
            Some(Edge::Conditional(transition)) => (transition.as_ref())(verdict, state),
            None => Err(RagError::ExecutionFailed(format!(
                "node has no outgoing edge: {}",
                key
            ))),
        }
    }
}
