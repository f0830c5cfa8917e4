//! State graph builder: nodes keyed by `K`, an entry point, one outgoing rule per node.
//!
//! Add nodes with `add_node`, choose the first node with `set_entry_point`,
//! then give each node either a fixed edge (`add_edge`, `add_finish`) or a
//! transition function over its verdict (`add_conditional_edges`). `compile`
//! validates the structure and returns a `CompiledStateGraph`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::RagError;
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::next::Next;
use crate::graph::node::{GraphKey, Node};
use crate::graph::node_middleware::NodeMiddleware;

/// Node steps allowed per run before `RagError::RecursionLimit` (LangGraph's default).
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Transition function of a conditional edge: verdict and new state in, next step out.
pub(super) type TransitionFn<S, K, V> =
    Arc<dyn Fn(&V, &S) -> Result<Next<K>, RagError> + Send + Sync>;

/// Outgoing rule of one node.
pub(super) enum Edge<S, K, V> {
    Fixed(Next<K>),
    Conditional(TransitionFn<S, K, V>),
}

impl<S, K: Copy, V> Clone for Edge<S, K, V> {
    fn clone(&self) -> Self {
        match self {
            Edge::Fixed(next) => Edge::Fixed(*next),
            Edge::Conditional(f) => Edge::Conditional(Arc::clone(f)),
        }
    }
}

/// State graph over state `S`, node keys `K` and node verdicts `V`.
///
/// **Interaction**: Accepts `Arc<dyn Node<S, V>>`; produces `CompiledStateGraph<S, K, V>`.
/// Middleware and the recursion limit are carried into the compiled graph.
pub struct StateGraph<S, K, V> {
    nodes: HashMap<K, Arc<dyn Node<S, V>>>,
    edges: Vec<(K, Edge<S, K, V>)>,
    entry: Option<K>,
    middleware: Option<Arc<dyn NodeMiddleware<S, V>>>,
    recursion_limit: usize,
}

impl<S, K, V> Default for StateGraph<S, K, V>
where
    S: Clone + Send + Sync + 'static,
    K: GraphKey,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K, V> StateGraph<S, K, V>
where
    S: Clone + Send + Sync + 'static,
    K: GraphKey,
    V: Send + Sync + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            entry: None,
            middleware: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Adds a node under `key`. Replaces if the same key is added twice.
    pub fn add_node(&mut self, key: K, node: Arc<dyn Node<S, V>>) -> &mut Self {
        self.nodes.insert(key, node);
        self
    }

    /// Sets the node every run starts with.
    pub fn set_entry_point(&mut self, key: K) -> &mut Self {
        self.entry = Some(key);
        self
    }

    /// Unconditional edge: after `from`, always go to `to` (a key or `Next::End`).
    pub fn add_edge(&mut self, from: K, to: impl Into<Next<K>>) -> &mut Self {
        self.edges.push((from, Edge::Fixed(to.into())));
        self
    }

    /// Unconditional edge from `from` to the end of the run.
    pub fn add_finish(&mut self, from: K) -> &mut Self {
        self.add_edge(from, Next::End)
    }

    /// Conditional edge: after `from`, `transition(verdict, state)` picks the next step.
    ///
    /// An `Err` from the transition aborts the run with that error.
    pub fn add_conditional_edges<F>(&mut self, from: K, transition: F) -> &mut Self
    where
        F: Fn(&V, &S) -> Result<Next<K>, RagError> + Send + Sync + 'static,
    {
        self.edges
            .push((from, Edge::Conditional(Arc::new(transition))));
        self
    }

    /// Wraps every node run with `middleware`.
    pub fn with_middleware(mut self, middleware: Arc<dyn NodeMiddleware<S, V>>) -> Self {
        self.middleware = Some(middleware);
        self
    }

    /// Maximum node steps per run; exceeding it fails with `RagError::RecursionLimit`.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Builds the executable graph.
    ///
    /// Checks that the entry point and every edge endpoint are registered, and
    /// that each node has exactly one outgoing rule. Targets chosen at run time by
    /// conditional edges are checked when the edge fires.
    pub fn compile(self) -> Result<CompiledStateGraph<S, K, V>, CompilationError> {
        let entry = self.entry.ok_or(CompilationError::MissingEntry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(CompilationError::NodeNotFound(entry.to_string()));
        }

        let mut seen = HashSet::new();
        let mut edges = HashMap::new();
        for (from, edge) in self.edges {
            if !self.nodes.contains_key(&from) {
                return Err(CompilationError::NodeNotFound(from.to_string()));
            }
            if let Edge::Fixed(Next::Node(to)) = &edge {
                if !self.nodes.contains_key(to) {
                    return Err(CompilationError::NodeNotFound(to.to_string()));
                }
            }
            if !seen.insert(from) {
                return Err(CompilationError::DuplicateEdge(from.to_string()));
            }
            edges.insert(from, edge);
        }

        // Deterministic error for the missing-edge case regardless of hash order.
        let mut without_edge: Vec<String> = self
            .nodes
            .keys()
            .filter(|k| !edges.contains_key(*k))
            .map(ToString::to_string)
            .collect();
        without_edge.sort();
        if let Some(first) = without_edge.into_iter().next() {
            return Err(CompilationError::MissingEdge(first));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            edges,
            entry,
            middleware: self.middleware,
            recursion_limit: self.recursion_limit,
        })
    }
}
