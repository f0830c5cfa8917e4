//! Node trait: one step of a state graph.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;

use crate::error::RagError;

/// Key a node is registered under (typically a fieldless enum).
pub trait GraphKey: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> GraphKey for T where T: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

/// One graph step: receives the state, returns the new state and a verdict.
///
/// The verdict `V` is what the node's outgoing edge decides on; nodes never
/// name their successor themselves.
///
/// **Interaction**: Registered with `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke`, optionally wrapped by a `NodeMiddleware`.
#[async_trait]
pub trait Node<S, V>: Send + Sync
where
    S: Send + 'static,
    V: Send + 'static,
{
    /// Name used in logs.
    fn id(&self) -> &str;

    async fn run(&self, state: S) -> Result<(S, V), RagError>;
}
