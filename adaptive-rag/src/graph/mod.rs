//! State graph: typed nodes + conditional edges, compile and invoke.
//!
//! Aligns with LangGraph `StateGraph`: register nodes under a step key, set the
//! entry point, give every node one outgoing rule (a fixed edge or a transition
//! function over the node's verdict), compile, then invoke with a state.

mod compile_error;
mod compiled;
mod logging;
mod next;
mod node;
mod node_middleware;
mod state_graph;
mod stream;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use logging::LoggingNodeMiddleware;
pub use next::Next;
pub use node::{GraphKey, Node};
pub use node_middleware::{NodeMiddleware, NodeRunFn, NodeRunFuture};
pub use state_graph::{StateGraph, DEFAULT_RECURSION_LIMIT};
pub use stream::StreamEvent;
