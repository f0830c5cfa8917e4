//! StateGraph compile failure cases: unknown node, missing entry, missing or duplicate edge.

use std::fmt;
use std::sync::Arc;

use adaptive_rag::{CompilationError, Next, Node, RagError, StateGraph};
use async_trait::async_trait;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Key {
    A,
    B,
    Missing,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Key::A => "a",
            Key::B => "b",
            Key::Missing => "missing",
        };
        f.write_str(s)
    }
}

struct Noop;

#[async_trait]
impl Node<u32, ()> for Noop {
    fn id(&self) -> &str {
        "noop"
    }

    async fn run(&self, state: u32) -> Result<(u32, ()), RagError> {
        Ok((state, ()))
    }
}

fn graph() -> StateGraph<u32, Key, ()> {
    let mut g = StateGraph::new();
    g.add_node(Key::A, Arc::new(Noop)).add_node(Key::B, Arc::new(Noop));
    g
}

#[test]
fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut g = graph();
    g.set_entry_point(Key::A)
        .add_edge(Key::A, Key::Missing)
        .add_finish(Key::B);
    match g.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("expected NodeNotFound, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_without_entry_point() {
    let mut g = graph();
    g.add_edge(Key::A, Key::B).add_finish(Key::B);
    assert_eq!(g.compile().err(), Some(CompilationError::MissingEntry));
}

#[test]
fn compile_fails_when_entry_is_not_registered() {
    let mut g = graph();
    g.set_entry_point(Key::Missing)
        .add_edge(Key::A, Key::B)
        .add_finish(Key::B);
    assert_eq!(
        g.compile().err(),
        Some(CompilationError::NodeNotFound("missing".into()))
    );
}

/// **Scenario**: Every node needs an outgoing rule, otherwise a run could stall.
#[test]
fn compile_fails_when_node_has_no_outgoing_edge() {
    let mut g = graph();
    g.set_entry_point(Key::A).add_edge(Key::A, Key::B);
    assert_eq!(
        g.compile().err(),
        Some(CompilationError::MissingEdge("b".into()))
    );
}

/// **Scenario**: A fixed edge and a conditional edge from the same node conflict.
#[test]
fn compile_fails_on_duplicate_outgoing_rule() {
    let mut g = graph();
    g.set_entry_point(Key::A)
        .add_edge(Key::A, Key::B)
        .add_conditional_edges(Key::A, |_, _| Ok(Next::End))
        .add_finish(Key::B);
    assert_eq!(
        g.compile().err(),
        Some(CompilationError::DuplicateEdge("a".into()))
    );
}

#[test]
fn valid_graph_compiles() {
    let mut g = graph();
    g.set_entry_point(Key::A)
        .add_edge(Key::A, Key::B)
        .add_finish(Key::B);
    let compiled = g.compile().expect("compiles");
    assert_eq!(compiled.entry(), Key::A);
}
