//! Where the graph goes after a node.

/// Next step chosen by an edge: run another node, or end the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Next<K> {
    /// Run the node registered under this key.
    Node(K),
    /// Stop; the current state is the result of the run.
    End,
}

impl<K> From<K> for Next<K> {
    fn from(key: K) -> Self {
        Next::Node(key)
    }
}
