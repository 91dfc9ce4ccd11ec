//! The unit of BFS exploration.

use crate::automaton::StateId;
use crate::types::NodeId;

/// A (node, automaton state) pair.
///
/// Equality and hashing are structural, independent of discovery order:
/// the visited set keys on this identity to guarantee each pair is
/// expanded and reported at most once per evaluation. The edge used to
/// reach a state is deliberately not part of the identity, so parallel
/// same-typed edges collapse to a single SearchState.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub node: NodeId,
    pub state: StateId,
}

impl SearchState {
    #[must_use]
    pub fn new(node: NodeId, state: StateId) -> Self {
        Self { node, state }
    }
}
