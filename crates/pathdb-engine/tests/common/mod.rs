//! Shared fixtures for integration tests.
//!
//! All tests run against REAL RocksDB instances in temp directories - no
//! mocks. The TempDir handle must stay alive for the store's lifetime.

#![allow(dead_code)]

use pathdb_engine::automaton::{Direction, PathAutomaton};
use pathdb_engine::binding::{Binding, VarId};
use pathdb_engine::operator::{BindingIter, PathBfsEnum};
use pathdb_engine::storage::GraphStore;
use pathdb_engine::types::{EdgeTypeId, NodeId};
use tempfile::TempDir;

pub struct TestGraph {
    pub store: GraphStore,
    pub dir: TempDir,
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Open an empty store in a fresh temp directory.
pub fn open_store() -> TestGraph {
    init_logs();
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = GraphStore::open_default(dir.path().join("graph.db")).expect("failed to open store");
    TestGraph { store, dir }
}

/// Open a store pre-loaded with `(from, edge_type, to)` edges.
pub fn graph_with_edges(edges: &[(NodeId, EdgeTypeId, NodeId)]) -> TestGraph {
    let graph = open_store();
    for &(from, edge_type, to) in edges {
        graph.store.add_edge(from, edge_type, to).expect("add_edge failed");
    }
    graph
}

/// Automaton for `t*`: states {0, 1}, both accepting, (0,t,1), (1,t,1).
pub fn star(edge_type: EdgeTypeId) -> PathAutomaton {
    let mut a = PathAutomaton::new(2);
    a.add_start(0).unwrap();
    a.add_accepting(0).unwrap();
    a.add_accepting(1).unwrap();
    a.add_transition(0, edge_type, 1, Direction::Forward).unwrap();
    a.add_transition(1, edge_type, 1, Direction::Forward).unwrap();
    a
}

/// Automaton for `t+`: like `star` but the start state does not accept.
pub fn plus(edge_type: EdgeTypeId) -> PathAutomaton {
    let mut a = PathAutomaton::new(2);
    a.add_start(0).unwrap();
    a.add_accepting(1).unwrap();
    a.add_transition(0, edge_type, 1, Direction::Forward).unwrap();
    a.add_transition(1, edge_type, 1, Direction::Forward).unwrap();
    a
}

/// Automaton for `(^t)*`: the rewritten inverse of `t*`, every transition
/// probing the backward index.
pub fn star_inverse(edge_type: EdgeTypeId) -> PathAutomaton {
    let mut a = PathAutomaton::new(2);
    a.add_start(0).unwrap();
    a.add_accepting(0).unwrap();
    a.add_accepting(1).unwrap();
    a.add_transition(0, edge_type, 1, Direction::Backward).unwrap();
    a.add_transition(1, edge_type, 1, Direction::Backward).unwrap();
    a
}

/// Drive the enumerator to exhaustion, collecting the emitted endpoints in
/// order.
pub fn drain_all(iter: &mut PathBfsEnum, binding: &mut Binding, end: VarId) -> Vec<NodeId> {
    let mut results = Vec::new();
    while iter.next(binding).expect("next() failed") {
        results.push(binding.get(end).expect("end variable must be set after a result"));
    }
    results
}
