//! Property-path query execution core.
//!
//! This crate evaluates property-path expressions: regular-expression
//! constrained reachability queries between two graph endpoints where
//! exactly one endpoint is already bound (a constant, or a value produced
//! by an earlier pipeline stage). The engine enumerates every value the
//! free endpoint may take, one result per `next()` call, without ever
//! materializing the product of graph and automaton.
//!
//! # Architecture
//!
//! - **types**: Integer id surrogates (NodeId, EdgeTypeId, EdgeId)
//! - **error**: Comprehensive error handling with EngineError
//! - **automaton**: Read-only path automaton table (states, transitions)
//! - **binding**: Shared mutable variable-to-value row for the pipeline
//! - **storage**: RocksDB backend with directional adjacency indexes
//! - **operator**: Pull-protocol operators; `PathBfsEnum` is the core
//!
//! # Evaluation model
//!
//! The search walks pairs (node, automaton state). A move from
//! `(n1, s1)` to `(n2, s2)` exists only if the graph holds an edge
//! `(n1, type, n2)` and the automaton holds a transition `(s1, type, s2)`.
//! Every transition names the directional index it probes, so a query with
//! the free endpoint on the left is evaluated with the rewritten automaton
//! for the inverse language and the search itself never changes.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathdb_engine::automaton::{Direction, PathAutomaton};
//! use pathdb_engine::binding::{Binding, VarId};
//! use pathdb_engine::operator::{BindingIter, PathBfsEnum, Term};
//! use pathdb_engine::storage::GraphStore;
//!
//! let store = GraphStore::open_default("/tmp/graph.db")?;
//! let friend = 7u64;
//! store.add_edge(1, friend, 2)?;
//!
//! // friend* : both states accepting, 0 -friend-> 1, 1 -friend-> 1
//! let mut automaton = PathAutomaton::new(2);
//! automaton.add_start(0)?;
//! automaton.add_accepting(0)?;
//! automaton.add_accepting(1)?;
//! automaton.add_transition(0, friend, 1, Direction::Forward)?;
//! automaton.add_transition(1, friend, 1, Direction::Forward)?;
//!
//! let end = VarId(0);
//! let mut binding = Binding::new(1);
//! let mut iter = PathBfsEnum::new(store, automaton, Term::Node(1), end, None);
//! iter.begin(&binding)?;
//! while iter.next(&mut binding)? {
//!     println!("reachable: {:?}", binding.get(end));
//! }
//! ```

pub mod automaton;
pub mod binding;
pub mod error;
pub mod operator;
pub mod storage;
pub mod types;

// Re-exports for convenience
pub use automaton::{Direction, PathAutomaton, StateId, Transition};
pub use binding::{Binding, VarId};
pub use error::{EngineError, EngineResult};
pub use operator::{BindingIter, PathBfsEnum, SearchState, Term};
pub use storage::{
    EdgeRecord, GraphStore, StorageConfig, ALL_COLUMN_FAMILIES, CF_BWD_EDGES, CF_EDGES,
    CF_FWD_EDGES, CF_METADATA, CF_NODES,
};
pub use types::{EdgeId, EdgeTypeId, NodeId};
