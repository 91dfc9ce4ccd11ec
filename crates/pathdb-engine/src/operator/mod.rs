//! Pull-protocol query operators.
//!
//! Operators share a one-result-per-call protocol: the enclosing pipeline
//! drives an operator through `begin`/`next`, and a `next()` call that
//! finds a result returns with the operator's internal state left exactly
//! where it was, ready to resume on the following call. Suspension is
//! purely protocol-level; there is no scheduler and no concurrency.
//!
//! # Module Structure
//!
//! - [`search_state`]: the (node, automaton state) unit of exploration
//! - [`bfs_enum`]: `PathBfsEnum`, the automaton-guided BFS enumerator

pub mod bfs_enum;
pub mod search_state;

pub use bfs_enum::PathBfsEnum;
pub use search_state::SearchState;

use crate::binding::{Binding, VarId};
use crate::error::EngineResult;
use crate::types::NodeId;

/// The bound endpoint of a property path: either a fixed literal or a
/// variable assigned by an upstream operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Read the endpoint from the binding at `begin`.
    Var(VarId),
    /// The endpoint is this constant node.
    Node(NodeId),
}

/// Pull-operator surface shared by pipeline operators.
///
/// The binding row is owned by the top of the pipeline; operators borrow
/// it per call rather than holding a reference across calls.
pub trait BindingIter {
    /// Initialize an evaluation against the incoming binding.
    fn begin(&mut self, binding: &Binding) -> EngineResult<()>;

    /// Produce one result into the binding, or signal exhaustion.
    ///
    /// Returns `Ok(true)` with the output variables assigned, `Ok(false)`
    /// once no further results exist. Storage faults propagate as errors
    /// and abort the evaluation.
    fn next(&mut self, binding: &mut Binding) -> EngineResult<bool>;

    /// Reinitialize for a fresh drain over the same anchor. Never appends
    /// to prior state.
    fn reset(&mut self);

    /// Set this operator's output variables to the explicit "no value"
    /// marker, leaving search state untouched. Used by enclosing
    /// optional-match operators.
    fn assign_nulls(&self, binding: &mut Binding);

    /// Indented diagnostic line: operator identity plus accumulated
    /// counters. Purely observational.
    fn analyze(&self, indent: usize) -> String;
}
