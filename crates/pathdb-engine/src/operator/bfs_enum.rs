//! Automaton-guided BFS enumeration of property-path endpoints.
//!
//! `PathBfsEnum` evaluates a property path with exactly one bound endpoint
//! and enumerates every node the free endpoint may take. The search runs
//! over pairs (node, automaton state): a move from `(n1, s1)` to
//! `(n2, s2)` exists only if the graph holds an edge `(n1, type, n2)` in
//! the direction named by an automaton transition `(s1, type, s2)`.
//!
//! The search is endpoint-direction agnostic. When the free endpoint is
//! the structural start of the path expression, the planner hands this
//! operator the rewritten automaton for the inverse language, whose
//! transitions all probe the backward index; nothing here changes.
//!
//! Results are produced one per `next()` call. A call that discovers a new
//! accepting pair returns immediately with the frontier left mid-drain;
//! the probe iterator is a scoped local and is released on every exit
//! path. The following call rescans the front state's transitions from
//! the beginning and the visited set silently swallows everything already
//! discovered, so nothing is ever expanded or reported twice.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use super::search_state::SearchState;
use super::{BindingIter, Term};
use crate::automaton::{Direction, PathAutomaton, Transition};
use crate::binding::{Binding, VarId};
use crate::error::{EngineError, EngineResult};
use crate::storage::keys::{self, RangeKey};
use crate::storage::store::AdjacencyScan;
use crate::storage::{GraphStore, KEY_LEN};
use crate::types::NodeId;

/// Evaluation lifecycle tag, dispatched at the top of begin/next.
///
/// Replaces an implicit "is_first" boolean so a forgotten reset or an
/// out-of-order call fails fast instead of producing stale results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// begin() has not run; next() is a protocol violation.
    NotStarted,
    /// The anchor's start state is accepting: emit the zero-length path
    /// before any index probe.
    EmitZeroLength,
    /// Frontier drain in progress.
    Draining,
    /// Frontier empty (or anchor absent): no further results.
    Exhausted,
}

/// BFS enumerator for a property path with one bound endpoint.
#[derive(Debug)]
pub struct PathBfsEnum {
    // Wired at construction
    store: GraphStore,
    automaton: Arc<PathAutomaton>,
    start: Term,
    end: VarId,
    /// Reserved for intermediate-node materialization; assign_nulls clears
    /// it, nothing sets it.
    path_var: Option<VarId>,

    // Evaluation state, fresh per begin()
    phase: Phase,
    /// Resolved anchor, cached once the existence gate passes.
    anchor: Option<NodeId>,
    frontier: VecDeque<SearchState>,
    visited: HashSet<SearchState>,

    // Reusable probe bounds, overwritten in place per probe
    lower: RangeKey,
    upper: RangeKey,

    // Statistics, surfaced through analyze() only
    results_found: u64,
    index_probes: u64,
}

impl PathBfsEnum {
    /// Wire an enumerator against a store and a finished automaton.
    #[must_use]
    pub fn new(
        store: GraphStore,
        automaton: PathAutomaton,
        start: Term,
        end: VarId,
        path_var: Option<VarId>,
    ) -> Self {
        Self {
            store,
            automaton: Arc::new(automaton),
            start,
            end,
            path_var,
            phase: Phase::NotStarted,
            anchor: None,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            lower: [0u8; KEY_LEN],
            upper: [0u8; KEY_LEN],
            results_found: 0,
            index_probes: 0,
        }
    }

    /// Seed frontier and visited with (anchor, start state) pairs and pick
    /// the entry phase.
    fn seed(&mut self, anchor: NodeId) {
        self.frontier.clear();
        self.visited.clear();
        for &state in self.automaton.start_states() {
            let search_state = SearchState::new(anchor, state);
            if self.visited.insert(search_state) {
                self.frontier.push_back(search_state);
            }
        }
        self.phase = if self.automaton.has_accepting_start() {
            Phase::EmitZeroLength
        } else {
            Phase::Draining
        };
        log::debug!(
            "seeded anchor={} start_states={} zero_length={}",
            anchor,
            self.frontier.len(),
            self.phase == Phase::EmitZeroLength
        );
    }

    /// Build the directional index probe for one transition.
    ///
    /// Fills the reusable range buffers for the (edge_type, anchor) pair
    /// and opens the scan. Each call counts exactly one probe.
    fn set_iter<'a>(
        &mut self,
        store: &'a GraphStore,
        transition: &Transition,
        current: SearchState,
    ) -> EngineResult<AdjacencyScan<'a>> {
        match transition.direction {
            Direction::Forward => keys::fill_forward_bounds(
                &mut self.lower,
                &mut self.upper,
                transition.edge_type,
                current.node,
            ),
            Direction::Backward => keys::fill_backward_bounds(
                &mut self.lower,
                &mut self.upper,
                current.node,
                transition.edge_type,
            ),
        }
        self.index_probes += 1;
        store.scan(transition.direction, &self.lower, &self.upper)
    }

    /// Drain the frontier until a new accepting pair is found or the
    /// frontier empties.
    fn drain(&mut self, binding: &mut Binding) -> EngineResult<bool> {
        let automaton = Arc::clone(&self.automaton);
        let store = self.store.clone();

        // The front state is popped only after all its transitions were
        // fully scanned; an early return leaves it in place for resumption.
        while let Some(current) = self.frontier.front().copied() {
            for transition in automaton.transitions_from(current.state) {
                let scan = self.set_iter(&store, transition, current)?;
                for entry in scan {
                    let (neighbor, _edge_id) = entry?;
                    let candidate = SearchState::new(neighbor, transition.to);
                    // Already-visited candidates are discarded silently:
                    // multi-edge and independently-reached duplicates are
                    // indistinguishable here by design.
                    if self.visited.insert(candidate) {
                        self.frontier.push_back(candidate);
                        if automaton.is_accepting(candidate.state) {
                            binding.set(self.end, neighbor);
                            self.results_found += 1;
                            log::debug!("emit end={} via state={}", neighbor, candidate.state);
                            return Ok(true);
                        }
                    }
                }
            }
            self.frontier.pop_front();
        }

        self.phase = Phase::Exhausted;
        log::debug!(
            "exhausted: results_found={} index_probes={}",
            self.results_found,
            self.index_probes
        );
        Ok(false)
    }
}

impl BindingIter for PathBfsEnum {
    fn begin(&mut self, binding: &Binding) -> EngineResult<()> {
        let anchor = match self.start {
            Term::Node(node) => node,
            Term::Var(var) => binding
                .get(var)
                .ok_or(EngineError::UnboundStartVariable(var))?,
        };

        self.results_found = 0;
        self.index_probes = 0;
        self.frontier.clear();
        self.visited.clear();

        // Existence gate: an absent anchor yields zero results and zero
        // probes, an ordinary empty completion.
        if !self.store.contains_node(anchor)? {
            self.anchor = None;
            self.phase = Phase::Exhausted;
            log::debug!("anchor {} not in node index, evaluation exhausted", anchor);
            return Ok(());
        }

        self.anchor = Some(anchor);
        self.seed(anchor);
        Ok(())
    }

    fn next(&mut self, binding: &mut Binding) -> EngineResult<bool> {
        match self.phase {
            Phase::NotStarted => Err(EngineError::IterNotBegun),
            Phase::Exhausted => Ok(false),
            Phase::EmitZeroLength => {
                // The anchor unchanged is itself a valid answer.
                let anchor = self.anchor.ok_or(EngineError::IterNotBegun)?;
                binding.set(self.end, anchor);
                self.results_found += 1;
                self.phase = Phase::Draining;
                log::debug!("emit zero-length path end={}", anchor);
                Ok(true)
            }
            Phase::Draining => self.drain(binding),
        }
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.results_found = 0;
        self.index_probes = 0;

        match self.phase {
            // reset before begin stays un-begun
            Phase::NotStarted => {}
            _ => match self.anchor {
                Some(anchor) => self.seed(anchor),
                // begin() established the anchor does not exist
                None => self.phase = Phase::Exhausted,
            },
        }
    }

    fn assign_nulls(&self, binding: &mut Binding) {
        binding.unset(self.end);
        if let Some(path_var) = self.path_var {
            binding.unset(path_var);
        }
    }

    fn analyze(&self, indent: usize) -> String {
        format!(
            "{:indent$}PathBfsEnum(results_found: {}, index_probes: {})",
            "",
            self.results_found,
            self.index_probes,
            indent = indent
        )
    }
}
