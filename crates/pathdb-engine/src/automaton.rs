//! Path automaton table consumed by the BFS search.
//!
//! The automaton is compiled from a property-path regular expression by the
//! query planner and handed to the engine as a finished, read-only table:
//! states, start state(s), accepting states, and labelled transitions.
//! Compilation itself is out of scope here.
//!
//! Every transition carries the direction of the index it probes. A query
//! whose free endpoint is the structural start of the path expression is
//! rewritten by the planner into the automaton for the inverse language,
//! whose transitions all point at the backward index; the search itself is
//! direction-agnostic and always walks "forward" relative to whatever
//! automaton it is given.

use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::types::EdgeTypeId;

/// Automaton state identifier.
pub type StateId = u32;

/// Which directional adjacency index a transition probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Probe the (type, from) -> (to, edge) index.
    Forward,
    /// Probe the (to, type) -> (from, edge) index.
    Backward,
}

/// One automaton transition: `(from, edge_type, to, direction)`.
///
/// Fixed for the lifetime of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub edge_type: EdgeTypeId,
    pub to: StateId,
    pub direction: Direction,
}

/// Read-only automaton table for one property-path expression.
///
/// Transitions are grouped by their from-state so the search can enumerate
/// the enabled transitions of a popped state without filtering.
///
/// An automaton with no start states or no accepting states is legal and
/// simply produces zero results.
#[derive(Debug, Clone)]
pub struct PathAutomaton {
    state_count: u32,
    start_states: Vec<StateId>,
    accepting: HashSet<StateId>,
    from_transitions: Vec<Vec<Transition>>,
}

impl PathAutomaton {
    /// Create an automaton with `state_count` states and no transitions.
    #[must_use]
    pub fn new(state_count: u32) -> Self {
        Self {
            state_count,
            start_states: Vec::new(),
            accepting: HashSet::new(),
            from_transitions: vec![Vec::new(); state_count as usize],
        }
    }

    /// Number of states in the table.
    #[must_use]
    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    /// Mark a state as a start state. Duplicates are ignored.
    pub fn add_start(&mut self, state: StateId) -> EngineResult<()> {
        self.check_state(state)?;
        if !self.start_states.contains(&state) {
            self.start_states.push(state);
        }
        Ok(())
    }

    /// Mark a state as accepting.
    pub fn add_accepting(&mut self, state: StateId) -> EngineResult<()> {
        self.check_state(state)?;
        self.accepting.insert(state);
        Ok(())
    }

    /// Add a transition `(from, edge_type, to)` probing `direction`.
    pub fn add_transition(
        &mut self,
        from: StateId,
        edge_type: EdgeTypeId,
        to: StateId,
        direction: Direction,
    ) -> EngineResult<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        self.from_transitions[from as usize].push(Transition {
            from,
            edge_type,
            to,
            direction,
        });
        Ok(())
    }

    /// Transitions enabled from `state`.
    #[must_use]
    pub fn transitions_from(&self, state: StateId) -> &[Transition] {
        &self.from_transitions[state as usize]
    }

    /// All start states, in insertion order.
    #[must_use]
    pub fn start_states(&self) -> &[StateId] {
        &self.start_states
    }

    /// Whether `state` is accepting.
    #[must_use]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    /// Whether some start state is itself accepting.
    ///
    /// When true, the anchor unchanged is a valid answer (the zero-length
    /// path) and the enumerator emits it before any index probe.
    #[must_use]
    pub fn has_accepting_start(&self) -> bool {
        self.start_states.iter().any(|s| self.accepting.contains(s))
    }

    fn check_state(&self, state: StateId) -> EngineResult<()> {
        if state >= self.state_count {
            return Err(EngineError::InvalidAutomaton(format!(
                "state {} out of bounds (state_count = {})",
                state, self.state_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `friend*`: states {0, 1}, both accepting, (0,friend,1), (1,friend,1).
    fn friend_star(friend: EdgeTypeId) -> PathAutomaton {
        let mut a = PathAutomaton::new(2);
        a.add_start(0).unwrap();
        a.add_accepting(0).unwrap();
        a.add_accepting(1).unwrap();
        a.add_transition(0, friend, 1, Direction::Forward).unwrap();
        a.add_transition(1, friend, 1, Direction::Forward).unwrap();
        a
    }

    #[test]
    fn test_transitions_grouped_by_from_state() {
        let a = friend_star(7);
        assert_eq!(a.transitions_from(0).len(), 1);
        assert_eq!(a.transitions_from(1).len(), 1);
        assert_eq!(a.transitions_from(0)[0].to, 1);
        assert_eq!(a.transitions_from(0)[0].edge_type, 7);
    }

    #[test]
    fn test_accepting_start_detection() {
        let a = friend_star(7);
        assert!(a.has_accepting_start());

        // `friend+`: start state not accepting, no zero-length path.
        let mut plus = PathAutomaton::new(2);
        plus.add_start(0).unwrap();
        plus.add_accepting(1).unwrap();
        plus.add_transition(0, 7, 1, Direction::Forward).unwrap();
        plus.add_transition(1, 7, 1, Direction::Forward).unwrap();
        assert!(!plus.has_accepting_start());
    }

    #[test]
    fn test_duplicate_start_states_collapse() {
        let mut a = PathAutomaton::new(1);
        a.add_start(0).unwrap();
        a.add_start(0).unwrap();
        assert_eq!(a.start_states(), &[0]);
    }

    #[test]
    fn test_out_of_bounds_state_rejected() {
        let mut a = PathAutomaton::new(2);
        assert!(matches!(
            a.add_start(2),
            Err(EngineError::InvalidAutomaton(_))
        ));
        assert!(matches!(
            a.add_accepting(9),
            Err(EngineError::InvalidAutomaton(_))
        ));
        assert!(matches!(
            a.add_transition(0, 1, 2, Direction::Forward),
            Err(EngineError::InvalidAutomaton(_))
        ));
    }

    #[test]
    fn test_empty_automaton_is_legal() {
        let a = PathAutomaton::new(0);
        assert!(a.start_states().is_empty());
        assert!(!a.has_accepting_start());
    }
}
