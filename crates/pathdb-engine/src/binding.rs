//! Shared binding row flowing through the operator pipeline.
//!
//! A `Binding` is the mutable variable-to-value record that pipeline
//! operators read from and write into. The row is owned by the top of the
//! operator pipeline; operators receive it as a borrow scoped to each
//! begin/next call. An unset slot is the explicit "no value" marker used by
//! optional-match semantics.

use crate::types::NodeId;

/// Variable identifier: an index into the binding row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub u32);

/// Mutable variable-to-value row shared by a pipeline of operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    slots: Vec<Option<NodeId>>,
}

impl Binding {
    /// Create a row with `var_count` unset slots.
    #[must_use]
    pub fn new(var_count: usize) -> Self {
        Self {
            slots: vec![None; var_count],
        }
    }

    /// Read a variable. `None` means the variable carries no value.
    #[must_use]
    pub fn get(&self, var: VarId) -> Option<NodeId> {
        self.slots.get(var.0 as usize).copied().flatten()
    }

    /// Assign a value to a variable.
    ///
    /// # Panics
    /// Panics if `var` is outside the row. Operators are wired against a
    /// fixed schema, so an out-of-range var is a planner bug.
    pub fn set(&mut self, var: VarId, value: NodeId) {
        self.slots[var.0 as usize] = Some(value);
    }

    /// Clear a variable back to the explicit "no value" marker.
    pub fn unset(&mut self, var: VarId) {
        self.slots[var.0 as usize] = None;
    }

    /// Number of slots in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the row has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
