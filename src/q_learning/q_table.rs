//! Value table mapping (state, action) pairs to return estimates

use std::collections::HashMap;

use crate::{
    q_learning::snapshot::{QTableSnapshot, SnapshotEntry},
    types::{Heading, State, StateAction},
};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Entries are created lazily on first write; an absent entry reads as 0.0.
/// Nothing is ever evicted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    q_values: HashMap<StateAction, f64>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &State, action: Heading) -> f64 {
        self.q_values
            .get(&StateAction::new(*state, action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: State, action: Heading, value: f64) {
        self.q_values.insert(StateAction::new(state, action), value);
    }

    /// Get maximum Q-value over `actions` in a state, or 0.0 when `actions` is empty
    pub fn max_value(&self, state: &State, actions: &[Heading]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Index of the greedy action in `actions`
    ///
    /// Ties resolve to the first maximum in slice order. Returns 0 for an
    /// empty slice.
    pub fn greedy_index(&self, state: &State, actions: &[Heading]) -> usize {
        let mut best_index = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (index, &action) in actions.iter().enumerate() {
            let value = self.get(state, action);
            if value > best_value {
                best_value = value;
                best_index = index;
            }
        }
        best_index
    }

    /// Iterate over all stored entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&StateAction, &f64)> {
        self.q_values.iter()
    }

    /// Reset all Q-values
    pub fn clear(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Flatten the table into a snapshot with entries sorted by key
    pub fn to_snapshot(&self) -> QTableSnapshot {
        let mut entries: Vec<SnapshotEntry> = self
            .q_values
            .iter()
            .map(|(key, &value)| SnapshotEntry {
                state: key.state,
                action: key.action,
                value,
            })
            .collect();
        entries.sort_by_key(|entry| StateAction::new(entry.state, entry.action));
        QTableSnapshot::new(entries)
    }

    /// Rebuild a table from a snapshot; later duplicates overwrite earlier ones
    pub fn from_snapshot(snapshot: QTableSnapshot) -> Self {
        let q_values = snapshot
            .entries
            .into_iter()
            .map(|entry| (StateAction::new(entry.state, entry.action), entry.value))
            .collect();
        Self { q_values }
    }
}
