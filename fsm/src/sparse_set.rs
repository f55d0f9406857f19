//! Provides a SparseSet of state identifiers as an alternative to HashSets
//! when tracking visited states during a traversal.

use super::StateId;

/// A set of states with constant time insertion and membership
/// that iterates in insertion order.
pub struct SparseSet {
    dense: Vec<StateId>,
    sparse: Vec<usize>,
}

impl SparseSet {
    /// Initializes a new set taking a value representing the number of
    /// states it is expected to hold.
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            dense: Vec::with_capacity(max_len),
            sparse: vec![0; max_len],
        }
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the number of states the set can track without resizing.
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Inserts a state into the set, returning `true` if it wasn't already
    /// present.
    pub fn insert(&mut self, state: StateId) -> bool {
        if self.contains(state) {
            return false;
        }

        let idx = state.as_index();
        if self.sparse.len() <= idx {
            // double the size.
            self.resize((idx + 1) * 2)
        }

        self.sparse[idx] = self.dense.len();
        self.dense.push(state);
        true
    }

    /// Returns `true` if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        self.sparse
            .get(state.as_index())
            .map(|&dense_idx| self.dense.get(dense_idx) == Some(&state))
            // if none, the bounds of the set are exceeded and thus doesn't
            // contain the value.
            .unwrap_or(false)
    }

    /// Iterates the members of the set in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.dense.iter().copied()
    }

    fn resize(&mut self, new_len: usize) {
        self.sparse.resize(new_len, 0)
    }
}

impl core::fmt::Debug for SparseSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SparseSet({:?})", &self.dense)
    }
}
