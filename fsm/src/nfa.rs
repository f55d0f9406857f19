use std::fmt::Display;

use super::{render, EpsilonClosure, SparseSet, StateId, StateSet, Symbol, TransitionTable, FSM};

/// A nondeterministic finite automaton whose alphabet may include epsilon
/// and whose cells may hold any number of destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFA {
    table: TransitionTable<StateSet>,
    initial_state: StateId,
    final_states: StateSet,
}

impl NFA {
    /// Instantiates a new NFA.
    ///
    /// # Panics
    ///
    /// Panics if the initial state or any final state isn't a row of
    /// `table`, or if any transition references an undefined state.
    #[must_use]
    pub fn new(
        table: TransitionTable<StateSet>,
        initial_state: StateId,
        final_states: StateSet,
    ) -> Self {
        Self::try_new(table, initial_state, final_states)
            .expect("initial and final states must be rows of the transition table")
    }

    /// Instantiates a new NFA, returning `None` if the initial state or any
    /// final state isn't a row of `table`.
    pub fn try_new(
        table: TransitionTable<StateSet>,
        initial_state: StateId,
        final_states: StateSet,
    ) -> Option<Self> {
        let contains_initial_state = table.contains_state(initial_state);
        let contains_final_states = final_states
            .iter()
            .all(|&final_state| table.contains_state(final_state));

        if contains_initial_state && contains_final_states {
            table.assert_consistent();

            Some(Self {
                table,
                initial_state,
                final_states,
            })
        } else {
            None
        }
    }

    /// Returns the destinations of `(state, symbol)`, or `None` when the
    /// symbol isn't part of the alphabet.
    pub fn transitions(&self, state: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.table.get(state, symbol)
    }
}

impl FSM for NFA {
    type Cell = StateSet;

    fn table(&self) -> &TransitionTable<StateSet> {
        &self.table
    }

    fn initial_state(&self) -> StateId {
        self.initial_state
    }

    fn final_states(&self) -> &StateSet {
        &self.final_states
    }
}

impl EpsilonClosure for NFA {
    fn closure_capacity(&self) -> usize {
        self.table.closure_capacity()
    }

    fn epsilon_closure_with(&self, state: StateId, visited: &mut SparseSet) {
        self.table.epsilon_closure_with(state, visited)
    }
}

impl Display for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(self, f)
    }
}
