use std::fmt::Display;

use super::{render, StateId, StateSet, Symbol, TransitionTable, FSM};

/// A deterministic finite automaton. The alphabet never includes epsilon
/// and every `(state, symbol)` cell holds at most one destination, an empty
/// cell signifying no transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DFA {
    table: TransitionTable<Option<StateId>>,
    initial_state: StateId,
    final_states: StateSet,
}

impl DFA {
    /// Instantiates a new DFA.
    ///
    /// # Panics
    ///
    /// Panics if the initial state or any final state isn't a row of
    /// `table`, if the table carries an epsilon column, or if any transition
    /// references an undefined state.
    #[must_use]
    pub fn new(
        table: TransitionTable<Option<StateId>>,
        initial_state: StateId,
        final_states: StateSet,
    ) -> Self {
        Self::try_new(table, initial_state, final_states).expect(
            "initial and final states must be rows of an epsilon-free transition table",
        )
    }

    /// Instantiates a new DFA, returning `None` if the initial state or any
    /// final state isn't a row of `table` or if `table` has an epsilon
    /// column.
    pub fn try_new(
        table: TransitionTable<Option<StateId>>,
        initial_state: StateId,
        final_states: StateSet,
    ) -> Option<Self> {
        let contains_initial_state = table.contains_state(initial_state);
        let contains_final_states = final_states
            .iter()
            .all(|&final_state| table.contains_state(final_state));
        let epsilon_free = table.alphabet().iter().all(|symbol| !symbol.is_epsilon());

        if contains_initial_state && contains_final_states && epsilon_free {
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

    /// Returns the destination of `state` on `c`, if one is defined.
    pub fn transition(&self, state: StateId, c: char) -> Option<StateId> {
        self.table.get(state, Symbol::Literal(c)).copied().flatten()
    }

    /// Returns every state that isn't final, in ascending order.
    pub fn non_final_states(&self) -> StateSet {
        self.table
            .states()
            .filter(|state| !self.final_states.contains(state))
            .collect()
    }
}

impl FSM for DFA {
    type Cell = Option<StateId>;

    fn table(&self) -> &TransitionTable<Option<StateId>> {
        &self.table
    }

    fn initial_state(&self) -> StateId {
        self.initial_state
    }

    fn final_states(&self) -> &StateSet {
        &self.final_states
    }
}

impl Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(self, f)
    }
}
