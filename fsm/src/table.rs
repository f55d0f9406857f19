//! A state transition table shared by nondeterministic and deterministic
//! automata.
//!
//! The table has one header row listing the alphabet and one row per state.
//! A state's identifier is implied by the position of its row, the first row
//! is always state `1`, so every state referenced by a well formed table
//! falls in `1..=len`.

use std::fmt::Display;

use super::{SparseSet, StateId, StateSet, Symbol};

/// The contents of a single `(state, symbol)` cell.
pub trait Cell: Default + Clone + PartialEq + std::fmt::Debug {
    /// Returns every destination state held by the cell in ascending order.
    fn destinations(&self) -> Vec<StateId>;

    /// Returns a copy of the cell with every destination rewritten by `f`.
    fn map_states<F: FnMut(StateId) -> StateId>(&self, f: F) -> Self;

    fn is_empty(&self) -> bool {
        self.destinations().is_empty()
    }
}

/// An NFA cell, holding zero or more destinations.
impl Cell for StateSet {
    fn destinations(&self) -> Vec<StateId> {
        self.iter().copied().collect()
    }

    fn map_states<F: FnMut(StateId) -> StateId>(&self, f: F) -> Self {
        self.iter().copied().map(f).collect()
    }
}

/// A DFA cell, holding at most one destination.
impl Cell for Option<StateId> {
    fn destinations(&self) -> Vec<StateId> {
        self.iter().copied().collect()
    }

    fn map_states<F: FnMut(StateId) -> StateId>(&self, f: F) -> Self {
        self.map(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable<C> {
    /// Header row, kept sorted so column order is deterministic.
    alphabet: Vec<Symbol>,
    rows: Vec<Vec<C>>,
}

impl<C: Cell> TransitionTable<C> {
    /// Instantiates a table with no states over the supplied alphabet.
    #[must_use]
    pub fn new<I: IntoIterator<Item = Symbol>>(alphabet: I) -> Self {
        let mut alphabet: Vec<_> = alphabet.into_iter().collect();
        alphabet.sort();
        alphabet.dedup();

        Self {
            alphabet,
            rows: vec![],
        }
    }

    /// Returns the header row.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// Returns the number of states in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates all state identifiers in ascending order.
    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.rows.len()).map(StateId::from_index)
    }

    /// Returns the highest numbered state, the last row added to the table.
    pub fn last_state(&self) -> Option<StateId> {
        self.rows.len().checked_sub(1).map(StateId::from_index)
    }

    pub fn contains_state(&self, state: StateId) -> bool {
        state.as_index() < self.rows.len()
    }

    /// Appends a row with every cell empty, returning its identifier.
    pub fn add_state(&mut self) -> StateId {
        self.rows.push(vec![C::default(); self.alphabet.len()]);
        StateId::from_index(self.rows.len() - 1)
    }

    /// Adds a column for `symbol` if it doesn't already exist, returning the
    /// column's index.
    pub fn add_symbol(&mut self, symbol: Symbol) -> usize {
        match self.alphabet.binary_search(&symbol) {
            Ok(column) => column,
            Err(column) => {
                self.alphabet.insert(column, symbol);
                for row in self.rows.iter_mut() {
                    row.insert(column, C::default());
                }

                column
            }
        }
    }

    fn column(&self, symbol: Symbol) -> Option<usize> {
        self.alphabet.binary_search(&symbol).ok()
    }

    /// Returns the cell at `(state, symbol)` or `None` if either the row or
    /// column is undefined.
    pub fn get(&self, state: StateId, symbol: Symbol) -> Option<&C> {
        let column = self.column(symbol)?;
        self.rows
            .get(state.as_index())
            .and_then(|row| row.get(column))
    }

    pub fn get_mut(&mut self, state: StateId, symbol: Symbol) -> Option<&mut C> {
        let column = self.column(symbol)?;
        self.rows
            .get_mut(state.as_index())
            .and_then(|row| row.get_mut(column))
    }

    /// Iterates the `(symbol, cell)` pairs of a state's row in column order.
    pub fn row(&self, state: StateId) -> impl Iterator<Item = (Symbol, &C)> + '_ {
        self.rows
            .get(state.as_index())
            .into_iter()
            .flat_map(move |row| self.alphabet.iter().copied().zip(row.iter()))
    }

    /// Appends every row of `other`, renumbering its states past this table's
    /// highest state and merging the two alphabets. Returns the offset that
    /// was added to each of `other`'s state identifiers.
    pub fn append(&mut self, other: &Self) -> u32 {
        let offset = u32::try_from(self.len()).expect("state count overflows a 32-bit integer");

        for &symbol in other.alphabet() {
            self.add_symbol(symbol);
        }

        for state in other.states() {
            let mut row = vec![C::default(); self.alphabet.len()];
            for (symbol, cell) in other.row(state) {
                // every column of other was merged above.
                let column = self.column(symbol).expect("symbol merged into alphabet");
                row[column] = cell.map_states(|dest| dest + offset);
            }

            self.rows.push(row);
        }

        offset
    }

    /// Asserts that every state referenced by a cell is a row of the table.
    ///
    /// # Panics
    ///
    /// Panics on a dangling reference, which signifies a construction fault
    /// rather than a recoverable error.
    pub fn assert_consistent(&self) {
        for state in self.states() {
            for (symbol, cell) in self.row(state) {
                for dest in cell.destinations() {
                    assert!(
                        self.contains_state(dest),
                        "transition ({}, {}) references undefined state {}",
                        state,
                        symbol,
                        dest
                    );
                }
            }
        }
    }
}

impl<C: Cell> Default for TransitionTable<C> {
    fn default() -> Self {
        Self::new([])
    }
}

impl TransitionTable<StateSet> {
    /// Adds `dest` to the cell at `(src, symbol)`, creating the symbol's
    /// column if needed.
    ///
    /// # Panics
    ///
    /// Panics if either state isn't a row of the table.
    pub fn add_transition(&mut self, src: StateId, symbol: Symbol, dest: StateId) {
        assert!(
            self.contains_state(src) && self.contains_state(dest),
            "transition {} -{}-> {} references undefined state",
            src,
            symbol,
            dest
        );

        self.add_symbol(symbol);
        if let Some(cell) = self.get_mut(src, symbol) {
            cell.insert(dest);
        }
    }
}

impl TransitionTable<Option<StateId>> {
    /// Sets the single destination of `(src, symbol)`, creating the symbol's
    /// column if needed.
    ///
    /// # Panics
    ///
    /// Panics if either state isn't a row of the table, or if `symbol` is
    /// epsilon.
    pub fn set_transition(&mut self, src: StateId, symbol: Symbol, dest: StateId) {
        assert!(
            !symbol.is_epsilon(),
            "deterministic tables have no epsilon column"
        );
        assert!(
            self.contains_state(src) && self.contains_state(dest),
            "transition {} -{}-> {} references undefined state",
            src,
            symbol,
            dest
        );

        self.add_symbol(symbol);
        if let Some(cell) = self.get_mut(src, symbol) {
            *cell = Some(dest);
        }
    }
}

/// Computes the states reachable from a state while consuming no input.
pub trait EpsilonClosure {
    /// Performs a depth-first walk of the epsilon transitions leaving
    /// `state`, recording every state reached in `visited`. States already in
    /// `visited` aren't walked again, which terminates cycles introduced by
    /// kleene closures.
    fn epsilon_closure_with(&self, state: StateId, visited: &mut SparseSet);

    /// The number of states a closure can range over, used to size the
    /// visited set up front.
    fn closure_capacity(&self) -> usize;

    /// Returns `state` together with every state reachable from it through
    /// zero or more epsilon transitions.
    fn epsilon_closure(&self, state: StateId) -> StateSet {
        let mut visited = SparseSet::new(self.closure_capacity());
        self.epsilon_closure_with(state, &mut visited);

        visited.iter().collect()
    }

    /// Returns the union of the epsilon closures of every supplied state.
    fn epsilon_closure_of<'a, I>(&self, states: I) -> StateSet
    where
        I: IntoIterator<Item = &'a StateId>,
    {
        let mut visited = SparseSet::new(self.closure_capacity());
        for &state in states {
            self.epsilon_closure_with(state, &mut visited);
        }

        visited.iter().collect()
    }
}

impl EpsilonClosure for TransitionTable<StateSet> {
    fn closure_capacity(&self) -> usize {
        self.len()
    }

    fn epsilon_closure_with(&self, state: StateId, visited: &mut SparseSet) {
        if !visited.insert(state) {
            return;
        }

        if let Some(destinations) = self.get(state, Symbol::Epsilon) {
            for &next in destinations {
                self.epsilon_closure_with(next, visited);
            }
        }
    }
}

impl<C: Cell> Display for TransitionTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = self
            .alphabet
            .iter()
            .map(|symbol| symbol.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        writeln!(f, "states: {}", self.len())?;
        writeln!(f, "alphabet: {}", header)?;

        for state in self.states() {
            let cells = self
                .row(state)
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(symbol, cell)| {
                    let dests = cell
                        .destinations()
                        .iter()
                        .map(|dest| dest.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");

                    format!("{} -> {{{}}}", symbol, dests)
                })
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(f, "{:04}: {}", state, cells)?
        }

        Ok(())
    }
}
