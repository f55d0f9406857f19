//! Provides the finite state machine types shared by the regex compiler: a
//! state transition table keyed by state and alphabet symbol, and the
//! nondeterministic and deterministic automata built on top of it.
//!
//! # Example
//!
//! ```rust
//! use regex_fsm::*;
//!
//! // A two state NFA accepting only `a`.
//! let mut table = TransitionTable::<StateSet>::default();
//! let start = table.add_state();
//! let accept = table.add_state();
//! table.add_transition(start, Symbol::Literal('a'), accept);
//!
//! let nfa = NFA::new(table, start, [accept].into_iter().collect());
//!
//! assert_eq!(2, nfa.state_count());
//! assert_eq!(&[Symbol::Literal('a')], nfa.alphabet());
//! assert!(nfa.is_final(accept));
//! ```

use std::collections::BTreeSet;
use std::fmt::Display;
use std::num::NonZeroU32;

mod dfa;
mod nfa;
mod sparse_set;
pub mod table;

pub use dfa::DFA;
pub use nfa::NFA;
pub use sparse_set::SparseSet;
pub use table::{Cell, EpsilonClosure, TransitionTable};

/// Identifies a single state within one automaton.
///
/// Identifiers begin at `1`. The value `0` is reserved to signify the
/// absence of a state and can never be represented.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(NonZeroU32);

impl StateId {
    /// The lowest valid state identifier.
    pub const MIN: StateId = StateId(NonZeroU32::MIN);

    /// Returns a state identifier, or `None` if `id` is the reserved `0`.
    #[must_use]
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the identifier of the state stored at row `idx` of a table.
    ///
    /// # Panics
    ///
    /// Panics if the identifier would overflow a `u32`.
    #[must_use]
    pub fn from_index(idx: usize) -> Self {
        let id = u32::try_from(idx + 1).expect("state index overflows a 32-bit integer");

        // idx + 1 is never zero.
        Self::new(id).expect("state identifiers are non-zero")
    }

    /// Returns the row index this identifier occupies in a table.
    #[inline]
    pub fn as_index(self) -> usize {
        self.as_usize() - 1
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0.get()
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0.get() as usize
    }
}

impl std::ops::Add<u32> for StateId {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        let id = self
            .0
            .checked_add(rhs)
            .expect("state identifier overflows a 32-bit integer");

        StateId(id)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// An ordered set of state identifiers.
///
/// Ordering makes a set usable as the identity of a subset-construction
/// state, two sets with the same members always compare and hash equal.
pub type StateSet = BTreeSet<StateId>;

/// A column of a transition table.
///
/// `Epsilon` orders before every literal so it always occupies the first
/// column of a table that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Epsilon,
    Literal(char),
}

impl Symbol {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the literal character, if the symbol isn't epsilon.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Literal(c) => Some(*c),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Literal(c)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Literal(c) => write!(f, "{}", c),
        }
    }
}

/// Common read-only view over a finite state machine.
pub trait FSM {
    /// The contents of a single transition table cell.
    type Cell: Cell;

    fn table(&self) -> &TransitionTable<Self::Cell>;
    fn initial_state(&self) -> StateId;
    fn final_states(&self) -> &StateSet;

    fn is_final(&self, state: StateId) -> bool {
        self.final_states().contains(&state)
    }

    fn state_count(&self) -> usize {
        self.table().len()
    }

    fn alphabet(&self) -> &[Symbol] {
        self.table().alphabet()
    }
}

/// Renders the start and final states followed by the transition table of
/// any machine.
pub(crate) fn render<M: FSM>(fsm: &M, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let finals = fsm
        .final_states()
        .iter()
        .map(|state| state.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(f, "start: {}", fsm.initial_state())?;
    writeln!(f, "final: {{{}}}", finals)?;
    Display::fmt(fsm.table(), f)
}
