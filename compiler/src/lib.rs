//! Provides for the compilation of a regular expression into a minimal
//! deterministic finite automaton.
//!
//! Compilation is split across the following steps, each exposed on its own:
//!
//! 1. [`validate`] rejects malformed patterns.
//! 2. [`normalize`] rewrites a pattern so that concatenation is explicit
//!    and every operand is grouped.
//! 3. [`parse_and_build_nfa`] recursively decomposes the normalized pattern
//!    into phrases and assembles an NFA from them.
//! 4. [`nfa_to_dfa`] determinizes the NFA by subset construction.
//! 5. [`minimize`] merges indistinguishable DFA states.
//!
//! # Example
//!
//! ```rust
//! use regex_fsm::FSM;
//! use regex_fsm_compiler::compile;
//!
//! // Matches any string of `a` and `b` ending in `a`.
//! let dfa = compile("(a|b)*a").expect("failed to compile");
//!
//! let accepts = |input: &str| {
//!     input
//!         .chars()
//!         .try_fold(dfa.initial_state(), |state, c| dfa.transition(state, c))
//!         .map(|state| dfa.is_final(state))
//!         .unwrap_or(false)
//! };
//!
//! assert_eq!(2, dfa.state_count());
//! assert!(accepts("abba"));
//! assert!(!accepts("ab"));
//! ```

#[macro_use]
mod macros;

pub mod minimize;
pub mod nfa;
pub mod normalize;
mod parser;
pub mod phrase;
pub mod subset;

pub use minimize::minimize;
pub use nfa::parse_and_build_nfa;
pub use normalize::normalize;
pub use parser::{is_literal, validate, ParseErr, ParseErrKind};
pub use phrase::decompose;
pub use subset::nfa_to_dfa;

use regex_fsm::DFA;

/// Compiles a pattern through every step into a minimal DFA.
pub fn compile(pattern: &str) -> Result<DFA, ParseErr> {
    parse_and_build_nfa(pattern)
        .map(|nfa| nfa_to_dfa(&nfa))
        .map(|dfa| minimize(&dfa))
}
