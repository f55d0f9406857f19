//! Cross-crate checks of compiled automata against one another. Acceptance
//! is evaluated here independently of the compiler, by simulating the NFA
//! directly and walking the DFA one character at a time.

use std::collections::BTreeSet;

use regex_fsm::{StateId, Symbol, DFA, FSM, NFA};

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

/// Simulates `nfa` over `input`, tracking every state it could occupy.
pub fn nfa_accepts(nfa: &NFA, input: &str) -> bool {
    let mut current = epsilon_reachable(nfa, [nfa.initial_state()]);

    for c in input.chars() {
        let moved = current
            .iter()
            .filter_map(|&state| nfa.transitions(state, Symbol::Literal(c)))
            .flatten()
            .copied()
            .collect::<Vec<_>>();

        current = epsilon_reachable(nfa, moved);
        if current.is_empty() {
            return false;
        }
    }

    current.iter().any(|&state| nfa.is_final(state))
}

fn epsilon_reachable<I>(nfa: &NFA, states: I) -> BTreeSet<StateId>
where
    I: IntoIterator<Item = StateId>,
{
    let mut reached = BTreeSet::new();
    let mut pending = states.into_iter().collect::<Vec<_>>();

    while let Some(state) = pending.pop() {
        if reached.insert(state) {
            pending.extend(
                nfa.transitions(state, Symbol::Epsilon)
                    .into_iter()
                    .flatten()
                    .copied(),
            );
        }
    }

    reached
}

/// Walks `dfa` over `input`, rejecting on the first undefined transition.
pub fn dfa_accepts(dfa: &DFA, input: &str) -> bool {
    input
        .chars()
        .try_fold(dfa.initial_state(), |state, c| dfa.transition(state, c))
        .map(|state| dfa.is_final(state))
        .unwrap_or(false)
}

/// Every string over `alphabet` of at most `len` characters, shortest first.
pub fn strings_up_to(alphabet: &[char], len: usize) -> Vec<String> {
    let mut strings = vec![String::new()];
    let mut frontier = vec![String::new()];

    for _ in 0..len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| alphabet.iter().map(move |c| format!("{}{}", prefix, c)))
            .collect();
        strings.extend(frontier.iter().cloned());
    }

    strings
}
