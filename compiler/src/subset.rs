use indexmap::IndexSet;
use regex_fsm::{EpsilonClosure, StateId, StateSet, Symbol, TransitionTable, DFA, FSM, NFA};

/// Converts an NFA into an equivalent DFA by subset construction.
///
/// Each DFA state stands for the epsilon closure of a set of NFA states.
/// States are numbered in the order they are discovered, so the closure of
/// the NFA's initial state is always state `1`, and a state is final if its
/// set contains any of the NFA's final states. Moves that reach no NFA state
/// at all are left undefined rather than routed to an explicit dead state.
///
/// # Example
///
/// ```rust
/// use regex_fsm::FSM;
/// use regex_fsm_compiler::{nfa_to_dfa, parse_and_build_nfa};
///
/// let nfa = parse_and_build_nfa("a|b").unwrap();
/// let dfa = nfa_to_dfa(&nfa);
///
/// assert_eq!(3, dfa.state_count());
/// assert!(!dfa.is_final(dfa.initial_state()));
/// ```
pub fn nfa_to_dfa(nfa: &NFA) -> DFA {
    let alphabet = nfa
        .alphabet()
        .iter()
        .filter_map(Symbol::as_char)
        .collect::<Vec<_>>();

    let (subsets, transitions) = discover_subsets(nfa, &alphabet);

    let mut table =
        TransitionTable::<Option<StateId>>::new(alphabet.iter().copied().map(Symbol::Literal));
    for _ in 0..subsets.len() {
        table.add_state();
    }

    for (src, row) in transitions.iter().enumerate() {
        for (&c, dest) in alphabet.iter().zip(row) {
            if let Some(dest) = dest {
                table.set_transition(
                    StateId::from_index(src),
                    Symbol::Literal(c),
                    StateId::from_index(*dest),
                );
            }
        }
    }

    let final_states = subsets
        .iter()
        .enumerate()
        .filter(|(_, subset)| !subset.is_disjoint(nfa.final_states()))
        .map(|(idx, _)| StateId::from_index(idx))
        .collect::<StateSet>();

    debug!(
        "constructed dfa of {} states from nfa of {} states",
        subsets.len(),
        nfa.state_count()
    );

    DFA::new(table, StateId::MIN, final_states)
}

/// Explores every reachable subset breadth first, returning the subsets in
/// discovery order alongside, for each subset, the index of the subset
/// reached on each character of `alphabet`.
fn discover_subsets(
    nfa: &NFA,
    alphabet: &[char],
) -> (IndexSet<StateSet>, Vec<Vec<Option<usize>>>) {
    let mut subsets = IndexSet::new();
    let mut transitions = Vec::new();

    subsets.insert(nfa.epsilon_closure(nfa.initial_state()));

    let mut cursor = 0;
    while let Some(subset) = subsets.get_index(cursor).cloned() {
        let mut row = Vec::with_capacity(alphabet.len());

        for &c in alphabet {
            let moved = subset
                .iter()
                .filter_map(|&state| nfa.transitions(state, Symbol::Literal(c)))
                .flatten()
                .copied()
                .collect::<StateSet>();
            let reached = nfa.epsilon_closure_of(&moved);

            if reached.is_empty() {
                row.push(None);
                continue;
            }

            let (idx, is_new) = subsets.insert_full(reached);
            if is_new {
                trace!(
                    "discovered subset {} via {:?} from subset {}: {:?}",
                    idx + 1,
                    c,
                    cursor + 1,
                    subsets.get_index(idx)
                );
            }

            row.push(Some(idx));
        }

        transitions.push(row);
        cursor += 1;
    }

    (subsets, transitions)
}
