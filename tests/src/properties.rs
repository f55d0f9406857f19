use quickcheck::{quickcheck, Arbitrary, Gen};
use regex_fsm::{Cell, EpsilonClosure, StateSet, Symbol, FSM};
use regex_fsm_compiler::*;

use crate::{dfa_accepts, nfa_accepts, strings_up_to};

const ALPHABET: [char; 3] = ['a', 'b', 'c'];
const MAX_INPUT_LEN: usize = 5;

/// A well-formed pattern over `ALPHABET`, possibly nesting groups, stars
/// and unions.
#[derive(Debug, Clone)]
struct Pattern(String);

impl Pattern {
    fn generate(g: &mut Gen, depth: usize) -> String {
        let choice = if depth == 0 { 0 } else { u8::arbitrary(g) % 6 };

        match choice {
            0 | 5 => g.choose(&ALPHABET).copied().unwrap_or('a').to_string(),
            1 => format!("{}*", Self::generate(g, depth - 1)),
            2 => format!(
                "{}{}",
                Self::generate(g, depth - 1),
                Self::generate(g, depth - 1)
            ),
            3 => format!(
                "{}|{}",
                Self::generate(g, depth - 1),
                Self::generate(g, depth - 1)
            ),
            _ => format!("({})", Self::generate(g, depth - 1)),
        }
    }
}

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 5 + 1;
        Pattern(Self::generate(g, depth))
    }
}

quickcheck! {
    fn nfa_has_one_start_and_a_reachable_final_state(pattern: Pattern) -> bool {
        let nfa = parse_and_build_nfa(&pattern.0).unwrap();

        // every state reachable over any symbol from the start.
        let mut reached = StateSet::new();
        let mut pending = vec![nfa.initial_state()];
        while let Some(state) = pending.pop() {
            if reached.insert(state) {
                pending.extend(nfa.table().row(state).flat_map(|(_, cell)| cell.destinations()));
            }
        }

        nfa.final_states().len() == 1
            && nfa.final_states().iter().all(|state| reached.contains(state))
    }

    fn epsilon_closure_contains_state_and_is_idempotent(pattern: Pattern) -> bool {
        let nfa = parse_and_build_nfa(&pattern.0).unwrap();

        nfa.table().states().all(|state| {
            let closure = nfa.epsilon_closure(state);

            closure.contains(&state) && nfa.epsilon_closure_of(&closure) == closure
        })
    }

    fn dfa_has_no_epsilon_and_one_destination_per_symbol(pattern: Pattern) -> bool {
        let dfa = nfa_to_dfa(&parse_and_build_nfa(&pattern.0).unwrap());

        dfa.alphabet().iter().all(|symbol| !symbol.is_epsilon())
            && dfa
                .table()
                .states()
                .flat_map(|state| dfa.table().row(state))
                .all(|(_, cell)| cell.destinations().len() <= 1)
    }

    fn dfa_accepts_what_the_nfa_accepts(pattern: Pattern) -> bool {
        let nfa = parse_and_build_nfa(&pattern.0).unwrap();
        let dfa = nfa_to_dfa(&nfa);

        strings_up_to(&ALPHABET, MAX_INPUT_LEN)
            .iter()
            .all(|input| nfa_accepts(&nfa, input) == dfa_accepts(&dfa, input))
    }

    fn subset_construction_is_deterministic(pattern: Pattern) -> bool {
        let nfa = parse_and_build_nfa(&pattern.0).unwrap();

        nfa_to_dfa(&nfa) == nfa_to_dfa(&nfa)
    }

    fn minimization_preserves_language_without_adding_states(pattern: Pattern) -> bool {
        let dfa = nfa_to_dfa(&parse_and_build_nfa(&pattern.0).unwrap());
        let minimized = minimize(&dfa);

        minimized.state_count() <= dfa.state_count()
            && strings_up_to(&ALPHABET, MAX_INPUT_LEN)
                .iter()
                .all(|input| dfa_accepts(&dfa, input) == dfa_accepts(&minimized, input))
    }

    fn minimizing_a_minimal_dfa_is_identity(pattern: Pattern) -> bool {
        let minimized = compile(&pattern.0).unwrap();

        minimize(&minimized) == minimized
    }

    fn normalized_patterns_decompose(pattern: Pattern) -> bool {
        let normalized = normalize(&pattern.0);

        decompose(&normalized)
            .map(|phrases| {
                let last = phrases.len() - 1;
                phrases
                    .iter()
                    .enumerate()
                    .all(|(idx, phrase)| phrase.next_operator.is_none() == (idx == last))
            })
            .unwrap_or(false)
    }

    fn literals_outside_the_alphabet_never_match(pattern: Pattern) -> bool {
        let dfa = compile(&pattern.0).unwrap();

        !dfa.alphabet().contains(&Symbol::Literal('d'))
            && ["d", "ad", "da"].iter().all(|input| !dfa_accepts(&dfa, input))
    }
}
