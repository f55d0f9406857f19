use regex_fsm::{StateId, StateSet, Symbol, DFA, FSM, NFA};
use regex_fsm_compiler::*;

use crate::{dfa_accepts, nfa_accepts};

fn automata_of(pattern: &str) -> (NFA, DFA, DFA) {
    let nfa = parse_and_build_nfa(pattern).expect("failed to build nfa");
    let dfa = nfa_to_dfa(&nfa);
    let minimized = minimize(&dfa);

    (nfa, dfa, minimized)
}

fn assert_language(pattern: &str, accepted: &[&str], rejected: &[&str]) {
    let (nfa, dfa, minimized) = automata_of(pattern);

    for input in accepted {
        assert!(nfa_accepts(&nfa, input), "nfa of {} rejected {:?}", pattern, input);
        assert!(dfa_accepts(&dfa, input), "dfa of {} rejected {:?}", pattern, input);
        assert!(
            dfa_accepts(&minimized, input),
            "minimal dfa of {} rejected {:?}",
            pattern,
            input
        );
    }

    for input in rejected {
        assert!(!nfa_accepts(&nfa, input), "nfa of {} accepted {:?}", pattern, input);
        assert!(!dfa_accepts(&dfa, input), "dfa of {} accepted {:?}", pattern, input);
        assert!(
            !dfa_accepts(&minimized, input),
            "minimal dfa of {} accepted {:?}",
            pattern,
            input
        );
    }
}

#[test]
fn should_compile_single_literal_to_already_minimal_dfa() {
    let (nfa, dfa, minimized) = automata_of("a");

    assert_eq!(2, nfa.state_count());
    let transitions = nfa
        .table()
        .states()
        .flat_map(|state| nfa.table().row(state))
        .map(|(_, cell)| cell.len())
        .sum::<usize>();
    assert_eq!(1, transitions);
    assert_eq!(
        Some(&[StateId::from_index(1)].into_iter().collect::<StateSet>()),
        nfa.transitions(StateId::MIN, Symbol::Literal('a'))
    );

    assert_eq!(2, dfa.state_count());
    assert_eq!(dfa, minimized);
}

#[test]
fn should_accept_only_concatenated_literals() {
    assert_language("ab", &["ab"], &["a", "b", "ba", "", "abb"]);
}

#[test]
fn should_accept_either_side_of_union() {
    assert_language("a|b", &["a", "b"], &["ab", "", "aa"]);
}

#[test]
fn should_compile_kleene_star_to_single_looping_state() {
    assert_language("a*", &["", "a", "aaaa"], &["b", "ab"]);

    let (_, _, minimized) = automata_of("a*");
    let only_state = minimized.initial_state();

    assert_eq!(1, minimized.state_count());
    assert!(minimized.is_final(only_state));
    assert_eq!(Some(only_state), minimized.transition(only_state, 'a'));
}

#[test]
fn should_accept_strings_ending_in_a() {
    assert_language(
        "(a|b)*a",
        &["a", "aba", "bbba", "aa"],
        &["", "b", "ab", "abab", "bbbb"],
    );
}

#[test]
fn should_apply_concatenation_before_union() {
    assert_language("ab|c", &["ab", "c"], &["ac", "abc", "b", ""]);
    assert_language("a|bc", &["a", "bc"], &["ac", "abc", "b"]);
}

#[test]
fn should_collapse_repeated_stars() {
    let (_, _, single_star) = automata_of("(ab)*");
    let (_, _, double_star) = automata_of("(ab)**");

    assert_eq!(single_star, double_star);
}

#[test]
fn should_accept_digits_and_non_ascii_letters() {
    assert_language("(ü1)*ß", &["ß", "ü1ß", "ü1ü1ß"], &["ü", "1ß", "ü1"]);
}

#[test]
fn should_reject_malformed_pattern_without_automaton() {
    let err = parse_and_build_nfa("(a|b").unwrap_err();

    assert_eq!(ParseErrKind::UnbalancedParentheses, err.kind());
    assert!(compile("(a|b").is_err());
}

#[test]
fn should_render_each_stage() {
    let (nfa, dfa, minimized) = automata_of("a*");

    assert_eq!(
        "start: 1\nfinal: {4}\nstates: 4\nalphabet: ε a\n\
         0001: ε -> {2, 4}\n\
         0002: a -> {3}\n\
         0003: ε -> {2, 4}\n\
         0004: \n",
        nfa.to_string()
    );
    assert_eq!(
        "start: 1\nfinal: {1, 2}\nstates: 2\nalphabet: a\n0001: a -> {2}\n0002: a -> {2}\n",
        dfa.to_string()
    );
    assert_eq!(
        "start: 1\nfinal: {1}\nstates: 1\nalphabet: a\n0001: a -> {1}\n",
        minimized.to_string()
    );
}
