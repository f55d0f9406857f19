use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use regex_fsm::FSM;
use regex_fsm_compiler::*;

/// Matches strings whose `n`th character from the end is an `a`, the
/// minimal DFA of which requires `2^n` states.
fn nth_from_last_is_a(n: usize) -> String {
    std::iter::once("(a|b)*a")
        .chain(std::iter::repeat("(a|b)").take(n - 1))
        .collect()
}

pub fn determinize_and_minimize_by_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinization and minimization by position");

    (1..8)
        .map(|n| (parse_and_build_nfa(&nth_from_last_is_a(n)), n))
        .for_each(|(nfa, n)| {
            let nfa = nfa.expect("failed to build nfa");
            let expected_states = 2usize.pow(n as u32);

            group.throughput(Throughput::Elements(expected_states as u64));
            group.bench_with_input(BenchmarkId::new("position from end", n), &nfa, |b, nfa| {
                b.iter(|| {
                    let dfa = minimize(&nfa_to_dfa(nfa));
                    assert_eq!(expected_states, dfa.state_count())
                })
            });
        })
}

criterion_group!(benches, determinize_and_minimize_by_position);
criterion_main!(benches);
