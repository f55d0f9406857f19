use std::collections::BTreeSet;

use indexmap::IndexMap;
use regex_fsm::{StateId, StateSet, TransitionTable, DFA, FSM};

/// Minimizes a DFA by partition refinement, merging every group of states
/// that no input can tell apart.
///
/// The minimized automaton is numbered by block, ordering blocks by their
/// smallest original state, so the result is stable for a given input and
/// minimizing an already minimal DFA returns it unchanged.
///
/// # Example
///
/// ```rust
/// use regex_fsm::FSM;
/// use regex_fsm_compiler::{minimize, nfa_to_dfa, parse_and_build_nfa};
///
/// let nfa = parse_and_build_nfa("a*").unwrap();
/// let dfa = minimize(&nfa_to_dfa(&nfa));
///
/// assert_eq!(1, dfa.state_count());
/// assert_eq!(Some(dfa.initial_state()), dfa.transition(dfa.initial_state(), 'a'));
/// ```
pub fn minimize(dfa: &DFA) -> DFA {
    let partition = Partition::coarsest(dfa);
    let minimized = partition.reconstruct(dfa);

    debug!(
        "minimized dfa of {} states to {} states",
        dfa.state_count(),
        minimized.state_count()
    );

    minimized
}

/// Disjoint, non-empty blocks of states that together cover every state of
/// a single DFA.
///
/// Equality ignores the order of blocks.
#[derive(Debug, Clone)]
pub struct Partition {
    blocks: Vec<StateSet>,
}

impl Partition {
    /// Splits the states into finals and non-finals, omitting whichever is
    /// empty.
    pub fn initial(dfa: &DFA) -> Self {
        let blocks = [dfa.final_states().clone(), dfa.non_final_states()]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect();

        Self { blocks }
    }

    /// Refines the initial partition until no block can be split further.
    pub fn coarsest(dfa: &DFA) -> Self {
        let mut partition = Self::initial(dfa);

        for _round in 1usize.. {
            let refined = partition.refine(dfa);

            trace!(
                "partition round {}: {} blocks {:?}",
                _round,
                refined.len(),
                refined.blocks
            );

            if refined == partition {
                break;
            }

            partition = refined;
        }

        partition
    }

    pub fn blocks(&self) -> &[StateSet] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Splits every block so that two states share a block only if, for
    /// each symbol, their destinations fall in the same block of this
    /// partition. A missing transition is treated as its own block.
    pub fn refine(&self, dfa: &DFA) -> Self {
        let membership = self.membership(dfa.state_count());

        let blocks = self
            .blocks
            .iter()
            .flat_map(|block| {
                let mut splits = IndexMap::<Vec<Option<usize>>, StateSet>::new();

                for &state in block {
                    let signature = dfa
                        .alphabet()
                        .iter()
                        .filter_map(|symbol| symbol.as_char())
                        .map(|c| dfa.transition(state, c).map(|dest| membership[dest.as_index()]))
                        .collect::<Vec<_>>();

                    splits.entry(signature).or_default().insert(state);
                }

                splits.into_values()
            })
            .collect();

        Self { blocks }
    }

    /// Builds a DFA with one state per block. Transitions are taken from
    /// each block's smallest state, every member of a block agreeing on
    /// them once the partition is stable.
    pub fn reconstruct(&self, dfa: &DFA) -> DFA {
        let mut ordered = self.blocks.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|block| block.first().copied());

        let ordered = Self {
            blocks: ordered.into_iter().cloned().collect(),
        };
        let membership = ordered.membership(dfa.state_count());

        let mut table = TransitionTable::<Option<StateId>>::new(dfa.alphabet().iter().copied());
        for _ in ordered.blocks() {
            table.add_state();
        }

        for (idx, block) in ordered.blocks().iter().enumerate() {
            let representative = match block.first() {
                Some(&state) => state,
                None => continue,
            };

            for (symbol, dest) in dfa.table().row(representative) {
                if let Some(dest) = dest {
                    table.set_transition(
                        StateId::from_index(idx),
                        symbol,
                        StateId::from_index(membership[dest.as_index()]),
                    );
                }
            }
        }

        let initial_state = StateId::from_index(membership[dfa.initial_state().as_index()]);
        let final_states = ordered
            .blocks()
            .iter()
            .enumerate()
            .filter(|(_, block)| block.iter().any(|&state| dfa.is_final(state)))
            .map(|(idx, _)| StateId::from_index(idx))
            .collect::<StateSet>();

        DFA::new(table, initial_state, final_states)
    }

    /// Maps each state's row index to the index of its block.
    ///
    /// # Panics
    ///
    /// Panics if a state appears in more than one block or in none.
    fn membership(&self, state_count: usize) -> Vec<usize> {
        let mut membership = vec![None; state_count];

        for (idx, block) in self.blocks.iter().enumerate() {
            for state in block {
                let slot = &mut membership[state.as_index()];
                assert!(slot.is_none(), "state {} appears in multiple blocks", state);
                *slot = Some(idx);
            }
        }

        membership
            .into_iter()
            .enumerate()
            .map(|(idx, block)| {
                block.unwrap_or_else(|| {
                    panic!("state {} belongs to no block", StateId::from_index(idx))
                })
            })
            .collect()
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        let blocks = self.blocks.iter().collect::<BTreeSet<_>>();
        let other_blocks = other.blocks.iter().collect::<BTreeSet<_>>();

        blocks == other_blocks
    }
}

impl Eq for Partition {}
