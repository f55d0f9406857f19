use regex_fsm::{StateId, StateSet, Symbol, TransitionTable, NFA};

use crate::normalize::normalize;
use crate::parser::{is_literal, validate, ParseErr, ParseErrKind};
use crate::phrase::{decompose, Operator, Phrase};

/// Validates, normalizes and compiles a pattern into an NFA with a single
/// start and a single accepting state.
///
/// # Example
///
/// ```rust
/// use regex_fsm::FSM;
/// use regex_fsm_compiler::parse_and_build_nfa;
///
/// let nfa = parse_and_build_nfa("ab").unwrap();
///
/// assert_eq!(4, nfa.state_count());
/// assert!(parse_and_build_nfa("(a|b").is_err());
/// ```
pub fn parse_and_build_nfa(pattern: &str) -> Result<NFA, ParseErr> {
    validate(pattern)?;
    build(&normalize(pattern))
}

/// Compiles a normalized expression into an NFA. The initial state is always
/// the first state and the only final state is always the last.
pub fn build(expression: &str) -> Result<NFA, ParseErr> {
    let Fragment {
        table,
        start,
        accept,
    } = Fragment::build(expression)?;
    assert_eq!(
        Some(accept),
        table.last_state(),
        "accepting state must be the last row"
    );

    debug!(
        "built nfa of {} states from normalized expression {:?}",
        table.len(),
        expression
    );

    Ok(NFA::new(table, start, [accept].into_iter().collect::<StateSet>()))
}

/// A partially constructed automaton with one entry and one exit.
///
/// Every fragment carries an epsilon column, even when no epsilon
/// transitions are defined.
#[derive(Debug, Clone)]
struct Fragment {
    table: TransitionTable<StateSet>,
    start: StateId,
    accept: StateId,
}

impl Fragment {
    fn build(expression: &str) -> Result<Self, ParseErr> {
        let mut chars = expression.chars();

        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::literal(c);
        }

        let phrases = decompose(expression)?;
        let fragments = phrases
            .iter()
            .map(Self::from_phrase)
            .collect::<Result<Vec<_>, _>>()?;

        let mut fragments = fragments.into_iter();
        let head = fragments.next().ok_or_else(|| {
            ParseErr::new(ParseErrKind::InvalidExpression)
                .with_data(format!("no phrases in {:?}", expression))
        })?;

        let fragment = match phrases.first().and_then(|phrase| phrase.next_operator) {
            Some(Operator::Concatenation) => head.concatenation(fragments),
            Some(Operator::Union) => head.union(fragments),
            None => head,
        };

        trace!(
            "combined {} phrases of {:?} into {} states",
            phrases.len(),
            expression,
            fragment.table.len()
        );

        Ok(fragment)
    }

    fn from_phrase(phrase: &Phrase<'_>) -> Result<Self, ParseErr> {
        let fragment = Self::build(phrase.expression)?;

        if phrase.has_star {
            Ok(fragment.kleene_closure())
        } else {
            Ok(fragment)
        }
    }

    /// Two states joined by a single transition on `c`.
    fn literal(c: char) -> Result<Self, ParseErr> {
        if !is_literal(c) {
            return Err(ParseErr::new(ParseErrKind::UnsupportedToken)
                .with_data(format!("'{}' is not a literal", c)));
        }

        let mut table = TransitionTable::<StateSet>::new([Symbol::Epsilon, Symbol::Literal(c)]);
        let start = table.add_state();
        let accept = table.add_state();
        table.add_transition(start, Symbol::Literal(c), accept);

        Ok(Self {
            table,
            start,
            accept,
        })
    }

    /// Surrounds the fragment with a new start and accept state, allowing it
    /// to be skipped entirely or repeated any number of times.
    fn kleene_closure(self) -> Self {
        let mut table = TransitionTable::<StateSet>::new([Symbol::Epsilon]);
        let start = table.add_state();
        let offset = table.append(&self.table);
        let accept = table.add_state();

        let (inner_start, inner_accept) = (self.start + offset, self.accept + offset);
        table.add_transition(start, Symbol::Epsilon, inner_start);
        table.add_transition(start, Symbol::Epsilon, accept);
        table.add_transition(inner_accept, Symbol::Epsilon, inner_start);
        table.add_transition(inner_accept, Symbol::Epsilon, accept);

        Self {
            table,
            start,
            accept,
        }
    }

    /// Chains each fragment's accept state to the next fragment's start.
    fn concatenation<I: IntoIterator<Item = Self>>(self, rest: I) -> Self {
        rest.into_iter().fold(self, |mut acc, next| {
            let offset = acc.table.append(&next.table);
            acc.table
                .add_transition(acc.accept, Symbol::Epsilon, next.start + offset);
            acc.accept = next.accept + offset;
            acc
        })
    }

    /// Branches from a new start state into every fragment, rejoining at a
    /// new accept state.
    fn union<I: IntoIterator<Item = Self>>(self, rest: I) -> Self {
        let mut table = TransitionTable::<StateSet>::new([Symbol::Epsilon]);
        let start = table.add_state();

        let accepts = std::iter::once(self)
            .chain(rest)
            .map(|branch| {
                let offset = table.append(&branch.table);
                table.add_transition(start, Symbol::Epsilon, branch.start + offset);
                branch.accept + offset
            })
            .collect::<Vec<_>>();

        let accept = table.add_state();
        for branch_accept in accepts {
            table.add_transition(branch_accept, Symbol::Epsilon, accept);
        }

        Self {
            table,
            start,
            accept,
        }
    }
}
