//! Rewrites a validated pattern into the fully explicit form consumed by the
//! NFA builder: concatenation is written out as `.`, repeated stars are
//! collapsed, every literal sits in its own group, and every level of
//! nesting combines its operands with a single kind of operator.
//!
//! ```rust
//! use regex_fsm_compiler::normalize;
//!
//! assert_eq!("((a)|(b))*.(a)", normalize("(a|b)*a"));
//! assert_eq!("((a).(b))|(c)", normalize("ab|c"));
//! ```

use crate::parser::{is_literal, CLOSE_GROUP, CONCATENATION, KLEENE_STAR, OPEN_GROUP, UNION};

/// Normalizes `pattern`. Malformed input is not rejected: unbalanced groups
/// and stray operators are carried through for the decomposer to report.
pub fn normalize(pattern: &str) -> String {
    let explicit = insert_concatenation(pattern);
    parenthesize(&explicit)
}

/// Inserts a `.` between every pair of adjacent operands and collapses runs
/// of `*` into one.
pub fn insert_concatenation(pattern: &str) -> String {
    pattern
        .chars()
        .fold(String::with_capacity(pattern.len() * 2), |mut acc, c| {
            match acc.chars().next_back() {
                Some(KLEENE_STAR) if c == KLEENE_STAR => return acc,
                Some(prev) if ends_operand(prev) && begins_operand(c) => acc.push(CONCATENATION),
                _ => (),
            }

            acc.push(c);
            acc
        })
}

fn ends_operand(c: char) -> bool {
    is_literal(c) || c == CLOSE_GROUP || c == KLEENE_STAR
}

fn begins_operand(c: char) -> bool {
    is_literal(c) || c == OPEN_GROUP
}

/// Wraps every literal in a group and, at any level mixing `|` with `.`,
/// groups each run of concatenated operands so that concatenation binds
/// tighter than union.
pub fn parenthesize(expression: &str) -> String {
    let chars = expression.chars().collect::<Vec<_>>();
    parenthesize_level(&chars)
}

/// A single operand at one level of nesting.
#[derive(Debug)]
struct Term {
    operand: String,
    starred: bool,
    /// The operator joining this operand to the one that follows it.
    next: Option<char>,
}

impl Term {
    fn body(&self) -> String {
        if self.starred {
            format!("{}{}", self.operand, KLEENE_STAR)
        } else {
            self.operand.clone()
        }
    }
}

fn parenthesize_level(chars: &[char]) -> String {
    let terms = split_level(chars);
    let has_union = terms.iter().any(|term| term.next == Some(UNION));
    let has_concatenation = terms.iter().any(|term| term.next == Some(CONCATENATION));

    if !(has_union && has_concatenation) {
        return terms.iter().fold(String::new(), |mut acc, term| {
            acc.push_str(&term.body());
            acc.extend(term.next);
            acc
        });
    }

    let mut alternatives: Vec<Vec<Term>> = vec![vec![]];
    for term in terms {
        let ends_alternative = term.next == Some(UNION);
        if let Some(alternative) = alternatives.last_mut() {
            alternative.push(term);
        }

        if ends_alternative {
            alternatives.push(vec![]);
        }
    }

    alternatives
        .iter()
        .map(|alternative| match alternative.as_slice() {
            [single] => single.body(),
            terms => {
                let last = terms.len().saturating_sub(1);
                let inner = terms.iter().enumerate().fold(String::new(), |mut acc, (idx, term)| {
                    acc.push_str(&term.body());
                    if idx < last {
                        acc.extend(term.next);
                    }
                    acc
                });

                format!("{}{}{}", OPEN_GROUP, inner, CLOSE_GROUP)
            }
        })
        .collect::<Vec<_>>()
        .join(&UNION.to_string())
}

fn split_level(chars: &[char]) -> Vec<Term> {
    let mut terms = Vec::new();
    let mut idx = 0;

    while let Some(&c) = chars.get(idx) {
        let operand = if c == OPEN_GROUP {
            match matching_close(chars, idx) {
                Some(close) => {
                    let inner = parenthesize_level(&chars[idx + 1..close]);
                    idx = close + 1;
                    format!("{}{}{}", OPEN_GROUP, inner, CLOSE_GROUP)
                }
                // left unclosed so the decomposer can report it.
                None => {
                    let inner = parenthesize_level(&chars[idx + 1..]);
                    idx = chars.len();
                    format!("{}{}", OPEN_GROUP, inner)
                }
            }
        } else if is_literal(c) {
            idx += 1;
            format!("{}{}{}", OPEN_GROUP, c, CLOSE_GROUP)
        } else {
            idx += 1;
            c.to_string()
        };

        let mut starred = false;
        while chars.get(idx) == Some(&KLEENE_STAR) {
            starred = true;
            idx += 1;
        }

        let next = match chars.get(idx) {
            Some(&op) if op == UNION || op == CONCATENATION => {
                idx += 1;
                Some(op)
            }
            _ => None,
        };

        terms.push(Term {
            operand,
            starred,
            next,
        });
    }

    terms
}

/// Returns the index of the `)` closing the group opened at `open`.
fn matching_close(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (idx, &c) in chars.iter().enumerate().skip(open) {
        if c == OPEN_GROUP {
            depth += 1;
        } else if c == CLOSE_GROUP {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }

    None
}
