use crate::parser::{
    ParseErr, ParseErrKind, CLOSE_GROUP, CONCATENATION, KLEENE_STAR, OPEN_GROUP, UNION,
};

/// A binary operator joining two phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Concatenation,
    Union,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            CONCATENATION => Some(Operator::Concatenation),
            UNION => Some(Operator::Union),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Operator::Concatenation => CONCATENATION,
            Operator::Union => UNION,
        }
    }
}

/// One top-level group of a normalized expression, borrowed from the
/// expression it was split out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase<'a> {
    /// The text between the group's outer parentheses.
    pub expression: &'a str,
    /// The group is immediately followed by `*`.
    pub has_star: bool,
    pub prev_operator: Option<Operator>,
    pub next_operator: Option<Operator>,
}

/// Splits a normalized expression into its top-level groups.
///
/// Every phrase must be a parenthesized, non-empty group optionally
/// followed by a single `*`, and consecutive phrases are joined by the same
/// operator. Decomposition ends at the first phrase with no operator after
/// it.
///
/// # Example
///
/// ```rust
/// use regex_fsm_compiler::phrase::{decompose, Operator};
///
/// let phrases = decompose("((a)|(b))*.(a)").unwrap();
///
/// assert_eq!(2, phrases.len());
/// assert_eq!("(a)|(b)", phrases[0].expression);
/// assert!(phrases[0].has_star);
/// assert_eq!(Some(Operator::Concatenation), phrases[0].next_operator);
/// assert_eq!(Some(Operator::Concatenation), phrases[1].prev_operator);
/// ```
pub fn decompose(expression: &str) -> Result<Vec<Phrase<'_>>, ParseErr> {
    let chars = expression.char_indices().collect::<Vec<_>>();
    let mut phrases = Vec::new();
    let mut prev_operator: Option<Operator> = None;
    let mut idx = 0;

    loop {
        let open_pos = match chars.get(idx) {
            Some(&(pos, OPEN_GROUP)) => pos,
            Some(&(pos, c)) => {
                return Err(ParseErr::new(ParseErrKind::InvalidExpression)
                    .with_data(format!("expected '(' but found '{}' at offset {}", c, pos)))
            }
            None => {
                return Err(ParseErr::new(ParseErrKind::InvalidExpression)
                    .with_data(format!("expected a group at end of {:?}", expression)))
            }
        };

        let close = matching_close(&chars, idx).ok_or_else(|| {
            ParseErr::new(ParseErrKind::UnbalancedParentheses)
                .with_data(format!("unclosed '(' at offset {}", open_pos))
        })?;
        let (close_pos, _) = chars[close];

        // both parens are a single byte wide.
        let inner = &expression[open_pos + 1..close_pos];
        if inner.is_empty() {
            return Err(ParseErr::new(ParseErrKind::InvalidExpression)
                .with_data(format!("empty group at offset {}", open_pos)));
        }

        idx = close + 1;
        let has_star = matches!(chars.get(idx), Some(&(_, KLEENE_STAR)));
        if has_star {
            idx += 1;
        }

        let next_operator = match chars.get(idx) {
            None => None,
            Some(&(pos, CLOSE_GROUP)) => {
                return Err(ParseErr::new(ParseErrKind::UnbalancedParentheses)
                    .with_data(format!("unopened ')' at offset {}", pos)))
            }
            Some(&(pos, c)) => match Operator::from_char(c) {
                Some(operator) => {
                    idx += 1;
                    Some(operator)
                }
                None => {
                    return Err(ParseErr::new(ParseErrKind::InvalidExpression).with_data(
                        format!("expected an operator but found '{}' at offset {}", c, pos),
                    ))
                }
            },
        };

        match (prev_operator, next_operator) {
            (Some(prev), Some(next)) if prev != next => {
                return Err(ParseErr::new(ParseErrKind::InvalidExpression).with_data(format!(
                    "mixed '{}' and '{}' operators at one level of {:?}",
                    prev.as_char(),
                    next.as_char(),
                    expression
                )))
            }
            _ => (),
        }

        phrases.push(Phrase {
            expression: inner,
            has_star,
            prev_operator,
            next_operator,
        });

        match next_operator {
            Some(operator) => prev_operator = Some(operator),
            None => return Ok(phrases),
        }
    }
}

fn matching_close(chars: &[(usize, char)], open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (idx, &(_, c)) in chars.iter().enumerate().skip(open) {
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
