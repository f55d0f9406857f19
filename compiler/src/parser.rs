use parcel::parsers::character::expect_character;
use parcel::prelude::v1::*;

/// Joins two operands in sequence. Only ever produced by normalization.
pub const CONCATENATION: char = '.';
pub const UNION: char = '|';
pub const KLEENE_STAR: char = '*';
pub const OPEN_GROUP: char = '(';
pub const CLOSE_GROUP: char = ')';

/// Returns true if `c` is matchable as a single-character literal, any
/// alphabetic character or ASCII digit.
pub fn is_literal(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit()
}

fn is_operator(c: char) -> bool {
    [UNION, KLEENE_STAR, OPEN_GROUP, CLOSE_GROUP].contains(&c)
}

/// Represents all error types that may _expectedly_ occur while turning a
/// pattern into an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrKind {
    /// The pattern contains no characters.
    EmptyPattern,
    /// A character that is neither a literal nor an operator.
    UnsupportedToken,
    /// A group is opened and never closed, or closed and never opened.
    UnbalancedParentheses,
    /// The pattern is composed of valid tokens in an invalid arrangement,
    /// such as an empty group or a dangling operator.
    InvalidExpression,
}

/// A malformed pattern, including the error kind and any optional
/// enriching data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErr {
    /// The type of triggered error.
    kind: ParseErrKind,
    /// Additional error data.
    data: Option<String>,
}

impl ParseErr {
    /// Instantiates a new error.
    pub fn new(kind: ParseErrKind) -> Self {
        Self { kind, data: None }
    }

    /// Associates additional data with the error, returning the modified error.
    pub fn with_data(mut self, data: String) -> Self {
        self.with_data_mut(data);
        self
    }

    /// Associates additional data with the error.
    pub fn with_data_mut(&mut self, data: String) {
        self.data = Some(data);
    }

    pub fn kind(&self) -> ParseErrKind {
        self.kind
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self.kind {
            ParseErrKind::EmptyPattern => "pattern is empty",
            ParseErrKind::UnsupportedToken => "unsupported token",
            ParseErrKind::UnbalancedParentheses => "unbalanced parentheses",
            ParseErrKind::InvalidExpression => "invalid expression",
        };

        match &self.data {
            Some(data) => write!(f, "{}: {}", description, data),
            None => write!(f, "{}", description),
        }
    }
}

impl std::error::Error for ParseErr {}

/// Validates that a pattern is well-formed under the grammar:
///
/// ```text
/// expression := branch ('|' branch)*
/// branch     := item+
/// item       := atom '*'*
/// atom       := literal | '(' expression ')'
/// ```
///
/// Concatenation is implicit in a valid pattern, and is inserted during
/// normalization.
pub fn validate(pattern: &str) -> Result<(), ParseErr> {
    let res = validate_inner(pattern);

    if let Err(_err) = &res {
        debug!("rejected pattern {:?}: {}", pattern, _err);
    }

    res
}

fn validate_inner(pattern: &str) -> Result<(), ParseErr> {
    if pattern.is_empty() {
        return Err(ParseErr::new(ParseErrKind::EmptyPattern));
    }

    let input = pattern.chars().enumerate().collect::<Vec<(usize, char)>>();

    if let Some(&(pos, c)) = input
        .iter()
        .find(|(_, c)| !is_literal(*c) && !is_operator(*c))
    {
        return Err(ParseErr::new(ParseErrKind::UnsupportedToken)
            .with_data(format!("'{}' at position {}", c, pos)));
    }

    check_balanced(&input)?;

    let unexpected = |(pos, c): (usize, char)| {
        ParseErr::new(ParseErrKind::InvalidExpression)
            .with_data(format!("unexpected '{}' at position {}", c, pos))
    };

    expression()
        .parse(&input[..])
        .map_err(|err| {
            ParseErr::new(ParseErrKind::InvalidExpression)
                .with_data(format!("unspecified parse error occured: {}", err))
        })
        .and_then(|ms| match ms {
            MatchStatus::Match { remainder, .. } => match remainder.first() {
                None => Ok(()),
                Some(&token) => Err(unexpected(token)),
            },
            MatchStatus::NoMatch(remainder) => match remainder.first() {
                Some(&token) => Err(unexpected(token)),
                None => Err(ParseErr::new(ParseErrKind::EmptyPattern)),
            },
        })
}

/// Reports the first closing paren without an opener, or the last opening
/// paren that is never closed.
fn check_balanced(input: &[(usize, char)]) -> Result<(), ParseErr> {
    let mut open = Vec::new();

    for &(pos, c) in input {
        if c == OPEN_GROUP {
            open.push(pos);
        } else if c == CLOSE_GROUP && open.pop().is_none() {
            return Err(ParseErr::new(ParseErrKind::UnbalancedParentheses)
                .with_data(format!("unopened ')' at position {}", pos)));
        }
    }

    match open.pop() {
        Some(pos) => Err(ParseErr::new(ParseErrKind::UnbalancedParentheses)
            .with_data(format!("unclosed '(' at position {}", pos))),
        None => Ok(()),
    }
}

// Expression

fn expression<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ()> {
    parcel::join(
        branch(),
        parcel::zero_or_more(parcel::right(parcel::join(
            expect_character(UNION),
            branch(),
        ))),
    )
    .map(|_| ())
}

fn branch<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ()> {
    parcel::one_or_more(item()).map(|_| ())
}

fn item<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ()> {
    parcel::join(atom(), parcel::zero_or_more(expect_character(KLEENE_STAR))).map(|_| ())
}

fn atom<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ()> {
    parcel::or(group(), || literal().map(|_| ()))
}

// Group

fn group<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ()> {
    expect_character(OPEN_GROUP).and_then(|_| {
        parcel::left(parcel::join(expression(), expect_character(CLOSE_GROUP)))
    })
}

// Literals

/// Matches a single character accepted by [`is_literal`].
fn literal<'a>() -> impl Parser<'a, &'a [(usize, char)], char> {
    move |input: &'a [(usize, char)]| match input.first() {
        Some(&(pos, next)) if is_literal(next) => Ok(MatchStatus::Match {
            span: pos..pos + 1,
            remainder: &input[1..],
            inner: next,
        }),
        _ => Ok(MatchStatus::NoMatch(input)),
    }
}
