use std::fmt;

use tracing::trace;

use crate::{ast::is_operator_symbol, error::ParseError, interpreter::value::Number};

/// Characters besides letters and digits that may appear in a name.
pub const NAME_SPECIAL_CHARS: &[char] = &['π', '_'];
/// Separator symbols that are not operators.
pub const SEPARATORS: &[char] = &[','];

const DOT: char = '.';
const SPACE: char = ' ';

/// Represents a lexical token in the source input.
///
/// Tokens are produced paired with the 0-based character offset they start
/// at, see [`SpannedToken`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal tokens, such as `100`, `.5`, `2.` or `3.1e-5`.
    Number(Number),
    /// Identifier tokens; constant or function names such as `π` or `a_0`.
    Name(String),
    /// Operator or separator symbols such as `+`, `×`, `!` or `,`.
    Symbol(char),
    /// `(`
    OpenBracket,
    /// `)`
    CloseBracket,
}

/// A token with the character offset it starts at.
pub type SpannedToken = (Token, usize);

impl Token {
    /// `true` for a [`Token::Symbol`] spelling `symbol`.
    #[must_use]
    pub fn is_symbol(&self, symbol: char) -> bool {
        matches!(self, Self::Symbol(s) if *s == symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => write!(f, "{name}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::OpenBracket => write!(f, "("),
            Self::CloseBracket => write!(f, ")"),
        }
    }
}

/// States of the number-literal scanner.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum NumberState {
    Start,
    Integer,
    Fraction,
    Exponent,
    ExponentValue,
}

impl NumberState {
    const fn accepts_dot(self) -> bool {
        matches!(self, Self::Start | Self::Integer)
    }

    const fn accepts_exponent(self) -> bool {
        matches!(self, Self::Integer | Self::Fraction)
    }

    /// A literal may end in this state.
    const fn is_terminal(self) -> bool {
        matches!(self, Self::Integer | Self::Fraction | Self::ExponentValue)
    }

    const fn after_digit(self) -> Self {
        match self {
            Self::Start => Self::Integer,
            Self::Exponent => Self::ExponentValue,
            other => other,
        }
    }
}

/// Converts an expression string into tokens paired with their offsets.
///
/// ASCII spaces separate tokens and are dropped. Names are not checked
/// against any list here; the evaluator resolves them.
///
/// # Errors
/// - [`ParseError::EmptyExpression`] for `""`.
/// - [`ParseError::InvalidCharacter`] for a character no token accepts.
/// - [`ParseError::InvalidNumber`] for a malformed number literal.
///
/// An integer literal beyond the `i64` range becomes a real, the same way
/// integer arithmetic continues in `f64` on overflow.
///
/// # Example
/// ```
/// use calcore::{interpreter::{lexer::Token, value::Number}, tokenize};
///
/// let tokens = tokenize("100 × (2 + π)").unwrap();
/// assert_eq!(tokens[0], (Token::Number(Number::Integer(100)), 0));
/// assert_eq!(tokens[1], (Token::Symbol('×'), 4));
/// assert_eq!(tokens[2], (Token::OpenBracket, 6));
/// assert_eq!(tokens[5], (Token::Name("π".to_string()), 11));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    if source.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_operator_symbol(c) || SEPARATORS.contains(&c) {
            tokens.push((Token::Symbol(c), i));
            i += 1;
        } else if c == '(' {
            tokens.push((Token::OpenBracket, i));
            i += 1;
        } else if c == ')' {
            tokens.push((Token::CloseBracket, i));
            i += 1;
        } else if c == DOT || c.is_ascii_digit() {
            let (number, end) = read_number(&chars, i)?;
            tokens.push((Token::Number(number), i));
            i = end;
        } else if c == SPACE {
            i += 1;
        } else if is_name_char(c) {
            let end = read_name(&chars, i);
            tokens.push((Token::Name(chars[i..end].iter().collect()), i));
            i = end;
        } else {
            return Err(ParseError::InvalidCharacter { character: c,
                                                      position:  i, });
        }
    }

    trace!(tokens = tokens.len(), "tokenized expression");
    Ok(tokens)
}

/// Letters, digits and [`NAME_SPECIAL_CHARS`].
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric() || NAME_SPECIAL_CHARS.contains(&c)
}

fn read_name(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() && is_name_char(chars[i]) {
        i += 1;
    }
    i
}

/// Runs the number state machine from `start` and returns the value together
/// with the offset just past the literal.
///
/// The literal stays an integer only if the scanner never left
/// `NumberState::Integer`; `2.` and `3e10` are reals.
fn read_number(chars: &[char], start: usize) -> Result<(Number, usize), ParseError> {
    let mut state = NumberState::Start;
    let mut i = start;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() {
            state = state.after_digit();
        } else if c == DOT {
            if !state.accepts_dot() {
                return Err(ParseError::InvalidNumber { character: c,
                                                       position:  i, });
            }
            state = NumberState::Fraction;
        } else if c == 'e' || c == 'E' {
            if !state.accepts_exponent() {
                return Err(ParseError::InvalidNumber { character: c,
                                                       position:  i, });
            }
            state = NumberState::Exponent;
        } else if c.is_alphabetic() {
            return Err(ParseError::InvalidCharacter { character: c,
                                                      position:  i, });
        } else if (c == '+' || c == '-') && state == NumberState::Exponent {
            state = NumberState::ExponentValue;
        } else {
            break;
        }
        i += 1;
    }

    // The loop consumed at least the first character, so `i > start`.
    let last = i - 1;
    let invalid = || ParseError::InvalidNumber { character: chars[last],
                                                 position:  last, };
    if !state.is_terminal() {
        return Err(invalid());
    }

    let literal: String = chars[start..i].iter().collect();
    let number = if state == NumberState::Integer
                    && let Ok(integer) = literal.parse::<i64>()
    {
        Number::Integer(integer)
    } else {
        // Integers beyond `i64` land here too. `.` alone and a bare exponent
        // sign (`1e+`) reach a terminal state without forming a number.
        literal.parse::<f64>().map(Number::Real).map_err(|_| invalid())?
    };

    Ok((number, i))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    fn number(source: &str) -> Number {
        match tokenize(source).unwrap().as_slice() {
            [(Token::Number(n), 0)] => *n,
            other => panic!("expected a single number token, got {other:?}"),
        }
    }

    #[test]
    fn basic_expression() {
        let tokens = tokenize("100 + 200").unwrap();
        assert_eq!(tokens,
                   vec![(Token::Number(Number::Integer(100)), 0),
                        (Token::Symbol('+'), 4),
                        (Token::Number(Number::Integer(200)), 6),]);

        let tokens = tokenize("1+2 × 2.2 - 10").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2, 4, 6, 10, 12]);
        assert_eq!(tokens[4].0, Token::Number(Number::Real(2.2)));
    }

    #[test]
    fn brackets_are_their_own_kinds() {
        let tokens = tokenize("100 × (200 + 10)").unwrap();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[2], (Token::OpenBracket, 6));
        assert_eq!(tokens[6], (Token::CloseBracket, 15));
    }

    #[test]
    fn integer_literals_stay_integral() {
        assert_eq!(number("100"), Number::Integer(100));
        assert_eq!(number("007"), Number::Integer(7));
    }

    #[test]
    fn dots_and_exponents_make_reals() {
        assert_eq!(number("100.3"), Number::Real(100.3));
        assert_eq!(number("100."), Number::Real(100.0));
        assert_eq!(number(".2"), Number::Real(0.2));
        assert_eq!(number("3e10"), Number::Real(3e10));
        assert_eq!(number("3.1e-5"), Number::Real(3.1e-5));
        assert_eq!(number("2E+3"), Number::Real(2000.0));
    }

    #[test]
    fn names_accept_special_characters() {
        assert_eq!(kinds("1 + π × 30")[2], Token::Name("π".to_string()));
        assert_eq!(kinds("1 + a_0 - 1")[2], Token::Name("a_0".to_string()));
        assert_eq!(kinds("1 + sin(2 × π)").len(), 8);
    }

    #[test]
    fn letter_inside_number_is_rejected_at_its_offset() {
        let err = tokenize("1 + 0a - 1").unwrap_err();
        assert_eq!(err,
                   ParseError::InvalidCharacter { character: 'a',
                                                  position:  5, });
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(tokenize("1.2.3").unwrap_err(),
                   ParseError::InvalidNumber { character: '.',
                                               position:  3, });
        assert_eq!(tokenize("1e5e2").unwrap_err(),
                   ParseError::InvalidNumber { character: 'e',
                                               position:  3, });
        assert_eq!(tokenize("2e + 1").unwrap_err(),
                   ParseError::InvalidNumber { character: 'e',
                                               position:  1, });
        assert_eq!(tokenize("2e").unwrap_err(),
                   ParseError::InvalidNumber { character: 'e',
                                               position:  1, });
        assert_eq!(tokenize(". + 1").unwrap_err(),
                   ParseError::InvalidNumber { character: '.',
                                               position:  0, });
    }

    #[test]
    fn integer_literal_beyond_i64_becomes_real() {
        assert_eq!(kinds("9223372036854775807"),
                   vec![Token::Number(Number::Integer(i64::MAX))]);
        assert_eq!(kinds("9223372036854775808"),
                   vec![Token::Number(Number::Real(9_223_372_036_854_775_808.0))]);
        assert_eq!(kinds("99999999999999999999"), vec![Token::Number(Number::Real(1e20))]);
    }

    #[test]
    fn sign_after_number_is_a_separate_symbol() {
        assert_eq!(kinds("2-1"),
                   vec![Token::Number(Number::Integer(2)),
                        Token::Symbol('-'),
                        Token::Number(Number::Integer(1)),]);
        assert_eq!(kinds("2e-1"), vec![Token::Number(Number::Real(0.2))]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(tokenize("").unwrap_err(), ParseError::EmptyExpression);
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }

    #[test]
    fn unknown_characters_are_rejected() {
        assert_eq!(tokenize("1 # 2").unwrap_err(),
                   ParseError::InvalidCharacter { character: '#',
                                                  position:  2, });
        assert_eq!(tokenize("1\t+ 2").unwrap_err(),
                   ParseError::InvalidCharacter { character: '\t',
                                                  position:  1, });
    }

    #[test]
    fn separators_and_postfix_symbols() {
        assert_eq!(kinds("f(1, 2)!"),
                   vec![Token::Name("f".to_string()),
                        Token::OpenBracket,
                        Token::Number(Number::Integer(1)),
                        Token::Symbol(','),
                        Token::Number(Number::Integer(2)),
                        Token::CloseBracket,
                        Token::Symbol('!'),]);
    }
}
