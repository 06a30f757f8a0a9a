use tracing::trace;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{SEPARATORS, SpannedToken, Token, tokenize},
        parser::{binary::Chain, cursor::Cursor, unary::parse_operand},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Builds an expression tree from tokens.
///
/// Parsing is a single left-to-right pass with one token of lookahead. The
/// whole token slice must form one expression.
///
/// # Parameters
/// - `tokens`: `(Token, position)` pairs as produced by [`tokenize`].
///
/// # Returns
/// The root of the expression tree.
///
/// # Errors
/// - `EmptyExpression` for an empty slice.
/// - `UnmatchedCloseBracket` for a `)` left over after a complete
///   expression.
/// - `UnexpectedToken` for any other leftover token.
/// - Any error raised while parsing the chain.
///
/// # Example
/// ```
/// use calcore::{parse, tokenize};
///
/// let tokens = tokenize("1 + 2 × 3").unwrap();
/// let tree = parse(&tokens).unwrap();
/// assert_eq!(tree.to_string(), "(1 + (2 × 3))");
/// ```
pub fn parse(tokens: &[SpannedToken]) -> ParseResult<Expr> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut cursor = Cursor::new(tokens);
    let expr = parse_chain(&mut cursor)?;

    match cursor.current() {
        None => {
            trace!(tokens = tokens.len(), "parsed expression tree");
            Ok(expr)
        },
        Some((Token::CloseBracket, position)) => {
            Err(ParseError::UnmatchedCloseBracket { position: *position })
        },
        Some((token, position)) => Err(ParseError::UnexpectedToken { token:    token.to_string(),
                                                                     position: *position, }),
    }
}

/// Tokenizes and parses `source` in one step.
///
/// # Errors
/// Any tokenizer or parser error.
///
/// # Example
/// ```
/// use calcore::{ParseError, parse_expression};
///
/// let err = parse_expression("(1+2 × 3").unwrap_err();
/// assert_eq!(err, ParseError::UnmatchedOpenBracket { position: 0 });
/// ```
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    parse(&tokenize(source)?)
}

/// Parses an operand followed by any number of `op operand` pairs.
///
/// The chain is read in a loop and folded with [`Chain`], so only brackets
/// and calls nest the parser. The chain ends at the end of input, a `)` or
/// a `,`; the caller decides whether that is acceptable.
///
/// Grammar: `chain := operand (binary_op operand)*`
///
/// # Errors
/// - `UnexpectedToken` if an operand is followed by anything other than a
///   binary operator, `)`, `,` or the end of input.
/// - Any error from the operands.
pub(in crate::interpreter::parser) fn parse_chain(cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
    let mut chain = Chain::new(parse_operand(cursor)?);

    while let Some((Token::Symbol(symbol), position)) = cursor.current()
          && let Some(op) = BinaryOperator::from_symbol(*symbol)
    {
        cursor.advance();
        chain.push(op, *position, parse_operand(cursor)?);
    }

    match cursor.current() {
        None | Some((Token::CloseBracket, _)) => Ok(chain.finish()),
        Some((Token::Symbol(symbol), _)) if SEPARATORS.contains(symbol) => Ok(chain.finish()),
        Some((token, position)) => Err(ParseError::UnexpectedToken { token:    token.to_string(),
                                                                     position: *position, }),
    }
}
