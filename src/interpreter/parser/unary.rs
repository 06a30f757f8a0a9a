use crate::{
    ast::{Expr, Fixity, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{SEPARATORS, Token},
        parser::{
            core::{ParseResult, parse_chain},
            cursor::Cursor,
        },
    },
};

/// Parses one operand: prefix operators, an atom, and an optional postfix
/// operator.
///
/// Prefix operators nest (`--3` is `-(-3)`). A postfix operator binds to
/// the innermost operand it outranks or ties, so with factorial above the
/// signs `-3!` reads `-(3!)`. It never reaches inside a bracketed atom:
/// `(-3)!` stays as written.
///
/// Grammar: `operand := prefix* atom postfix?`
///
/// # Errors
/// - `NotPrefixOperator` if a postfix operator starts the operand.
/// - Any error from [`parse_atom`].
pub(in crate::interpreter::parser) fn parse_operand(cursor: &mut Cursor<'_>)
                                                    -> ParseResult<Expr> {
    let mut prefixes = Vec::new();
    while let Some((Token::Symbol(symbol), position)) = cursor.current()
          && let Some(op) = UnaryOperator::from_symbol(*symbol)
    {
        if op.fixity() != Fixity::Prefix {
            return Err(ParseError::NotPrefixOperator { symbol:   *symbol,
                                                       position: *position, });
        }
        prefixes.push((op, *position));
        cursor.advance();
    }

    let atom = parse_atom(cursor)?;

    let mut postfix = None;
    if let Some((Token::Symbol(symbol), position)) = cursor.current()
       && let Some(op) = UnaryOperator::from_symbol(*symbol)
       && op.fixity() == Fixity::Postfix
    {
        cursor.advance();
        postfix = Some((op, *position));
    }

    Ok(attach_unary(&prefixes, atom, postfix))
}

/// Wraps `atom` in its unary operators.
///
/// `prefixes` is ordered outermost first. The postfix operator descends past
/// every leading prefix whose priority it meets or exceeds, and wraps the
/// rest.
fn attach_unary(prefixes: &[(UnaryOperator, usize)],
                atom: Expr,
                postfix: Option<(UnaryOperator, usize)>)
                -> Expr {
    let split = postfix.map_or(prefixes.len(), |(op, _)| {
                           prefixes.iter()
                                   .position(|(prefix, _)| op.priority() < prefix.priority())
                                   .unwrap_or(prefixes.len())
                       });
    let (outer, inner) = prefixes.split_at(split);

    let mut expr = atom;
    for (op, position) in inner.iter().rev() {
        expr = Expr::unary(*op, expr, *position);
    }
    if let Some((op, position)) = postfix {
        expr = Expr::unary(op, expr, position);
    }
    for (op, position) in outer.iter().rev() {
        expr = Expr::unary(*op, expr, *position);
    }
    expr
}

/// Parses an atom.
///
/// Atoms are:
/// - number literals
/// - constant names
/// - function calls, a name directly followed by `(`
/// - bracketed chains
///
/// # Errors
/// - `UnexpectedEndOfInput` if no token is left.
/// - `UnexpectedToken` for any token that cannot start an atom.
/// - Errors from the bracket or call parsers.
fn parse_atom(cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
    match cursor.current() {
        Some((Token::Number(value), position)) => {
            cursor.advance();
            Ok(Expr::number(*value, *position))
        },
        Some((Token::Name(name), position)) => {
            if let Some((Token::OpenBracket, _)) = cursor.peek() {
                parse_function_call(cursor, name, *position)
            } else {
                cursor.advance();
                Ok(Expr::constant(name.clone(), *position))
            }
        },
        Some((Token::OpenBracket, position)) => parse_group(cursor, *position),
        Some((token, position)) => Err(ParseError::UnexpectedToken { token:    token.to_string(),
                                                                     position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: cursor.end_position() }),
    }
}

/// Parses `( chain )` with the cursor on the opening bracket.
///
/// The bracketed chain becomes a plain operand; the enclosing chain never
/// regroups its contents.
fn parse_group(cursor: &mut Cursor<'_>, open_position: usize) -> ParseResult<Expr> {
    cursor.advance();
    if cursor.is_at_end() {
        return Err(ParseError::UnmatchedOpenBracket { position: open_position });
    }

    let expr = parse_chain(cursor)?;

    match cursor.current() {
        Some((Token::CloseBracket, _)) => {
            cursor.advance();
            Ok(expr)
        },
        Some((token, position)) => Err(ParseError::UnexpectedToken { token:    token.to_string(),
                                                                     position: *position, }),
        None => Err(ParseError::UnmatchedOpenBracket { position: open_position }),
    }
}

/// Parses `name ( arg, arg, ... )` with the cursor on the name.
///
/// An empty list is allowed, and so is a trailing comma: `f(1,)` passes one
/// argument. Each argument is a full chain.
///
/// # Errors
/// - `UnclosedFunctionCall`, at the name, if the tokens run out before `)`.
/// - Any error from the argument chains.
fn parse_function_call(cursor: &mut Cursor<'_>,
                       name: &str,
                       position: usize)
                       -> ParseResult<Expr> {
    let unclosed = || ParseError::UnclosedFunctionCall { name: name.to_string(),
                                                         position };
    cursor.advance();
    cursor.advance();

    let mut arguments = Vec::new();
    loop {
        match cursor.current() {
            Some((Token::CloseBracket, _)) => {
                cursor.advance();
                break;
            },
            None => return Err(unclosed()),
            Some(_) => {},
        }

        arguments.push(parse_chain(cursor)?);

        match cursor.current() {
            Some((Token::Symbol(symbol), _)) if SEPARATORS.contains(symbol) => cursor.advance(),
            Some((Token::CloseBracket, _)) => {
                cursor.advance();
                break;
            },
            Some((token, position)) => {
                return Err(ParseError::UnexpectedToken { token:    token.to_string(),
                                                         position: *position, });
            },
            None => return Err(unclosed()),
        }
    }

    Ok(Expr::call(name, arguments, position))
}
