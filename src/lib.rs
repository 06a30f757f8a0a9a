//! # calcore
//!
//! calcore is the arithmetic-expression engine of a calculator written in
//! Rust. It tokenizes a typed expression such as `2 × (3 + sin(π ÷ 2))`,
//! parses it into a tree in a single pass, and evaluates the tree against a
//! context of named constants and functions, reporting every failure with a
//! typed error.
//!
//! ```
//! use calcore::{Context, evaluate, interpreter::value::Number};
//!
//! assert_eq!(evaluate("1 + 2 × 3", None).unwrap(), Number::Integer(7));
//! assert_eq!(evaluate("1 ÷ 2 × 4", None).unwrap(), Number::Real(2.0));
//! assert_eq!(evaluate("2 + -3!", None).unwrap(), Number::Integer(-4));
//!
//! let context = Context::scientific();
//! assert_eq!(evaluate("floor(sqrt(10))", Some(&context)).unwrap(), Number::Integer(3));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum, the operator enums and the operator
/// tables that give each symbol its priority and fixity. The tree is built by
/// the parser and read by the evaluator.
///
/// # Responsibilities
/// - Defines the node kinds of an expression tree.
/// - Attaches source offsets to nodes for error reporting.
/// - Renders trees back to fully parenthesised text.
pub mod ast;
/// Provides the error types for parsing and evaluation.
///
/// Parsing errors carry the character offset they point at; evaluation
/// errors name the constant or function involved or wrap the arithmetic
/// failure behind them.
///
/// # Responsibilities
/// - Defines one error enum per phase and a crate-level union of both.
/// - Maps every error to the short message a calculator display shows.
pub mod error;
/// Orchestrates tokenizing, parsing and evaluation.
///
/// This module ties together the lexer, parser, evaluator and value types.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion and display formatting.
///
/// # Responsibilities
/// - Convert between `i64`, `u32` and `f64` without silent data loss.
/// - Format results the way a calculator display shows them.
pub mod util;

use tracing::trace;

pub use crate::{
    ast::Expr,
    error::{ArithmeticFault, Error, EvalError, ParseError},
    interpreter::{
        evaluator::core::Context,
        lexer::tokenize,
        parser::core::{parse, parse_expression},
        value::Number,
    },
};

/// What [`evaluate`] accepts: expression text or an already-built tree.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// Source text, tokenized and parsed before evaluation.
    Source(&'a str),
    /// A tree, evaluated as is.
    Tree(&'a Expr),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(source: &'a str) -> Self {
        Self::Source(source)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(source: &'a String) -> Self {
        Self::Source(source)
    }
}

impl<'a> From<&'a Expr> for Input<'a> {
    fn from(tree: &'a Expr) -> Self {
        Self::Tree(tree)
    }
}

/// Evaluates expression text or a tree.
///
/// Without a context, a [`Context::new`] (π and e, no functions) is used.
///
/// # Errors
/// [`Error::Parse`] if the text does not parse, [`Error::Eval`] if the tree
/// does not evaluate.
///
/// # Examples
/// ```
/// use calcore::{ArithmeticFault, EvalError, evaluate, parse_expression};
///
/// // Text and trees evaluate alike.
/// let tree = parse_expression("(1 + 2) × 3").unwrap();
/// assert_eq!(evaluate(&tree, None).unwrap(), evaluate("(1 + 2) × 3", None).unwrap());
///
/// // An unknown name fails at evaluation, naming the identifier.
/// let err = evaluate("1 + a - 2", None).unwrap_err();
/// assert_eq!(err.as_eval(), Some(&EvalError::UnknownConstant { name: "a".to_string() }));
///
/// // Arithmetic failures keep their kind.
/// let err = evaluate("1 ÷ 0", None).unwrap_err();
/// assert_eq!(err.as_eval().and_then(EvalError::fault), Some(&ArithmeticFault::ZeroDivision));
/// ```
pub fn evaluate<'a>(input: impl Into<Input<'a>>, context: Option<&Context>) -> Result<Number, Error> {
    let default_context;
    let context = if let Some(context) = context {
        context
    } else {
        default_context = Context::new();
        &default_context
    };

    match input.into() {
        Input::Source(source) => {
            trace!(source, "evaluating source");
            let tree = parse_expression(source)?;
            Ok(context.evaluate(&tree)?)
        },
        Input::Tree(tree) => Ok(context.evaluate(tree)?),
    }
}
