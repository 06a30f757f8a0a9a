/// Parsing errors.
///
/// Defines every error the tokenizer and parser can report. Each one points at
/// a character offset in the source so a front end can underline it.
pub mod parse_error;
/// Evaluation errors.
///
/// Defines the errors raised while evaluating a tree: unresolved names, wrong
/// argument counts, results that are not real numbers, and wrapped arithmetic
/// failures.
pub mod eval_error;

pub use eval_error::{ArithmeticFault, EvalError};
pub use parse_error::ParseError;
use thiserror::Error;

/// Any error from the string-to-value pipeline.
///
/// Tree input can only fail with [`Error::Eval`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source text did not tokenize or parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The tree did not evaluate.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    #[must_use]
    pub const fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Eval(_) => None,
        }
    }

    #[must_use]
    pub const fn as_eval(&self) -> Option<&EvalError> {
        match self {
            Self::Eval(e) => Some(e),
            Self::Parse(_) => None,
        }
    }

    /// The short message a calculator display shows for this error.
    #[must_use]
    pub const fn display_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "ERROR",
            Self::Eval(e) => e.display_message(),
        }
    }
}
