use thiserror::Error;

use crate::interpreter::evaluator::function::core::Arity;

/// The arithmetic failure behind an [`EvalError::Arithmetic`].
///
/// Callers match on this to pick a message without knowing which operator or
/// function failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticFault {
    /// Division or modulo by zero, or zero raised to a negative power.
    #[error("zero division")]
    ZeroDivision,
    /// An operand outside the operation's domain (factorial of `-1`,
    /// `sqrt(-1)`, `ln(0)`).
    #[error("value error: {details}")]
    Domain {
        /// What was out of domain.
        details: String,
    },
    /// Any other numeric failure, such as a result too large for `f64`.
    #[error("arithmetic error: {details}")]
    Unclassified {
        /// What went wrong.
        details: String,
    },
}

impl ArithmeticFault {
    pub(crate) fn domain(details: impl Into<String>) -> Self {
        Self::Domain { details: details.into() }
    }

    pub(crate) fn overflow(details: impl Into<String>) -> Self {
        Self::Unclassified { details: details.into() }
    }
}

/// Represents all errors that can occur while evaluating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A name with no entry in the context's constants.
    #[error("unknown constant '{name}'")]
    UnknownConstant {
        /// The constant name.
        name: String,
    },
    /// A call to a name with no entry in the context's functions.
    #[error("unsupported function '{name}'")]
    UnsupportedFunction {
        /// The function name.
        name: String,
    },
    /// A call whose argument count falls outside the function's arity.
    #[error("incorrect number of arguments passed into function '{name}': expected {arity}, found {found}")]
    ArgumentCountMismatch {
        /// The function name.
        name:  String,
        /// What the function accepts.
        arity: Arity,
        /// How many arguments the call passed.
        found: usize,
    },
    /// The mathematical result is not a real number (a negative base to a
    /// fractional power, or NaN out of an operator).
    #[error("invalid expression")]
    InvalidResult,
    /// A numeric failure inside an operator or function.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticFault),
}

impl EvalError {
    /// The wrapped arithmetic failure, if this error is one.
    ///
    /// # Example
    /// ```
    /// use calcore::{ArithmeticFault, evaluate};
    ///
    /// let err = evaluate("1 ÷ 0", None).unwrap_err();
    /// assert_eq!(err.as_eval().and_then(|e| e.fault()), Some(&ArithmeticFault::ZeroDivision));
    /// ```
    #[must_use]
    pub const fn fault(&self) -> Option<&ArithmeticFault> {
        match self {
            Self::Arithmetic(fault) => Some(fault),
            _ => None,
        }
    }

    /// The short message a calculator display shows for this error.
    #[must_use]
    pub const fn display_message(&self) -> &'static str {
        match self {
            Self::Arithmetic(ArithmeticFault::ZeroDivision) => "ERROR: Zero Division",
            Self::Arithmetic(ArithmeticFault::Domain { .. }) => "ERROR: Invalid Input",
            _ => "ERROR",
        }
    }
}
