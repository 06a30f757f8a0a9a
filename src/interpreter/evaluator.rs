/// Binary operator evaluation logic.
///
/// Handles the arithmetic of `+ - × ÷ % ^` over integers and reals, including
/// overflow fallback and zero-division checks.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements identity, negation and factorial.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the evaluation context with its constants and functions, the
/// calculator presets, and the dispatch over tree nodes.
pub mod core;

/// Function evaluation.
///
/// Handles function values, arity checking and the built-in functions.
pub mod function;
