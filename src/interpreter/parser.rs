/// Parser entry points and the operator chain.
///
/// Reads a chain of operands and binary operators in one loop and hands it
/// to [`binary::Chain`] to build a left-associative tree.
pub mod core;

/// Operand parsing.
///
/// Handles atoms (literals, names, brackets, calls) together with the prefix
/// and postfix unary operators around them.
pub mod unary;

/// Operator-chain folding.
///
/// Builds the tree of an `operand (op operand)*` chain, grouping by priority
/// and folding equal priorities to the left.
pub mod binary;

/// Token cursor shared by the parsing functions.
mod cursor;
