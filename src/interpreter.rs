/// The evaluator module computes the value of a syntax tree.
///
/// The evaluator walks the tree bottom-up, resolving constant and function
/// names through a [`Context`](evaluator::core::Context), and reports
/// arithmetic failures as typed errors.
///
/// # Responsibilities
/// - Evaluates every node kind of the tree.
/// - Holds named constants and functions, with calculator presets.
/// - Reports unknown names, wrong argument counts and numeric failures.
pub mod evaluator;
/// The lexer module tokenizes expression text for further parsing.
///
/// The lexer reads the raw text one character at a time and produces numbers,
/// names, operator symbols and brackets, each tagged with its character
/// offset. Number literals go through a small state machine.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Types number literals as integers or reals.
/// - Reports invalid characters and malformed numbers with their offset.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// The parser reads the tokens in one pass. Operator chains are collected in
/// a loop and folded by priority, so operators of equal priority associate
/// to the left and only brackets and calls nest the parser.
///
/// # Responsibilities
/// - Converts tokens into tree nodes.
/// - Applies operator priority, fixity and bracket grouping.
/// - Reports syntax errors with the offset of the offending token.
pub mod parser;
/// The value module defines the numeric type produced by evaluation.
pub mod value;
