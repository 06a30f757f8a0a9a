/// Binary operator dispatch.
///
/// Evaluates both operands and routes the operator to its arithmetic.
pub mod core;

/// Addition, subtraction, multiplication, division and modulo.
pub mod scalar;

/// Exponentiation.
pub mod power;
