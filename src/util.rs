/// Numeric conversion helpers.
///
/// Conversions between `i64`, `u32` and `f64` that report when a value cannot
/// be carried over exactly, plus the tolerance comparison used by display
/// formatting.
pub mod num;
/// Display formatting for evaluation results.
///
/// Turns a [`Number`](crate::interpreter::value::Number) into the short text a
/// calculator shows, hiding floating-point noise.
pub mod format;
