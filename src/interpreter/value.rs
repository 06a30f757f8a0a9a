use std::fmt;

use crate::util::num::i64_to_f64;

/// A numeric value produced by the lexer or the evaluator.
///
/// Integer literals stay [`Number::Integer`] until an operation needs a real
/// (true division, a real operand, an overflowing result). The distinction is
/// observable: `7 % 2` is `Integer(1)` while `7.0 % 2` is `Real(1.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Real(f64),
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl Number {
    /// Converts the value to an `f64`, rounding integers beyond 2^53.
    ///
    /// # Example
    /// ```
    /// use calcore::interpreter::value::Number;
    ///
    /// assert_eq!(Number::Integer(10).as_real(), 10.0);
    /// assert_eq!(Number::Real(0.5).as_real(), 0.5);
    /// ```
    #[must_use]
    pub fn as_real(self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64(n),
            Self::Real(r) => r,
        }
    }

    /// Returns the integer if this is an [`Number::Integer`].
    #[must_use]
    pub const fn as_integer(self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(n),
            Self::Real(_) => None,
        }
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// `true` for integer zero and for both real zeros.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(n) => n == 0,
            Self::Real(r) => r == 0.0,
        }
    }

    #[must_use]
    pub fn is_nan(self) -> bool {
        matches!(self, Self::Real(r) if r.is_nan())
    }

    /// Compares two values numerically, so `Integer(2)` equals `Real(2.0)`.
    ///
    /// `PartialEq` is structural and keeps the two apart.
    #[must_use]
    pub fn numerically_eq(self, other: Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            _ => self.as_real() == other.as_real(),
        }
    }
}

/// Integers print plainly; reals always keep a fractional part or exponent so
/// the text reads back as a real (`2.0`, `0.2`, `3e-7`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
        }
    }
}
