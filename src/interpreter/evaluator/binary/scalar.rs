use crate::{
    error::ArithmeticFault,
    interpreter::{evaluator::core::EvalResult, value::Number},
};

/// Applies an integer operation when both operands are integers and it does
/// not overflow; otherwise redoes it in `f64`.
fn integer_or_real(left: Number,
                   right: Number,
                   integer_op: fn(i64, i64) -> Option<i64>,
                   real_op: fn(f64, f64) -> f64)
                   -> Number {
    if let (Number::Integer(a), Number::Integer(b)) = (left, right)
       && let Some(result) = integer_op(a, b)
    {
        return Number::Integer(result);
    }
    Number::Real(real_op(left.as_real(), right.as_real()))
}

/// `left + right`.
///
/// # Example
/// ```
/// use calcore::interpreter::{evaluator::binary::scalar::add, value::Number};
///
/// assert_eq!(add(Number::Integer(2), Number::Integer(3)), Number::Integer(5));
/// assert_eq!(add(Number::Integer(2), Number::Real(0.5)), Number::Real(2.5));
/// assert_eq!(add(Number::Integer(i64::MAX), Number::Integer(1)),
///            Number::Real(9_223_372_036_854_775_808.0));
/// ```
#[must_use]
pub fn add(left: Number, right: Number) -> Number {
    integer_or_real(left, right, i64::checked_add, |a, b| a + b)
}

/// `left - right`.
#[must_use]
pub fn subtract(left: Number, right: Number) -> Number {
    integer_or_real(left, right, i64::checked_sub, |a, b| a - b)
}

/// `left × right`.
#[must_use]
pub fn multiply(left: Number, right: Number) -> Number {
    integer_or_real(left, right, i64::checked_mul, |a, b| a * b)
}

/// `left ÷ right`, always real.
///
/// # Errors
/// `ZeroDivision` if `right` is zero.
///
/// # Example
/// ```
/// use calcore::interpreter::{evaluator::binary::scalar::divide, value::Number};
///
/// assert_eq!(divide(Number::Integer(1), Number::Integer(4)).unwrap(), Number::Real(0.25));
/// assert!(divide(Number::Integer(1), Number::Real(0.0)).is_err());
/// ```
pub fn divide(left: Number, right: Number) -> EvalResult<Number> {
    if right.is_zero() {
        return Err(ArithmeticFault::ZeroDivision.into());
    }
    Ok(Number::Real(left.as_real() / right.as_real()))
}

/// Floored modulo: the result takes the sign of the divisor, so `-7 % 3` is
/// `2` and `7 % -3` is `-2`.
///
/// # Errors
/// `ZeroDivision` if `right` is zero.
pub fn modulo(left: Number, right: Number) -> EvalResult<Number> {
    if right.is_zero() {
        return Err(ArithmeticFault::ZeroDivision.into());
    }
    Ok(integer_or_real(left, right, floored_rem_integer, floored_rem_real))
}

/// `None` only for `i64::MIN % -1`.
fn floored_rem_integer(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && (r < 0) != (b < 0) {
        Some(r + b)
    } else {
        Some(r)
    }
}

fn floored_rem_real(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}
