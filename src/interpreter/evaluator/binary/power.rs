use crate::{
    error::{ArithmeticFault, EvalError},
    interpreter::{evaluator::core::EvalResult, value::Number},
    util::num::i64_to_u32_checked,
};

/// Evaluates `base ^ exponent`.
///
/// Integer base and non-negative integer exponent use checked arithmetic and
/// fall back to `f64` on overflow. Every other combination is computed with
/// `powf`.
///
/// # Errors
/// - `ZeroDivision` for zero raised to a negative power.
/// - `InvalidResult` for a negative base with a fractional exponent, whose
///   result would be complex.
/// - `Unclassified` when finite operands produce an infinite result.
///
/// # Example
/// ```
/// use calcore::interpreter::{evaluator::binary::power::power, value::Number};
///
/// assert_eq!(power(Number::Integer(2), Number::Integer(10)).unwrap(), Number::Integer(1024));
/// assert_eq!(power(Number::Integer(2), Number::Integer(-1)).unwrap(), Number::Real(0.5));
/// assert!(power(Number::Integer(-1), Number::Real(0.5)).is_err());
/// ```
pub fn power(base: Number, exponent: Number) -> EvalResult<Number> {
    if let (Number::Integer(b), Number::Integer(e)) = (base, exponent)
       && let Some(e) = i64_to_u32_checked(e)
       && let Some(result) = b.checked_pow(e)
    {
        return Ok(Number::Integer(result));
    }
    real_power(base.as_real(), exponent.as_real())
}

fn real_power(base: f64, exponent: f64) -> EvalResult<Number> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ArithmeticFault::ZeroDivision.into());
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(EvalError::InvalidResult);
    }

    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(ArithmeticFault::overflow(format!("{base} ^ {exponent} is too large")).into());
    }
    Ok(Number::Real(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_powers() {
        assert_eq!(power(Number::Integer(-3), Number::Integer(3)).unwrap(), Number::Integer(-27));
        assert_eq!(power(Number::Integer(5), Number::Integer(0)).unwrap(), Number::Integer(1));
        assert_eq!(power(Number::Integer(2), Number::Integer(64)).unwrap(),
                   Number::Real(18_446_744_073_709_551_616.0));
    }

    #[test]
    fn real_powers() {
        assert_eq!(power(Number::Integer(4), Number::Real(0.5)).unwrap(), Number::Real(2.0));
        assert_eq!(power(Number::Real(-2.0), Number::Integer(2)).unwrap(), Number::Real(4.0));
        assert_eq!(power(Number::Real(-8.0), Number::Real(3.0)).unwrap(), Number::Real(-512.0));
    }

    #[test]
    fn zero_to_a_negative_power_divides_by_zero() {
        assert_eq!(power(Number::Integer(0), Number::Integer(-1)).unwrap_err(),
                   EvalError::Arithmetic(ArithmeticFault::ZeroDivision));
    }

    #[test]
    fn complex_results_are_rejected() {
        assert_eq!(power(Number::Integer(-1), Number::Real(0.5)).unwrap_err(),
                   EvalError::InvalidResult);
    }

    #[test]
    fn overflow_is_unclassified() {
        let err = power(Number::Integer(10), Number::Integer(400)).unwrap_err();
        assert!(matches!(err, EvalError::Arithmetic(ArithmeticFault::Unclassified { .. })));
    }
}
