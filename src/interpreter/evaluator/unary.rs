use crate::{
    ast::{Expr, UnaryOperator},
    error::ArithmeticFault,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Number,
    },
    util::num::{f64_to_i64_checked, i64_to_f64},
};

impl Context {
    /// Evaluates the operand node and applies `op`.
    pub(crate) fn eval_unary_op(&self, op: UnaryOperator, operand: &Expr) -> EvalResult<Number> {
        let value = self.eval(operand)?;
        Self::eval_unary(op, value)
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Positive`: identity.
    /// - `Negative`: negation, continuing in `f64` for `-i64::MIN`.
    /// - `Factorial`: product `1 × 2 × … × n` for a non-negative integral
    ///   operand, which may be an integer or a real with no fractional part.
    ///   The product stays an integer while it fits in `i64`.
    ///
    /// # Errors
    /// - `Domain` for the factorial of a negative or fractional value.
    /// - `Unclassified` for a factorial too large for `f64` (`171!` and up).
    ///
    /// # Example
    /// ```
    /// use calcore::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Number},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negative, Number::Integer(5)).unwrap();
    /// assert_eq!(v, Number::Integer(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Factorial, Number::Integer(4)).unwrap();
    /// assert_eq!(v, Number::Integer(24));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: Number) -> EvalResult<Number> {
        match op {
            UnaryOperator::Positive => Ok(value),
            UnaryOperator::Negative => Ok(match value {
                                          Number::Integer(n) => n.checked_neg()
                                                                 .map_or_else(|| Number::Real(-i64_to_f64(n)),
                                                                              Number::Integer),
                                          Number::Real(r) => Number::Real(-r),
                                      }),
            UnaryOperator::Factorial => factorial(value),
        }
    }
}

fn factorial(value: Number) -> EvalResult<Number> {
    let n = match value {
        Number::Integer(n) => n,
        Number::Real(r) => {
            if !r.is_finite() || r.fract() != 0.0 {
                return Err(ArithmeticFault::domain(format!("factorial() only accepts integral values, found {r}")).into());
            }
            match f64_to_i64_checked(r) {
                Some(n) => n,
                None if r < 0.0 => {
                    return Err(ArithmeticFault::domain("factorial() not defined for negative values").into());
                },
                None => return Err(ArithmeticFault::overflow(format!("factorial of {r} is too large")).into()),
            }
        },
    };

    if n < 0 {
        return Err(ArithmeticFault::domain("factorial() not defined for negative values").into());
    }

    let mut product: i64 = 1;
    let mut k = 2;
    while k <= n {
        match product.checked_mul(k) {
            Some(next) => product = next,
            None => return real_factorial(i64_to_f64(product), k, n),
        }
        k += 1;
    }
    Ok(Number::Integer(product))
}

/// Continues `product × k × (k + 1) × … × n` in `f64`.
fn real_factorial(mut product: f64, from: i64, n: i64) -> EvalResult<Number> {
    let mut k = from;
    while k <= n {
        product *= i64_to_f64(k);
        if product.is_infinite() {
            return Err(ArithmeticFault::overflow(format!("factorial of {n} is too large")).into());
        }
        k += 1;
    }
    Ok(Number::Real(product))
}
