use crate::{
    ast::{BinaryOperator, Expr},
    error::EvalError,
    interpreter::{
        evaluator::{
            binary::{power::power, scalar},
            core::{Context, EvalResult},
        },
        value::Number,
    },
};

impl Context {
    /// Evaluates a binary node and every binary node down its left side.
    ///
    /// The leftmost operand is evaluated first, then each right operand in
    /// source order, folding the running value through its operator. This is
    /// the left-first order of a recursive walk without its stack depth, so
    /// a long operator chain evaluates in constant stack space.
    pub(crate) fn eval_binary_chain(&self, expr: &Expr) -> EvalResult<Number> {
        let (leftmost, steps) = expr.left_spine();
        let mut value = self.eval(leftmost)?;
        for (op, right, _) in steps {
            let right = self.eval(right)?;
            value = Self::eval_binary(op, value, right)?;
        }
        Ok(value)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Routes the operator to its arithmetic. A NaN produced from operands
    /// that were not NaN (`inf - inf`, `0 × inf`) is reported instead of
    /// returned.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Errors
    /// - `Arithmetic(ZeroDivision)` for `÷` or `%` by zero and `0 ^ -n`.
    /// - `InvalidResult` for results that are complex or NaN.
    /// - `Arithmetic(Unclassified)` for an overflowing power.
    ///
    /// # Example
    /// ```
    /// use calcore::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Number},
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, Number::Integer(3), Number::Integer(4));
    /// assert_eq!(result.unwrap(), Number::Integer(7));
    ///
    /// let result = Context::eval_binary(BinaryOperator::Mod, Number::Integer(7), Number::Real(2.0));
    /// assert_eq!(result.unwrap(), Number::Real(1.0));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: Number, right: Number) -> EvalResult<Number> {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        let result = match op {
            Add => scalar::add(left, right),
            Sub => scalar::subtract(left, right),
            Mul => scalar::multiply(left, right),
            Div => scalar::divide(left, right)?,
            Mod => scalar::modulo(left, right)?,
            Pow => power(left, right)?,
        };

        if result.is_nan() && !left.is_nan() && !right.is_nan() {
            return Err(EvalError::InvalidResult);
        }
        Ok(result)
    }
}
