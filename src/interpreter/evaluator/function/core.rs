use std::{fmt, sync::Arc};

use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Number,
    },
};

/// Signature shared by every callable stored in a [`Context`].
pub type NativeFn = dyn Fn(&[Number]) -> EvalResult<Number> + Send + Sync;

/// Specifies the allowed number of arguments for a function.
///
/// The range is inclusive. A function with optional trailing parameters has
/// `min < max`; `max == usize::MAX` accepts any number beyond `min`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Arity {
    /// Fewest arguments accepted.
    pub min: usize,
    /// Most arguments accepted.
    pub max: usize,
}

impl Arity {
    /// Exactly `n` arguments.
    #[must_use]
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between `min` and `max` arguments, both included.
    ///
    /// The bounds are swapped if given in the wrong order.
    #[must_use]
    pub const fn range(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// `min` or more arguments.
    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Self { min,
               max: usize::MAX }
    }

    /// Tests whether the given argument count satisfies this arity.
    ///
    /// # Example
    /// ```
    /// use calcore::interpreter::evaluator::function::core::Arity;
    ///
    /// let arity = Arity::range(1, 2);
    /// assert!(!arity.check(0));
    /// assert!(arity.check(1));
    /// assert!(arity.check(2));
    /// assert!(!arity.check(3));
    /// ```
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        self.min <= n && n <= self.max
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else if self.max == usize::MAX {
            write!(f, "at least {}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// A callable registered in a [`Context`] under some name.
///
/// Cloning is cheap; clones share the callable.
#[derive(Clone)]
pub struct Function {
    arity: Arity,
    func:  Arc<NativeFn>,
}

impl Function {
    /// Wraps `func`, which will only ever be called with an argument count
    /// accepted by `arity`.
    ///
    /// # Example
    /// ```
    /// use calcore::{
    ///     Context, evaluate,
    ///     interpreter::{
    ///         evaluator::function::core::{Arity, Function},
    ///         value::Number,
    ///     },
    /// };
    ///
    /// // mult(a, m = 2)
    /// let mult = Function::new(Arity::range(1, 2), |args| {
    ///     let m = args.get(1).map_or(2.0, |m| m.as_real());
    ///     Ok(Number::Real(args[0].as_real() * m))
    /// });
    /// let context = Context::new().with_function("mult", mult);
    ///
    /// assert_eq!(evaluate("mult(3)", Some(&context)).unwrap(), Number::Real(6.0));
    /// assert_eq!(evaluate("mult(3, 3)", Some(&context)).unwrap(), Number::Real(9.0));
    /// ```
    pub fn new<F>(arity: Arity, func: F) -> Self
        where F: Fn(&[Number]) -> EvalResult<Number> + Send + Sync + 'static
    {
        Self { arity,
               func: Arc::new(func) }
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Calls the function without checking the arity.
    pub fn call(&self, args: &[Number]) -> EvalResult<Number> {
        (self.func)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("arity", &self.arity).finish_non_exhaustive()
    }
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The name is looked up first and the argument count checked against
    /// the function's arity before any argument is evaluated. Arguments are
    /// then evaluated left to right and passed to the function.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument nodes.
    ///
    /// # Errors
    /// - `UnsupportedFunction` if no function has that name.
    /// - `ArgumentCountMismatch` if the count falls outside the arity.
    /// - Any error from an argument or from the function itself.
    pub(crate) fn eval_function_call(&self, name: &str, arguments: &[Expr]) -> EvalResult<Number> {
        let function =
            self.function(name)
                .ok_or_else(|| EvalError::UnsupportedFunction { name: name.to_string() })?;

        let arity = function.arity();
        if !arity.check(arguments.len()) {
            return Err(EvalError::ArgumentCountMismatch { name: name.to_string(),
                                                          arity,
                                                          found: arguments.len() });
        }

        let values = arguments.iter()
                              .map(|argument| self.eval(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        function.call(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_display() {
        assert_eq!(Arity::exact(1).to_string(), "1");
        assert_eq!(Arity::range(1, 2).to_string(), "1 to 2");
        assert_eq!(Arity::at_least(2).to_string(), "at least 2");
    }

    #[test]
    fn reversed_range_is_normalised() {
        assert_eq!(Arity::range(3, 1), Arity { min: 1, max: 3 });
    }

    #[test]
    fn variadic_arity_accepts_any_count_above_min() {
        let arity = Arity::at_least(1);
        assert!(!arity.check(0));
        assert!(arity.check(1));
        assert!(arity.check(1000));
    }

    #[test]
    fn arity_is_checked_before_arguments_are_evaluated() {
        let context = Context::new().with_function("one",
                                                   Function::new(Arity::exact(1), |args| {
                                                       Ok(args[0])
                                                   }));
        // The unknown constant in the arguments is never looked up.
        let call = Expr::call("one", vec![Expr::constant("x", 4), Expr::constant("y", 7)], 0);
        assert_eq!(context.eval(&call).unwrap_err(),
                   EvalError::ArgumentCountMismatch { name:  "one".to_string(),
                                                      arity: Arity::exact(1),
                                                      found: 2, });
    }

    #[test]
    fn arguments_are_passed_in_source_order() {
        let context = Context::new().with_function("first",
                                                   Function::new(Arity::at_least(1), |args| {
                                                       Ok(args[0])
                                                   }));
        let call = Expr::call("first", vec![Expr::number(7, 6), Expr::number(9, 9)], 0);
        assert_eq!(context.eval(&call).unwrap(), Number::Integer(7));
    }
}
