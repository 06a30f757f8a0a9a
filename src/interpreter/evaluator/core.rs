use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::function::{
            builtin::{BASIC_FUNCTIONS, BuiltinDef, SCIENTIFIC_FUNCTIONS},
            core::Function,
        },
        value::Number,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Constants every context starts with.
pub const DEFAULT_CONSTANTS: &[(&str, f64)] = &[("π", std::f64::consts::PI),
                                                ("e", std::f64::consts::E)];

/// Stores the names an expression can refer to.
///
/// A context maps constant names to values and function names to
/// [`Function`]s. Evaluation only reads it, so one context can serve any
/// number of evaluations, including concurrent ones; mutation needs `&mut`
/// and therefore cannot overlap an evaluation on the same instance.
///
/// ## Usage
///
/// Start from [`Context::new`] (π and e only) or one of the calculator
/// presets, then add or override names with the builder methods:
///
/// ```
/// use calcore::{Context, evaluate, interpreter::value::Number};
///
/// let context = Context::scientific().with_constant("g", 9.81);
/// let result = evaluate("square(2) × g", Some(&context)).unwrap();
/// assert_eq!(result, Number::Real(39.24));
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    constants: HashMap<String, Number>,
    functions: HashMap<String, Function>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context holding the [`DEFAULT_CONSTANTS`] and no functions.
    #[must_use]
    pub fn new() -> Self {
        let constants = DEFAULT_CONSTANTS.iter()
                                         .map(|(name, value)| ((*name).to_string(), Number::Real(*value)))
                                         .collect();
        Self { constants,
               functions: HashMap::new() }
    }

    /// The basic calculator: the default constants plus `invert`.
    #[must_use]
    pub fn basic() -> Self {
        Self::new().with_builtins(BASIC_FUNCTIONS)
    }

    /// The scientific calculator: the default constants plus roots, powers,
    /// angle conversion, trigonometry (radian and degree variants),
    /// logarithms, `exp`, `abs`, `floor`, `ceil` and `invert`.
    #[must_use]
    pub fn scientific() -> Self {
        Self::new().with_builtins(SCIENTIFIC_FUNCTIONS)
    }

    fn with_builtins(mut self, table: &[BuiltinDef]) -> Self {
        for def in table {
            self.functions.insert(def.name.to_string(), Function::new(def.arity, def.func));
        }
        self
    }

    /// Adds or overrides a constant.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<Number>) -> Self {
        self.set_constant(name, value);
        self
    }

    /// Adds or overrides a function.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>, function: Function) -> Self {
        self.register_function(name, function);
        self
    }

    /// Adds or overrides every constant in `constants`.
    #[must_use]
    pub fn with_constants<I, S>(mut self, constants: I) -> Self
        where I: IntoIterator<Item = (S, Number)>,
              S: Into<String>
    {
        for (name, value) in constants {
            self.set_constant(name, value);
        }
        self
    }

    /// Adds or overrides every function in `functions`.
    #[must_use]
    pub fn with_functions<I, S>(mut self, functions: I) -> Self
        where I: IntoIterator<Item = (S, Function)>,
              S: Into<String>
    {
        for (name, function) in functions {
            self.register_function(name, function);
        }
        self
    }

    /// Sets a constant and returns the value it replaced.
    pub fn set_constant(&mut self,
                        name: impl Into<String>,
                        value: impl Into<Number>)
                        -> Option<Number> {
        let name = name.into();
        let value = value.into();
        debug!(%name, %value, "set constant");
        self.constants.insert(name, value)
    }

    /// Registers a function and returns the function it replaced.
    pub fn register_function(&mut self,
                             name: impl Into<String>,
                             function: Function)
                             -> Option<Function> {
        let name = name.into();
        debug!(%name, arity = %function.arity(), "registered function");
        self.functions.insert(name, function)
    }

    /// Removes a constant, including the defaults.
    pub fn remove_constant(&mut self, name: &str) -> Option<Number> {
        debug!(name, "removed constant");
        self.constants.remove(name)
    }

    /// Removes a function.
    pub fn remove_function(&mut self, name: &str) -> Option<Function> {
        debug!(name, "removed function");
        self.functions.remove(name)
    }

    #[must_use]
    pub fn constant(&self, name: &str) -> Option<Number> {
        self.constants.get(name).copied()
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Names of all constants, sorted.
    #[must_use]
    pub fn constant_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constants.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of all functions, sorted.
    #[must_use]
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluates a whole tree.
    ///
    /// This is the traced entry point; it delegates to [`Context::eval`].
    #[tracing::instrument(level = "debug", skip_all, fields(root = %expr))]
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<Number> {
        let result = self.eval(expr);
        match &result {
            Ok(value) => debug!(%value, "evaluated"),
            Err(error) => debug!(%error, "evaluation failed"),
        }
        result
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// The evaluator dispatches based on expression variant: literals,
    /// constants, unary and binary operations, and function calls. Neither
    /// the tree nor the context is modified.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of `expr`.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Number> {
        match expr {
            Expr::NumberLiteral { value, .. } => Ok(*value),
            Expr::NamedConstant { name, .. } => self.eval_constant(name),
            Expr::UnaryOp { op, operand, .. } => self.eval_unary_op(*op, operand),
            Expr::BinaryOp { .. } => self.eval_binary_chain(expr),
            Expr::FunctionCall { name, arguments, .. } => self.eval_function_call(name, arguments),
        }
    }

    fn eval_constant(&self, name: &str) -> EvalResult<Number> {
        self.constant(name)
            .ok_or_else(|| EvalError::UnknownConstant { name: name.to_string() })
    }
}
