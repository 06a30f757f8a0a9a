use crate::{
    error::{ArithmeticFault, EvalError},
    interpreter::{
        evaluator::{
            binary::scalar::{divide, multiply},
            core::EvalResult,
            function::core::Arity,
        },
        value::Number,
    },
    util::num::{f64_to_i64_checked, i64_to_f64},
};

/// Signature of a built-in function.
pub type BuiltinFn = fn(&[Number]) -> EvalResult<Number>;

/// A built-in function and the name a preset registers it under.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinDef {
    pub name:  &'static str,
    pub arity: Arity,
    pub func:  BuiltinFn,
}

/// Defines a table of built-in functions.
///
/// Each entry provides:
/// - a string name,
/// - an arity,
/// - a function pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $(#[$meta:meta])*
        $table:ident {
            $(
                $name:literal => {
                    arity: $arity:expr,
                    func: $func:expr $(,)?
                }
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub static $table: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    /// Functions of the basic calculator.
    BASIC_FUNCTIONS {
        "invert" => { arity: Arity::exact(1), func: invert },
    }
}

builtin_functions! {
    /// Functions of the scientific calculator.
    SCIENTIFIC_FUNCTIONS {
        "sqrt"    => { arity: Arity::exact(1), func: sqrt },
        "square"  => { arity: Arity::exact(1), func: square },
        "cube"    => { arity: Arity::exact(1), func: cube },
        "degree"  => { arity: Arity::exact(1), func: degree },
        "radians" => { arity: Arity::exact(1), func: radians },
        "sin"     => { arity: Arity::exact(1), func: sin },
        "sind"    => { arity: Arity::exact(1), func: sind },
        "cos"     => { arity: Arity::exact(1), func: cos },
        "cosd"    => { arity: Arity::exact(1), func: cosd },
        "tan"     => { arity: Arity::exact(1), func: tan },
        "tand"    => { arity: Arity::exact(1), func: tand },
        "log"     => { arity: Arity::exact(1), func: log },
        "ln"      => { arity: Arity::exact(1), func: ln },
        "exp"     => { arity: Arity::exact(1), func: exp },
        "abs"     => { arity: Arity::exact(1), func: abs },
        "floor"   => { arity: Arity::exact(1), func: floor },
        "ceil"    => { arity: Arity::exact(1), func: ceil },
        "invert"  => { arity: Arity::exact(1), func: invert },
    }
}

/// Returns the single argument of a one-argument builtin.
fn single_argument(name: &str, args: &[Number]) -> EvalResult<Number> {
    match args {
        [value] => Ok(*value),
        _ => Err(EvalError::ArgumentCountMismatch { name:  name.to_string(),
                                                    arity: Arity::exact(1),
                                                    found: args.len(), }),
    }
}

/// Wraps the `f64` result of a builtin, turning NaN from a non-NaN input
/// into a domain error and infinity from a finite input into an overflow.
fn real_result(name: &str, input: f64, output: f64) -> EvalResult<Number> {
    if output.is_nan() && !input.is_nan() {
        return Err(ArithmeticFault::domain(format!("{name}() is not defined for {input}")).into());
    }
    if output.is_infinite() && input.is_finite() {
        return Err(ArithmeticFault::overflow(format!("{name}({input}) is too large")).into());
    }
    Ok(Number::Real(output))
}

/// Applies an `f64` function to the single argument of a builtin.
///
/// Integers are converted to reals first; the result is always real.
///
/// # Example
/// ```
/// use calcore::interpreter::{evaluator::function::builtin::sin, value::Number};
///
/// let x = Number::Real(std::f64::consts::PI / 2.0);
/// assert_eq!(sin(&[x]).unwrap(), Number::Real(1.0));
/// ```
macro_rules! real_builtin {
    ($fname:ident, $name:literal, $real_fn:expr) => {
        pub fn $fname(args: &[Number]) -> EvalResult<Number> {
            let x = single_argument($name, args)?.as_real();
            real_result($name, x, $real_fn(x))
        }
    };
}

real_builtin!(sqrt, "sqrt", f64::sqrt);
real_builtin!(degree, "degree", f64::to_degrees);
real_builtin!(radians, "radians", f64::to_radians);
real_builtin!(sin, "sin", f64::sin);
real_builtin!(cos, "cos", f64::cos);
real_builtin!(tan, "tan", f64::tan);
real_builtin!(sind, "sind", |d: f64| d.to_radians().sin());
real_builtin!(cosd, "cosd", |d: f64| d.to_radians().cos());
real_builtin!(tand, "tand", |d: f64| d.to_radians().tan());
real_builtin!(exp, "exp", f64::exp);

/// Base-10 logarithm.
///
/// # Errors
/// `Domain` for zero and negative arguments.
pub fn log(args: &[Number]) -> EvalResult<Number> {
    logarithm("log", args, f64::log10)
}

/// Natural logarithm.
///
/// # Errors
/// `Domain` for zero and negative arguments.
pub fn ln(args: &[Number]) -> EvalResult<Number> {
    logarithm("ln", args, f64::ln)
}

fn logarithm(name: &str, args: &[Number], real_fn: fn(f64) -> f64) -> EvalResult<Number> {
    let x = single_argument(name, args)?.as_real();
    if x <= 0.0 {
        return Err(ArithmeticFault::domain(format!("{name}() is not defined for {x}")).into());
    }
    real_result(name, x, real_fn(x))
}

/// `x × x`, integral for integers that do not overflow.
pub fn square(args: &[Number]) -> EvalResult<Number> {
    let x = single_argument("square", args)?;
    Ok(multiply(x, x))
}

/// `x × x × x`, integral for integers that do not overflow.
pub fn cube(args: &[Number]) -> EvalResult<Number> {
    let x = single_argument("cube", args)?;
    Ok(multiply(multiply(x, x), x))
}

/// `1 ÷ x`.
///
/// # Errors
/// `ZeroDivision` for zero.
///
/// # Example
/// ```
/// use calcore::interpreter::{evaluator::function::builtin::invert, value::Number};
///
/// assert_eq!(invert(&[Number::Integer(4)]).unwrap(), Number::Real(0.25));
/// assert!(invert(&[Number::Integer(0)]).is_err());
/// ```
pub fn invert(args: &[Number]) -> EvalResult<Number> {
    divide(Number::Integer(1), single_argument("invert", args)?)
}

/// Absolute value, type preserving.
pub fn abs(args: &[Number]) -> EvalResult<Number> {
    Ok(match single_argument("abs", args)? {
        Number::Integer(n) => {
            n.checked_abs().map_or_else(|| Number::Real(-i64_to_f64(n)), Number::Integer)
        },
        Number::Real(r) => Number::Real(r.abs()),
    })
}

/// Largest integer not greater than the argument.
pub fn floor(args: &[Number]) -> EvalResult<Number> {
    round_with("floor", args, f64::floor)
}

/// Smallest integer not less than the argument.
pub fn ceil(args: &[Number]) -> EvalResult<Number> {
    round_with("ceil", args, f64::ceil)
}

/// Rounds a real to an integer with `round_fn`. Integers are returned as-is;
/// a result outside the `i64` range stays real.
///
/// # Errors
/// `Domain` for NaN and infinite arguments.
fn round_with(name: &str, args: &[Number], round_fn: fn(f64) -> f64) -> EvalResult<Number> {
    match single_argument(name, args)? {
        Number::Integer(n) => Ok(Number::Integer(n)),
        Number::Real(r) if !r.is_finite() => {
            Err(ArithmeticFault::domain(format!("cannot convert {r} to integer")).into())
        },
        Number::Real(r) => {
            let rounded = round_fn(r);
            Ok(f64_to_i64_checked(rounded).map_or(Number::Real(rounded), Number::Integer))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(result: EvalResult<Number>) -> bool {
        matches!(result, Err(EvalError::Arithmetic(ArithmeticFault::Domain { .. })))
    }

    #[test]
    fn tables_have_unique_names() {
        for table in [BASIC_FUNCTIONS, SCIENTIFIC_FUNCTIONS] {
            for (i, def) in table.iter().enumerate() {
                assert!(table[i + 1..].iter().all(|other| other.name != def.name),
                        "duplicate builtin {}",
                        def.name);
            }
        }
    }

    #[test]
    fn degree_variants_convert_first() {
        let Number::Real(r) = sind(&[Number::Integer(30)]).unwrap() else {
            panic!("sind returns a real");
        };
        assert!((r - 0.5).abs() < 1e-12);
        let degrees = degree(&[Number::Real(std::f64::consts::PI)]).unwrap().as_real();
        assert!((degrees - 180.0).abs() < 1e-12);
    }

    #[test]
    fn domain_errors() {
        assert!(domain(sqrt(&[Number::Integer(-1)])));
        assert!(domain(ln(&[Number::Integer(0)])));
        assert!(domain(log(&[Number::Real(-10.0)])));
        assert!(domain(sin(&[Number::Real(f64::INFINITY)])));
        assert!(domain(floor(&[Number::Real(f64::NAN)])));
    }

    #[test]
    fn exp_overflow_is_unclassified() {
        assert!(matches!(exp(&[Number::Integer(1000)]),
                         Err(EvalError::Arithmetic(ArithmeticFault::Unclassified { .. }))));
    }

    #[test]
    fn integral_results_stay_integers() {
        assert_eq!(square(&[Number::Integer(-4)]).unwrap(), Number::Integer(16));
        assert_eq!(cube(&[Number::Integer(3)]).unwrap(), Number::Integer(27));
        assert_eq!(abs(&[Number::Integer(-7)]).unwrap(), Number::Integer(7));
        assert_eq!(floor(&[Number::Real(-2.5)]).unwrap(), Number::Integer(-3));
        assert_eq!(ceil(&[Number::Real(2.1)]).unwrap(), Number::Integer(3));
        assert_eq!(floor(&[Number::Real(1e300)]).unwrap(), Number::Real(1e300));
    }

    #[test]
    fn logarithms() {
        assert_eq!(log(&[Number::Integer(1000)]).unwrap(), Number::Real(3.0));
        assert_eq!(ln(&[Number::Integer(1)]).unwrap(), Number::Real(0.0));
    }

    #[test]
    fn direct_calls_check_their_argument_count() {
        assert!(matches!(sqrt(&[]), Err(EvalError::ArgumentCountMismatch { found: 0, .. })));
    }
}
