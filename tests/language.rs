use std::fs;

use calcore::{
    ArithmeticFault, Context, Error, EvalError, Number, ParseError, evaluate,
    interpreter::evaluator::function::core::{Arity, Function},
    util::format::format_for_display,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (expression, expected) in extract_calc_examples(&content) {
            count += 1;
            let shown = match evaluate(expression.as_str(), Some(&Context::scientific())) {
                Ok(value) => format_for_display(value),
                Err(e) => e.display_message().to_string(),
            };
            assert_eq!(shown, expected, "example `{expression}` in {path:?}");
        }
    }

    assert!(count > 0, "No calc examples found in book/src");
}

/// Collects `expression => expected` lines from ```` ```calc ```` blocks.
fn extract_calc_examples(content: &str) -> Vec<(String, String)> {
    let mut examples = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```calc") {
            inside = true;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            continue;
        }
        if inside && let Some((expression, expected)) = trimmed.split_once("=>") {
            examples.push((expression.trim().to_string(), expected.trim().to_string()));
        }
    }

    examples
}

fn value(src: &str) -> Number {
    evaluate(src, Some(&Context::scientific())).unwrap_or_else(|e| panic!("`{src}` failed: {e}"))
}

fn failure(src: &str) -> Error {
    match evaluate(src, Some(&Context::scientific())) {
        Ok(v) => panic!("`{src}` evaluated to {v} but was expected to fail"),
        Err(e) => e,
    }
}

fn eval_failure(src: &str) -> EvalError {
    match failure(src) {
        Error::Eval(e) => e,
        Error::Parse(e) => panic!("`{src}` failed to parse: {e}"),
    }
}

fn fault(src: &str) -> ArithmeticFault {
    match eval_failure(src) {
        EvalError::Arithmetic(fault) => fault,
        other => panic!("`{src}` failed without an arithmetic fault: {other}"),
    }
}

#[test]
fn precedence() {
    assert_eq!(value("1 + 2 × 3"), Number::Integer(7));
    assert_eq!(value("(1 + 2) × 3"), Number::Integer(9));
    assert_eq!(value("2 ^ 3 × 2"), Number::Integer(16));
    assert_eq!(value("2 × 3 ^ 2"), Number::Integer(18));
}

#[test]
fn equal_priority_is_left_associative() {
    assert_eq!(value("1 ÷ 2 × 4"), Number::Real(2.0));
    assert_eq!(value("1 - 2 + 3 - 4"), Number::Integer(-2));
    assert_eq!(value("2 ^ 3 ^ 2"), Number::Integer(64));
    assert_eq!(value("100 % 7 × 2"), Number::Integer(4));
    assert_eq!(value("1.1 ÷ 0.5 - 4 × 2"), Number::Real(1.1 / 0.5 - 8.0));
}

#[test]
fn unary_operators() {
    assert_eq!(value("2 + -3!"), Number::Integer(-4));
    assert_eq!(value("-3!"), Number::Integer(-6));
    assert_eq!(value("--3"), Number::Integer(3));
    assert_eq!(value("+-+3"), Number::Integer(-3));
    assert_eq!(value("(1 + 2)!"), Number::Integer(6));
    assert!(matches!(fault("(-3)!"), ArithmeticFault::Domain { .. }));
}

#[test]
fn numeric_types() {
    assert_eq!(value("6 ÷ 3"), Number::Real(2.0));
    assert_eq!(value("7 % 2"), Number::Integer(1));
    assert_eq!(value("7.0 % 2"), Number::Real(1.0));
    assert_eq!(value("2 ^ -2"), Number::Real(0.25));
    assert_eq!(value("9223372036854775807 + 1"), Number::Real(9_223_372_036_854_775_808.0));
}

#[test]
fn oversized_integer_literal_is_read_as_real() {
    assert_eq!(value("9223372036854775808"), value("9223372036854775807 + 1"));
    assert_eq!(value("99999999999999999999 - 1e20"), Number::Real(0.0));
    assert_eq!(format_for_display(value("9223372036854775808")), "9.223372036854776e+18");
}

#[test]
fn long_chains_evaluate() {
    let ones = format!("1{}", " + 1".repeat(20_000));
    assert_eq!(value(&ones), Number::Integer(20_001));

    let mixed = format!("0{}", " + 2 × 3 - 5".repeat(3_000));
    assert_eq!(value(&mixed), Number::Integer(3_000));

    let powers = format!("2{}", " ^ 1".repeat(5_000));
    assert_eq!(value(&powers), Number::Integer(2));
}

#[test]
fn scientific_functions() {
    assert_eq!(value("abs(-5)"), Number::Integer(5));
    assert_eq!(value("sqrt(16)"), Number::Real(4.0));
    assert_eq!(value("square(3) + cube(2)"), Number::Integer(17));
    assert_eq!(value("floor(-2.5) + ceil(2.5)"), Number::Integer(0));
    assert_eq!(value("invert(4)"), Number::Real(0.25));
    assert_eq!(format_for_display(value("sind(30)")), "0.5");
    assert_eq!(format_for_display(value("cos(π)")), "-1");
    assert_eq!(format_for_display(value("ln(e)")), "1");
}

#[test]
fn basic_preset_has_only_invert() {
    let basic = Context::basic();
    assert_eq!(evaluate("invert(2)", Some(&basic)).unwrap(), Number::Real(0.5));
    assert_eq!(evaluate("sqrt(4)", Some(&basic)).unwrap_err(),
               Error::Eval(EvalError::UnsupportedFunction { name: "sqrt".to_string() }));
}

#[test]
fn arity_is_enforced_and_reported() {
    // mult(a, m = 2)
    let mult = Function::new(Arity::range(1, 2), |args| {
        let m = args.get(1).map_or(2.0, |m| m.as_real());
        Ok(Number::Real(args[0].as_real() * m))
    });
    let context = Context::new().with_function("mult", mult);

    assert_eq!(evaluate("mult(2)", Some(&context)).unwrap(), Number::Real(4.0));
    assert_eq!(evaluate("mult(2, 3)", Some(&context)).unwrap(), Number::Real(6.0));

    for (src, found) in [("mult()", 0), ("mult(1, 2, 3)", 3)] {
        assert_eq!(evaluate(src, Some(&context)).unwrap_err(),
                   Error::Eval(EvalError::ArgumentCountMismatch { name: "mult".to_string(),
                                                                  arity: Arity::range(1, 2),
                                                                  found }));
    }
}

#[test]
fn unknown_names() {
    assert_eq!(eval_failure("1 + a - 2"), EvalError::UnknownConstant { name: "a".to_string() });
    assert_eq!(eval_failure("foo(1)"), EvalError::UnsupportedFunction { name: "foo".to_string() });
}

#[test]
fn arithmetic_faults() {
    assert_eq!(fault("1 ÷ 0"), ArithmeticFault::ZeroDivision);
    assert_eq!(fault("5 % 0.0"), ArithmeticFault::ZeroDivision);
    assert_eq!(fault("invert(0)"), ArithmeticFault::ZeroDivision);
    assert!(matches!(fault("sqrt(-1)"), ArithmeticFault::Domain { .. }));
    assert!(matches!(fault("2.5!"), ArithmeticFault::Domain { .. }));
    assert!(matches!(fault("10.0 ^ 400"), ArithmeticFault::Unclassified { .. }));
    assert_eq!(eval_failure("(-1) ^ 0.5"), EvalError::InvalidResult);
}

#[test]
fn display_messages() {
    assert_eq!(failure("1 ÷ 0").display_message(), "ERROR: Zero Division");
    assert_eq!(failure("sqrt(-4)").display_message(), "ERROR: Invalid Input");
    assert_eq!(failure("(-1) ^ 0.5").display_message(), "ERROR");
    assert_eq!(failure("1 +").display_message(), "ERROR");
}

#[test]
fn parse_errors_carry_positions() {
    let position = |src: &str| match failure(src) {
        Error::Parse(e) => e.position(),
        Error::Eval(e) => panic!("`{src}` parsed but failed evaluation: {e}"),
    };

    assert_eq!(position("1 + 0a - 1"), Some(5));
    assert_eq!(position("(1+2 × 3"), Some(0));
    assert_eq!(position("1 + (1×2+3)) - 3"), Some(11));
    assert_eq!(position("2 × sin(1"), Some(4));
    assert_eq!(position(""), None);
    assert_eq!(failure("1 # 2"),
               Error::Parse(ParseError::InvalidCharacter { character: '#',
                                                           position:  2, }));
}

#[test]
fn context_constants_override_defaults() {
    let context = Context::new().with_constant("π", 3).with_constant("r", 2);
    assert_eq!(evaluate("π × r ^ 2", Some(&context)).unwrap(), Number::Integer(12));

    let mut context = Context::new();
    context.remove_constant("e");
    assert_eq!(evaluate("e", Some(&context)).unwrap_err(),
               Error::Eval(EvalError::UnknownConstant { name: "e".to_string() }));
}

#[test]
fn trees_evaluate_without_reparsing() {
    let tree = calcore::parse_expression("2 × x").unwrap();
    let context = Context::new().with_constant("x", 21);
    assert_eq!(evaluate(&tree, Some(&context)).unwrap(), Number::Integer(42));
    assert_eq!(evaluate(&tree, Some(&context.with_constant("x", 0.5))).unwrap(),
               Number::Real(1.0));
}
