use std::{fs, process::ExitCode};

use calcore::{
    Context, Error, Number, evaluate, interpreter::lexer::is_name_char, parse_expression,
    util::format::format_for_display,
};
use clap::{Parser, ValueEnum};

/// calcore evaluates calculator expressions such as `2 × (3 + sin(π ÷ 2))`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Which calculator's functions are available.
    #[arg(short, long, value_enum, default_value_t = Mode::Scientific)]
    mode: Mode,

    /// Adds or overrides a constant, as NAME=EXPRESSION. May be repeated.
    #[arg(short, long = "constant", value_name = "NAME=EXPRESSION", value_parser = parse_constant)]
    constants: Vec<(String, Number)>,

    /// Tells calcore to read expressions from a file, one per non-empty line.
    #[arg(short, long)]
    file: bool,

    /// Prints the parsed tree, fully parenthesised, instead of evaluating it.
    #[arg(short, long)]
    tree: bool,

    /// The expression, or the path of a file with `--file`.
    contents: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// `invert` only.
    Basic,
    /// Roots, trigonometry, logarithms and rounding.
    Scientific,
}

fn parse_constant(argument: &str) -> Result<(String, Number), String> {
    let (name, expression) = argument.split_once('=')
                                     .ok_or_else(|| format!("expected NAME=EXPRESSION, found '{argument}'"))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(format!("'{name}' is not a valid constant name"));
    }
    let value = evaluate(normalize_keys(expression.trim()).as_str(), None).map_err(|e| e.to_string())?;
    Ok((name.to_string(), value))
}

/// Replaces the keyboard spellings `*` and `/` with `×` and `÷`.
///
/// Each character maps to one character, so error positions still point
/// into the text as typed.
fn normalize_keys(source: &str) -> String {
    source.chars()
          .map(|c| match c {
              '*' => '×',
              '/' => '÷',
              other => other,
          })
          .collect()
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                        .with_level(true)
                                                        .with_writer(std::io::stderr))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

/// Runs one expression and prints its result; returns `false` on failure.
///
/// The detailed error goes to stderr and the calculator's short message to
/// stdout, in place of the result.
fn run(source: &str, context: &Context, print_tree: bool) -> bool {
    let source = normalize_keys(source);
    let source = source.as_str();
    let output = if print_tree {
        parse_expression(source).map(|tree| tree.to_string()).map_err(Error::from)
    } else {
        evaluate(source, Some(context)).map(format_for_display)
    };

    match output {
        Ok(text) => {
            println!("{text}");
            true
        },
        Err(e) => {
            eprintln!("{e}");
            println!("{}", e.display_message());
            false
        },
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let context = match args.mode {
                      Mode::Basic => Context::basic(),
                      Mode::Scientific => Context::scientific(),
                  }.with_constants(args.constants);

    let expressions: Vec<String> = if args.file {
        let script = fs::read_to_string(&args.contents).unwrap_or_else(|_| {
                         eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                   &args.contents);
                         std::process::exit(1);
                     });
        script.lines()
              .map(str::trim)
              .filter(|line| !line.is_empty())
              .map(str::to_string)
              .collect()
    } else {
        vec![args.contents]
    };

    let mut ok = true;
    for expression in &expressions {
        ok &= run(expression, &context, args.tree);
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_operators_become_calculator_symbols() {
        assert_eq!(normalize_keys("6 / 3 * 2"), "6 ÷ 3 × 2");
        assert_eq!(normalize_keys("sin(π÷2)"), "sin(π÷2)");
    }

    #[test]
    fn constants_accept_keyboard_operators() {
        assert_eq!(parse_constant("half = 1 / 2"), Ok(("half".to_string(), Number::Real(0.5))));
        assert_eq!(parse_constant("six=2*3"), Ok(("six".to_string(), Number::Integer(6))));
        assert!(parse_constant("x y=1").is_err());
    }
}
