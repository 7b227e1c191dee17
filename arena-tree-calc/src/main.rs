//! Command-line calculator built on the arena-backed expression parser.
//!
//! Evaluates each expression given on the command line in order. Parse
//! errors are shown under the expression with a caret marking the offending
//! character. The process exits with a failure status if any expression
//! could not be evaluated.
//!
//! `RUST_LOG` controls logging as usual; `-v 3` turns on the tree-building
//! trace of the parser regardless of `RUST_LOG`.

use arena_tree_calc::{ExprParser, ParseError, ParserConfig};
use clap::Parser as ClapParser;
use std::process::ExitCode;

/// Significant digits of printed results.
const RESULT_DIGITS: usize = 15;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbosity: 0 results only, 1 tree dump, 2 detailed tree dump, 3 build trace
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    verbose: u8,

    /// Maximum number of digits in a numeric literal
    #[arg(long, default_value_t = ParserConfig::DEFAULT_MAX_DIGITS)]
    max_digits: usize,

    /// Expressions to evaluate
    #[arg(required = true)]
    exprs: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose >= 3 {
        logger.filter_module("arena_tree_calc", log::LevelFilter::Trace);
    }
    logger.init();

    let config = ParserConfig::default().with_max_digits(args.max_digits);
    let mut parser = ExprParser::with_config(config);
    let mut failed = false;

    for expr in &args.exprs {
        if let Err(e) = parser.parse(expr) {
            report_parse_error(expr, &e);
            failed = true;
            continue;
        }
        if args.verbose >= 1 {
            print!("{}", parser.dump(args.verbose >= 2));
        }
        match parser.evaluate() {
            Ok(value) => println!("Result = {}", round_significant(value, RESULT_DIGITS)),
            Err(e) => {
                println!("ERROR evaluating the expression: {expr}");
                println!("{e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn report_parse_error(expr: &str, e: &ParseError) {
    println!("ERROR {} parsing the expression:", e.kind.code());
    println!("{expr}");
    println!("{:width$}^", "", width = e.index);
    match e.ch {
        Some(c) => println!("At position {} got character \"{c}\".", e.index),
        None => println!("At position {} reached the end of the expression.", e.index),
    }
    println!("{}", e.kind.message());
}

/// Rounds to `digits` significant digits, so that printing does not expose
/// binary representation noise such as `0.30000000000000004`.
fn round_significant(value: f64, digits: usize) -> f64 {
    format!("{:.*e}", digits.saturating_sub(1), value)
        .parse()
        .unwrap_or(value)
}
