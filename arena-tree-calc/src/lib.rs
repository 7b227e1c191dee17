//! # Arena Tree Calculator
//!
//! Parses infix arithmetic expressions into arena-backed binary trees and
//! evaluates them.
//!
//! The grammar covers decimal numbers with an optional exponent, parentheses,
//! the binary operators `+ - * / % ^`, postfix `!`, unary `+` (absolute
//! value) and `-`, the constants `e`, `pi` and `phi`, and the unary functions
//! `sin cos tan sinh cosh tanh exp asin acos atan asinh acosh atanh ln log
//! ltwo sqrt curt gamma`.
//!
//! [`ExprParser`] builds the tree in a single forward scan by moving a cursor
//! over an [`arena_tree::Tree`]; [`Evaluator`] folds it back into a number.
//!
//! ## Example
//! ```rust
//! # use arena_tree_calc::{ExprParser, ParseErrorKind};
//! let mut parser = ExprParser::new();
//! parser.parse("3 + 4 * (2 - 1)").unwrap();
//! assert_eq!(parser.evaluate().unwrap(), 7.0);
//!
//! let err = parser.parse("10 * pedo(20)").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::UnknownFunction);
//! assert_eq!(err.index, 5);
//! ```
//!
//! ## License
//!
//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

mod config;
mod error;
mod eval;
mod oper;
mod parser;
mod scanner;
mod token;

pub use config::ParserConfig;
pub use error::{CalcError, EvalError, ParseError, ParseErrorKind};
pub use eval::Evaluator;
pub use oper::{
    Assoc, FACTORIAL_PRIORITY, FUNCTION_PRIORITY, Fixity, GROUP_PRIORITY, OPERAND_PRIORITY,
    OperDef, OperDefs, OperationKind, PHI, POWER_PRIORITY, PRODUCT_PRIORITY, SIGN_PRIORITY,
    SUM_PRIORITY,
};
pub use parser::ExprParser;
pub(crate) use scanner::Scanner;
pub use token::Item;

/// Parses and evaluates `input` in a fresh session.
///
/// ```rust
/// assert_eq!(arena_tree_calc::evaluate("2 * 3 * 4 * 5 - 5!").unwrap(), 0.0);
/// ```
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let mut parser = ExprParser::new();
    parser.parse(input)?;
    parser.evaluate()
}
