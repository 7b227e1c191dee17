//! # Calculator Error Types
//!
//! This module defines the error surface of the calculator pipeline:
//!
//! - [`ParseError`] with its [`ParseErrorKind`]: the first problem found
//!   while turning text into a tree, located by character index.
//! - [`EvalError`]: arithmetic that has no finite real result.
//! - [`CalcError`]: a unified error aggregating both, plus tree faults.
//!
//! Conversions are derived with `#[from]`, so functions returning
//! `Result<T, CalcError>` can propagate any of them with `?`.

use crate::OperationKind;
use arena_tree::TreeError;
use thiserror::Error;

/// The reason a parse failed. Exactly one kind is reported per failure: the
/// first one detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    VoidExpression,
    ContiguousOp,
    MissingOp,
    IncorrectDecimalPoint,
    TooManyDigits,
    UnknownFunction,
    UnknownChar,
    NoMatchingParenthesis,
    /// The tree rejected an edit. Never produced on valid code paths.
    Internal,
}

impl ParseErrorKind {
    /// Message shown for a successful parse.
    pub const SUCCESS_MESSAGE: &str = "Ok. No error.";

    /// Stable numeric code; `0` is reserved for success.
    pub const fn code(self) -> u8 {
        match self {
            Self::VoidExpression => 1,
            Self::ContiguousOp => 2,
            Self::MissingOp => 3,
            Self::IncorrectDecimalPoint => 4,
            Self::TooManyDigits => 5,
            Self::UnknownFunction => 6,
            Self::UnknownChar => 7,
            Self::NoMatchingParenthesis => 8,
            Self::Internal => 9,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::VoidExpression => "No arithmetic expression to parse.",
            Self::ContiguousOp => "Two consecutive operators.",
            Self::MissingOp => "Missing operator.",
            Self::IncorrectDecimalPoint => "Incorrect placement of the decimal point.",
            Self::TooManyDigits => "Too many decimal digits.",
            Self::UnknownFunction => "Unknown function name.",
            Self::UnknownChar => "Unknown character.",
            Self::NoMatchingParenthesis => "Unbalanced number of parenthesis.",
            Self::Internal => "Internal tree inconsistency.",
        }
    }
}

/// A located parse failure.
///
/// `index` counts characters (not bytes) from the start of the original,
/// untrimmed input. `ch` is the offending character, or `None` when the
/// problem was detected at the end of the input.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} (at index {})", .kind.message(), .index)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub ch: Option<char>,
    pub index: usize,
    #[source]
    pub source: Option<TreeError>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, ch: Option<char>, index: usize) -> Self {
        Self {
            kind,
            ch,
            index,
            source: None,
        }
    }

    /// Wraps a tree fault raised while handling the character at `index`.
    pub fn internal(source: TreeError, ch: Option<char>, index: usize) -> Self {
        Self {
            kind: ParseErrorKind::Internal,
            ch,
            index,
            source: Some(source),
        }
    }
}

/// Arithmetic failures detected while evaluating a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Division or remainder with a zero divisor.
    #[error("division by zero in '{0}'")]
    DivisionByZero(OperationKind),

    /// The operand lies outside the domain of the operation.
    #[error("{value} is outside the domain of '{op}'")]
    DomainError { op: OperationKind, value: f64 },

    /// Finite operands produced an infinite or undefined result.
    #[error("arithmetic overflow in '{op}'")]
    ArithmeticOverflow { op: OperationKind },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Represents all possible errors of the calculator.
///
/// # Examples
/// ```rust
/// # use arena_tree_calc::{CalcError, ParseErrorKind, evaluate};
/// match evaluate("2 ** 3") {
///     Err(CalcError::Parse(e)) => assert_eq!(e.kind, ParseErrorKind::ContiguousOp),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Evaluation was requested before any successful parse.
    #[error("no expression has been parsed")]
    NotParsed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_nonzero() {
        use ParseErrorKind::*;
        let kinds = [
            VoidExpression,
            ContiguousOp,
            MissingOp,
            IncorrectDecimalPoint,
            TooManyDigits,
            UnknownFunction,
            UnknownChar,
            NoMatchingParenthesis,
        ];
        for (i, kind) in kinds.iter().enumerate() {
            assert_eq!(kind.code() as usize, i + 1);
        }
    }

    #[test]
    fn display_messages() {
        let e = ParseError::new(ParseErrorKind::MissingOp, Some('s'), 2);
        assert_eq!(e.to_string(), "Missing operator. (at index 2)");
        let e = EvalError::DivisionByZero(OperationKind::Divide);
        assert_eq!(e.to_string(), "division by zero in '/'");
        let e: CalcError = EvalError::DomainError {
            op: OperationKind::Sqrt,
            value: -1.0,
        }
        .into();
        assert_eq!(e.to_string(), "evaluation error: -1 is outside the domain of 'sqrt'");
    }

    #[test]
    fn internal_error_keeps_source() {
        use std::error::Error as _;
        let e = ParseError::internal(TreeError::RootDeletion, Some(')'), 3);
        assert_eq!(e.kind, ParseErrorKind::Internal);
        assert!(e.source().is_some());
    }
}
