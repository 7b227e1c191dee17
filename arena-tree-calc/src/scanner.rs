//! Character-level scanning of expression text.
//!
//! [`Scanner`] walks the original, untrimmed input by character index, so
//! every position it reports can be shown under the input as typed. It
//! knows how to read numeric literals and alphabetic names; classifying
//! what it reads is left to the parser.

use crate::{ParseError, ParseErrorKind};
use smartstring::alias::String;

pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Character index of the next unread character.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Character index just past the end of the input.
    #[inline]
    pub fn end(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Checks the whole input before any tree is built.
    ///
    /// Fails with [`ParseErrorKind::VoidExpression`] if the input holds
    /// nothing but whitespace, and with
    /// [`ParseErrorKind::NoMatchingParenthesis`] if a `)` has no `(` before it
    /// or some `(` is never closed. Leaves the scanner on the first
    /// non-whitespace character.
    pub fn check(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        for (index, &c) in self.chars.iter().enumerate() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        ParseError::new(ParseErrorKind::NoMatchingParenthesis, Some(c), index)
                    })?
                }
                _ => {}
            }
        }
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(ParseError::new(ParseErrorKind::VoidExpression, None, self.end()));
        }
        if depth != 0 {
            return Err(ParseError::new(
                ParseErrorKind::NoMatchingParenthesis,
                None,
                self.end(),
            ));
        }
        Ok(())
    }

    /// Reads a numeric literal starting at the current position.
    ///
    /// Accepts digits, at most one decimal point, and an exponent marker
    /// `e`/`E` when it is followed by a digit or by a sign and a digit. A
    /// marker not followed that way ends the literal. A literal ending in
    /// `.` reads as if followed by `0`.
    ///
    /// # Errors
    /// - [`ParseErrorKind::TooManyDigits`] on the digit that exceeds `max_digits`.
    /// - [`ParseErrorKind::IncorrectDecimalPoint`] on a second decimal point,
    ///   or a decimal point inside the exponent.
    pub fn scan_number(&mut self, max_digits: usize) -> Result<f64, ParseError> {
        let start = self.pos;
        let mut literal = std::string::String::new();
        let mut digits = 0usize;
        let mut point = false;
        let mut exponent = false;

        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {
                    digits += 1;
                    if digits > max_digits {
                        return Err(self.error(ParseErrorKind::TooManyDigits));
                    }
                }
                '.' => {
                    if point || exponent {
                        return Err(self.error(ParseErrorKind::IncorrectDecimalPoint));
                    }
                    point = true;
                }
                'e' | 'E' if !exponent => {
                    let width = match (self.peek_at(1), self.peek_at(2)) {
                        (Some(d), _) if d.is_ascii_digit() => 1,
                        (Some('+' | '-'), Some(d)) if d.is_ascii_digit() => 2,
                        _ => break,
                    };
                    for _ in 0..width {
                        literal.extend(self.bump());
                    }
                    exponent = true;
                    continue;
                }
                _ => break,
            }
            literal.push(c);
            self.pos += 1;
        }

        if literal.ends_with('.') {
            literal.push('0');
        }
        log::trace!("number literal {literal:?} at {start}");
        literal.parse::<f64>().map_err(|_e| {
            ParseError::new(
                ParseErrorKind::IncorrectDecimalPoint,
                self.chars.get(start).copied(),
                start,
            )
        })
    }

    /// Reads a run of ASCII letters starting at the current position.
    pub fn scan_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(c);
            self.pos += 1;
        }
        name
    }

    /// Builds an error located at the current position.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.peek(), self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(s: &str) -> Result<(f64, usize), ParseError> {
        let mut scanner = Scanner::new(s);
        let value = scanner.scan_number(20)?;
        Ok((value, scanner.pos()))
    }

    #[test]
    fn plain_and_decimal_numbers() {
        assert_eq!(number("42+1"), Ok((42.0, 2)));
        assert_eq!(number("3.25)"), Ok((3.25, 4)));
        assert_eq!(number(".5"), Ok((0.5, 2)));
        assert_eq!(number("7."), Ok((7.0, 2)));
    }

    #[test]
    fn exponent_forms() {
        assert_eq!(number("1e3"), Ok((1000.0, 3)));
        assert_eq!(number("2.5E-2*"), Ok((0.025, 6)));
        assert_eq!(number("1e+2"), Ok((100.0, 4)));
        // a marker that is not an exponent is left for the caller
        assert_eq!(number("2e"), Ok((2.0, 1)));
        assert_eq!(number("2exp"), Ok((2.0, 1)));
        assert_eq!(number("2e-x"), Ok((2.0, 1)));
        assert_eq!(number("1e2e3"), Ok((100.0, 3)));
    }

    #[test]
    fn second_decimal_point() {
        let err = number("1.11.2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::IncorrectDecimalPoint);
        assert_eq!((err.ch, err.index), (Some('.'), 4));
        let err = number("1e2.5").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::IncorrectDecimalPoint);
    }

    #[test]
    fn too_many_digits() {
        let mut scanner = Scanner::new("123456");
        let err = scanner.scan_number(5).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooManyDigits);
        assert_eq!((err.ch, err.index), (Some('6'), 5));
        let mut scanner = Scanner::new("12345");
        assert_eq!(scanner.scan_number(5), Ok(12345.0));
    }

    #[test]
    fn names() {
        let mut scanner = Scanner::new("sin(1)");
        assert_eq!(scanner.scan_name().as_str(), "sin");
        assert_eq!(scanner.peek(), Some('('));
        let mut scanner = Scanner::new("12");
        assert!(scanner.scan_name().is_empty());
        assert_eq!(scanner.pos(), 0);
    }

    #[test]
    fn check_void_and_balance() {
        for blank in ["", " ", "\n \t \n"] {
            let err = Scanner::new(blank).check().unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::VoidExpression, "{blank:?}");
        }
        let err = Scanner::new("1 + (4 * 2").check().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NoMatchingParenthesis);
        assert_eq!((err.ch, err.index), (None, 10));
        let err = Scanner::new(")1(").check().unwrap_err();
        assert_eq!((err.kind, err.index), (ParseErrorKind::NoMatchingParenthesis, 0));

        let mut scanner = Scanner::new("  (1)");
        assert_eq!(scanner.check(), Ok(()));
        assert_eq!(scanner.pos(), 2);
    }
}
