//! # Expression Tokens
//!
//! Defines [`Item`], the payload held by each node of an expression tree.
//! An item is one classified unit of input: an operand or an operator,
//! stamped with the priority and symbol of its [`OperationKind`].

use crate::OperationKind;
use arena_tree::Prioritized;
use std::fmt;

/// One classified unit of input.
///
/// `priority` and `symbol` are copies of the catalog entry for `kind`, taken
/// by [`Item::stamp`]; `value` is only meaningful for numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Item {
    pub kind: OperationKind,
    pub priority: u8,
    pub symbol: &'static str,
    pub value: f64,
}

impl Item {
    /// Creates an item of the given kind, stamped from the catalog and
    /// carrying the kind's default value.
    #[must_use]
    pub fn new(kind: OperationKind) -> Self {
        let def = kind.def();
        Self {
            kind,
            priority: def.priority,
            symbol: def.symbol,
            value: def.value,
        }
    }

    /// Creates a number item.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self {
            value,
            ..Self::new(OperationKind::Number)
        }
    }

    /// Copies priority and symbol from the catalog entry matching `kind`,
    /// leaving `value` untouched.
    pub fn stamp(&mut self) {
        let def = self.kind.def();
        self.priority = def.priority;
        self.symbol = def.symbol;
    }
}

impl Prioritized for Item {
    #[inline]
    fn priority(&self) -> u8 {
        self.priority
    }
}

/// Numbers print their value, everything else its symbol.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OperationKind::Number => write!(f, "{}", self.value),
            _ => f.write_str(self.symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_stamped() {
        let item = Item::new(OperationKind::Divide);
        assert_eq!(item.priority, 4);
        assert_eq!(item.symbol, "/");
        assert_eq!(item.value, 0.0);
        assert_eq!(item.to_string(), "/");
    }

    #[test]
    fn stamp_keeps_value() {
        let mut item = Item::number(2.5);
        item.kind = OperationKind::Sqrt;
        item.stamp();
        assert_eq!(item.priority, 1);
        assert_eq!(item.symbol, "sqrt");
        assert_eq!(item.value, 2.5);
    }

    #[test]
    fn numbers_display_value() {
        assert_eq!(Item::number(2.0).to_string(), "2");
        assert_eq!(Item::number(0.25).to_string(), "0.25");
        assert_eq!(Item::new(OperationKind::Pi).value, std::f64::consts::PI);
    }
}
