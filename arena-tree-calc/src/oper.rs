//! Operation kinds, their binding priorities, and the function/constant name catalog.
//!
//! Every [`OperationKind`] maps to exactly one [`OperDef`] through an
//! exhaustive `match`, so adding or reordering kinds can never desynchronize
//! the metadata from the enumeration. The [`OperDefs`] catalog resolves the
//! alphabetic names accepted in expressions (`sin`, `pi`, ...) to their kinds.

use arena_tree::Bound;
use indexmap::IndexMap;
use smartstring::alias::String;
use std::fmt;

/// Defines the syntactic position (fixity) of an operation.
///
/// # Variants
/// - [`Operand`]: a literal number or named constant, e.g. `2.5`, `pi`.
/// - [`Fun`]: a named unary function applied to a parenthesized operand, e.g. `sin(x)`.
/// - [`Prefix`]: a unary sign before its operand, e.g. `-x`.
/// - [`Infix`]: a binary operator between operands, e.g. `x + y`.
/// - [`Postfix`]: an operator after its operand, e.g. `x!`.
/// - [`Group`]: a grouping delimiter, `(` or `)`.
///
/// [`Operand`]: Fixity::Operand
/// [`Fun`]: Fixity::Fun
/// [`Prefix`]: Fixity::Prefix
/// [`Infix`]: Fixity::Infix
/// [`Postfix`]: Fixity::Postfix
/// [`Group`]: Fixity::Group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Fixity {
    Operand = 0,
    Fun = 1,
    Prefix = 2,
    Infix = 3,
    Postfix = 4,
    Group = 5,
}

impl Fixity {
    /// The total number of fixity variants.
    pub const COUNT: usize = 6;

    /// String representations of each fixity variant, in declaration order.
    pub const STRS: &[&str] = &["operand", "fun", "prefix", "infix", "postfix", "group"];
}

impl From<Fixity> for usize {
    fn from(f: Fixity) -> Self {
        f as usize
    }
}

impl fmt::Display for Fixity {
    /// Formats the fixity as its canonical lowercase name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Fixity::STRS[usize::from(*self)])
    }
}

/// Operator associativity classification.
///
/// | Variant | Description |
/// |----------|--------------|
/// | [`Assoc::None`]  | Does not chain: operands, functions, signs and delimiters. |
/// | [`Assoc::Left`]  | Groups from left to right, e.g. `a - b - c`. |
/// | [`Assoc::Right`] | Groups from right to left, e.g. `a ^ b ^ c`. |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Assoc {
    None = 0,
    Left = 1,
    Right = 2,
}

impl Assoc {
    /// Total number of associativity variants.
    pub const COUNT: usize = 3;

    /// Canonical string representations for each variant.
    pub const STRS: &[&str] = &["none", "left", "right"];
}

impl From<Assoc> for usize {
    fn from(a: Assoc) -> Self {
        a as usize
    }
}

impl fmt::Display for Assoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Assoc::STRS[usize::from(*self)])
    }
}

/// Binding priorities. Lower values bind tighter.
pub const OPERAND_PRIORITY: u8 = 0;
pub const FUNCTION_PRIORITY: u8 = 1;
pub const FACTORIAL_PRIORITY: u8 = 2;
pub const POWER_PRIORITY: u8 = 3;
pub const PRODUCT_PRIORITY: u8 = 4;
pub const SIGN_PRIORITY: u8 = 5;
pub const SUM_PRIORITY: u8 = 6;
pub const GROUP_PRIORITY: u8 = 7;

/// The closed set of operations an expression may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    Number,
    E,
    Pi,
    Phi,
    OpenParen,
    CloseParen,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Asin,
    Acos,
    Atan,
    Asinh,
    Acosh,
    Atanh,
    Ln,
    Log,
    Ltwo,
    Sqrt,
    Curt,
    Gamma,
    Factorial,
    Power,
    Multiply,
    Divide,
    Remainder,
    Positive,
    Negative,
    Plus,
    Minus,
}

/// Static metadata of one [`OperationKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperDef {
    /// Binding priority. Lower binds tighter.
    pub priority: u8,
    /// Canonical display symbol; for functions and constants, the name
    /// accepted in expressions.
    pub symbol: &'static str,
    /// Default payload value. Non-zero only for named constants.
    pub value: f64,
    pub fixity: Fixity,
    pub assoc: Assoc,
}

impl OperDef {
    const fn new(priority: u8, symbol: &'static str, fixity: Fixity, assoc: Assoc) -> Self {
        Self {
            priority,
            symbol,
            value: 0.0,
            fixity,
            assoc,
        }
    }

    const fn constant(symbol: &'static str, value: f64) -> Self {
        Self {
            priority: OPERAND_PRIORITY,
            symbol,
            value,
            fixity: Fixity::Operand,
            assoc: Assoc::None,
        }
    }

    const fn function(symbol: &'static str) -> Self {
        Self::new(FUNCTION_PRIORITY, symbol, Fixity::Fun, Assoc::None)
    }
}

/// The golden ratio, `(1 + sqrt(5)) / 2`.
pub const PHI: f64 = 1.618_033_988_749_894_8;

impl OperationKind {
    /// Every kind, in declaration order.
    pub const ALL: [OperationKind; 34] = [
        Self::Number,
        Self::E,
        Self::Pi,
        Self::Phi,
        Self::OpenParen,
        Self::CloseParen,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Exp,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Asinh,
        Self::Acosh,
        Self::Atanh,
        Self::Ln,
        Self::Log,
        Self::Ltwo,
        Self::Sqrt,
        Self::Curt,
        Self::Gamma,
        Self::Factorial,
        Self::Power,
        Self::Multiply,
        Self::Divide,
        Self::Remainder,
        Self::Positive,
        Self::Negative,
        Self::Plus,
        Self::Minus,
    ];

    /// Returns the catalog entry of this kind.
    pub const fn def(self) -> OperDef {
        use Assoc as A;
        use Fixity as F;
        match self {
            Self::Number => OperDef::new(OPERAND_PRIORITY, "num", F::Operand, A::None),
            Self::E => OperDef::constant("e", std::f64::consts::E),
            Self::Pi => OperDef::constant("pi", std::f64::consts::PI),
            Self::Phi => OperDef::constant("phi", PHI),
            Self::OpenParen => OperDef::new(GROUP_PRIORITY, "(", F::Group, A::None),
            Self::CloseParen => OperDef::new(GROUP_PRIORITY, ")", F::Group, A::None),
            Self::Sin => OperDef::function("sin"),
            Self::Cos => OperDef::function("cos"),
            Self::Tan => OperDef::function("tan"),
            Self::Sinh => OperDef::function("sinh"),
            Self::Cosh => OperDef::function("cosh"),
            Self::Tanh => OperDef::function("tanh"),
            Self::Exp => OperDef::function("exp"),
            Self::Asin => OperDef::function("asin"),
            Self::Acos => OperDef::function("acos"),
            Self::Atan => OperDef::function("atan"),
            Self::Asinh => OperDef::function("asinh"),
            Self::Acosh => OperDef::function("acosh"),
            Self::Atanh => OperDef::function("atanh"),
            Self::Ln => OperDef::function("ln"),
            Self::Log => OperDef::function("log"),
            Self::Ltwo => OperDef::function("ltwo"),
            Self::Sqrt => OperDef::function("sqrt"),
            Self::Curt => OperDef::function("curt"),
            Self::Gamma => OperDef::function("gamma"),
            Self::Factorial => OperDef::new(FACTORIAL_PRIORITY, "!", F::Postfix, A::Left),
            Self::Power => OperDef::new(POWER_PRIORITY, "^", F::Infix, A::Right),
            Self::Multiply => OperDef::new(PRODUCT_PRIORITY, "*", F::Infix, A::Left),
            Self::Divide => OperDef::new(PRODUCT_PRIORITY, "/", F::Infix, A::Left),
            Self::Remainder => OperDef::new(PRODUCT_PRIORITY, "%", F::Infix, A::Left),
            Self::Positive => OperDef::new(SIGN_PRIORITY, "+", F::Prefix, A::None),
            Self::Negative => OperDef::new(SIGN_PRIORITY, "-", F::Prefix, A::None),
            Self::Plus => OperDef::new(SUM_PRIORITY, "+", F::Infix, A::Left),
            Self::Minus => OperDef::new(SUM_PRIORITY, "-", F::Infix, A::Left),
        }
    }

    #[inline]
    pub const fn priority(self) -> u8 {
        self.def().priority
    }

    #[inline]
    pub const fn symbol(self) -> &'static str {
        self.def().symbol
    }

    #[inline]
    pub const fn fixity(self) -> Fixity {
        self.def().fixity
    }

    /// Returns `true` for kinds that end an operand: a binary or postfix
    /// operator may follow them directly.
    pub const fn ends_operand(self) -> bool {
        matches!(
            self,
            Self::Number | Self::E | Self::Pi | Self::Phi | Self::CloseParen | Self::Factorial
        )
    }

    /// Returns the walk a token of this kind performs before it is attached,
    /// or `None` if it attaches directly below the cursor.
    ///
    /// Left-associative operators climb past ancestors of equal priority;
    /// right-associative ones and `)` stop on them.
    pub const fn search_bound(self) -> Option<Bound> {
        let def = self.def();
        match (self, def.assoc) {
            (Self::CloseParen, _) | (_, Assoc::Right) => Some(Bound::Below(def.priority)),
            (_, Assoc::Left) => Some(Bound::AtMost(def.priority)),
            (_, Assoc::None) => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Catalog of the alphabetic names accepted in expressions.
///
/// Maps each function and constant name to its [`OperationKind`], in
/// declaration order.
#[derive(Debug, Clone)]
pub struct OperDefs {
    map: IndexMap<String, OperationKind>,
}

impl Default for OperDefs {
    fn default() -> Self {
        Self::new()
    }
}

impl OperDefs {
    /// Builds the catalog of every named function and constant.
    pub fn new() -> Self {
        let map = OperationKind::ALL
            .iter()
            .filter(|kind| matches!(kind.fixity(), Fixity::Fun) || kind.is_constant())
            .map(|&kind| (String::from(kind.symbol()), kind))
            .collect();
        Self { map }
    }

    /// Looks up any named kind.
    pub fn lookup(&self, name: &str) -> Option<OperationKind> {
        self.map.get(name).copied()
    }

    /// Looks up a function name.
    pub fn function(&self, name: &str) -> Option<OperationKind> {
        self.lookup(name).filter(|kind| kind.fixity() == Fixity::Fun)
    }

    /// Looks up a constant name.
    pub fn constant(&self, name: &str) -> Option<OperationKind> {
        self.lookup(name).filter(|kind| kind.is_constant())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, OperationKind)> {
        self.map.iter().map(|(name, &kind)| (name.as_str(), kind))
    }
}

impl OperationKind {
    /// Returns `true` for the named constants `e`, `pi` and `phi`.
    #[inline]
    pub const fn is_constant(self) -> bool {
        matches!(self, Self::E | Self::Pi | Self::Phi)
    }
}
