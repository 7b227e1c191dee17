//! Parser configuration.

/// Limits applied while scanning an expression.
///
/// ```rust
/// # use arena_tree_calc::ParserConfig;
/// let config = ParserConfig::default().with_max_digits(8);
/// assert_eq!(config.max_digits, 8);
/// assert_eq!(config.max_name_len, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Maximum number of digits in a numeric literal, exponent included.
    pub max_digits: usize,
    /// Alphabetic runs longer than this are reported as unknown functions
    /// rather than unknown characters.
    pub max_name_len: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_DIGITS: usize = 20;
    /// Length of the longest function or constant name in the catalog.
    pub const DEFAULT_MAX_NAME_LEN: usize = 5;

    pub fn with_max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_digits: Self::DEFAULT_MAX_DIGITS,
            max_name_len: Self::DEFAULT_MAX_NAME_LEN,
        }
    }
}
