//! Expression parser that builds a precedence-correct tree in one forward scan.
//!
//! This module defines [`ExprParser`], a parse session owning the [`Arena`]
//! and the [`Tree`] it builds. There is no operator stack: precedence and
//! associativity are resolved by climbing the tree cursor with
//! [`Tree::search_up`] and grafting each new node below the cursor with a
//! side swap, so the new node adopts everything built so far at its level as
//! its left operand.
//!
//! The tree is seeded with a sentinel `(` root that serves as the floor of
//! every upward search; it is removed once the scan completes.

use crate::{
    CalcError, Evaluator, Item, OperDefs, OperationKind, ParseError, ParseErrorKind, ParserConfig,
    Scanner,
};
use arena_tree::{Arena, Side, Tree, TreeError};

/// A parse session.
///
/// Each call to [`parse`](ExprParser::parse) releases every node of the
/// previous attempt, so sequence numbers restart at zero and handles from an
/// earlier tree stop resolving. Sessions share nothing, and may be used on
/// different threads independently.
///
/// ```rust
/// # use arena_tree_calc::ExprParser;
/// let mut parser = ExprParser::new();
/// parser.parse("2 ^ 3 ^ 2").unwrap();
/// assert_eq!(parser.evaluate().unwrap(), 512.0);
/// ```
#[derive(Debug)]
pub struct ExprParser {
    config: ParserConfig,
    opers: OperDefs,
    arena: Arena<Item>,
    tree: Option<Tree>,
}

impl Default for ExprParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            opers: OperDefs::new(),
            arena: Arena::new(),
            tree: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the tree of the last successful parse.
    #[inline]
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    #[inline]
    pub fn arena(&self) -> &Arena<Item> {
        &self.arena
    }

    /// Releases every node and forgets the current tree.
    pub fn reset(&mut self) {
        self.tree = None;
        self.arena.free_all();
    }

    /// Parses `input` into a new tree, replacing any previous one.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] detected. Nothing of the failed
    /// attempt is kept: the arena is released before returning.
    pub fn parse(&mut self, input: &str) -> Result<Tree, ParseError> {
        self.reset();
        match self.build(input) {
            Ok(tree) => {
                log::debug!("parsed {input:?} into {} node(s)", self.arena.len());
                self.tree = Some(tree);
                Ok(tree)
            }
            Err(e) => {
                log::debug!("failed to parse {input:?}: {e}");
                self.arena.free_all();
                Err(e)
            }
        }
    }

    /// Evaluates the tree of the last successful parse.
    pub fn evaluate(&self) -> Result<f64, CalcError> {
        let tree = self.tree.as_ref().ok_or(CalcError::NotParsed)?;
        Ok(Evaluator::new(&self.arena).evaluate(tree)?)
    }

    /// Renders the current tree, or an empty string if there is none.
    ///
    /// With `details`, every line also shows the node's priority and
    /// sequence number.
    pub fn dump(&self, details: bool) -> String {
        match &self.tree {
            Some(tree) => tree.display(&self.arena).details(details).to_string(),
            None => String::new(),
        }
    }

    fn build(&mut self, input: &str) -> Result<Tree, ParseError> {
        let mut scanner = Scanner::new(input);
        scanner.check()?;

        let sentinel = self.arena.allocate(Item::new(OperationKind::OpenParen));
        let mut tree = Tree::new(&mut self.arena, sentinel)
            .map_err(|e| ParseError::internal(e, None, scanner.pos()))?;
        let mut prev = OperationKind::OpenParen;

        loop {
            scanner.skip_whitespace();
            let Some(c) = scanner.peek() else {
                break;
            };
            let index = scanner.pos();
            let item = self.classify(&mut scanner, prev)?;
            log::trace!("incoming {item} ({:?}, priority {}) at {index}", item.kind, item.priority);
            self.graft(&mut tree, item)
                .map_err(|e| match e {
                    TreeError::RootDeletion => {
                        ParseError::new(ParseErrorKind::NoMatchingParenthesis, Some(c), index)
                    }
                    e => ParseError::internal(e, Some(c), index),
                })?;
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("\n{}", tree.display(&self.arena).details(true));
            }
            prev = item.kind;
        }

        let removed = self
            .remove_sentinel(&mut tree)
            .map_err(|e| ParseError::internal(e, None, scanner.end()))?;
        if !removed {
            return Err(ParseError::new(ParseErrorKind::VoidExpression, None, scanner.end()));
        }
        Ok(tree)
    }

    /// Reads the next item and decides its kind from the character and the
    /// kind of the previous item.
    fn classify(&self, scanner: &mut Scanner, prev: OperationKind) -> Result<Item, ParseError> {
        use OperationKind::*;

        let Some(c) = scanner.peek() else {
            return Err(scanner.error(ParseErrorKind::VoidExpression));
        };
        let after_operand = prev.ends_operand();

        let kind = match c {
            '(' | '0'..='9' | '.' | 'a'..='z' | 'A'..='Z' if after_operand => {
                return Err(scanner.error(ParseErrorKind::MissingOp));
            }
            '0'..='9' | '.' => {
                return Ok(Item::number(scanner.scan_number(self.config.max_digits)?));
            }
            'a'..='z' | 'A'..='Z' => return self.resolve_name(scanner),
            '(' => OpenParen,
            ')' => CloseParen,
            '+' if after_operand => Plus,
            '-' if after_operand => Minus,
            '+' => Positive,
            '-' => Negative,
            '*' | '/' | '%' | '^' | '!' if !after_operand => {
                return Err(scanner.error(ParseErrorKind::ContiguousOp));
            }
            '*' => Multiply,
            '/' => Divide,
            '%' => Remainder,
            '^' => Power,
            '!' => Factorial,
            _ => return Err(scanner.error(ParseErrorKind::UnknownChar)),
        };
        scanner.bump();
        Ok(Item::new(kind))
    }

    /// Resolves a run of letters as a function (when followed by `(`) or a
    /// named constant, which becomes a number item.
    fn resolve_name(&self, scanner: &mut Scanner) -> Result<Item, ParseError> {
        let start = scanner.pos();
        let first = scanner.peek();
        let name = scanner.scan_name();
        let unknown_function = || ParseError::new(ParseErrorKind::UnknownFunction, first, start);

        if scanner.peek() == Some('(') {
            return self
                .opers
                .function(&name)
                .map(Item::new)
                .ok_or_else(unknown_function);
        }
        if let Some(kind) = self.opers.constant(&name) {
            return Ok(Item::number(kind.def().value));
        }
        if name.chars().count() > self.config.max_name_len {
            Err(unknown_function())
        } else {
            Err(scanner.error(ParseErrorKind::UnknownChar))
        }
    }

    /// Climbs to the node `item` must attach to and applies it: a `)`
    /// deletes its matching `(`, anything else becomes the cursor's new right
    /// child, adopting the displaced subtree as its left child.
    fn graft(&mut self, tree: &mut Tree, item: Item) -> Result<(), TreeError> {
        if let Some(bound) = item.kind.search_bound() {
            tree.search_up(&self.arena, bound, false)?;
        }
        if item.kind == OperationKind::CloseParen {
            let removed = tree.delete_preserving(&mut self.arena, Side::Right, true)?;
            log::trace!("closed {removed}, cursor at {}", tree.cursor());
        } else {
            let node = self.arena.allocate(item);
            tree.splice_below(&mut self.arena, node, Side::Right, true, true)?;
            tree.step_down_right(&self.arena)?;
            log::trace!("inserted {item} as {node}");
        }
        Ok(())
    }

    /// Drops the sentinel root and promotes its right child. Returns `false`
    /// if the sentinel has no right child, i.e. nothing was built.
    fn remove_sentinel(&mut self, tree: &mut Tree) -> Result<bool, TreeError> {
        let sentinel = tree.root();
        let Some(top) = self.arena.get(sentinel)?.right() else {
            return Ok(false);
        };
        tree.set_root_and_cursor(&mut self.arena, top)?;
        let removed = self.arena.free(sentinel)?;
        log::trace!("removed sentinel {removed}, new root {top}");
        Ok(true)
    }
}
