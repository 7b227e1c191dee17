//! Defines [`TreeDisplay`], a formatter for rendering a [`Tree`] sideways.
//!
//! The right subtree is printed above its parent and the left subtree below,
//! so the output reads as the tree rotated a quarter turn counter-clockwise.

use crate::{Arena, NodeId, Prioritized, Tree};
use std::fmt;

/// Indentation of the root line.
pub const ROOT_MARGIN: usize = 2;

/// Extra indentation per tree level.
pub const INDENT_STEP: usize = 8;

/// A wrapper that ties together a [`Tree`] and its [`Arena`] for
/// pretty-printing.
///
/// Each node is written on its own line as `(payload)`, indented by
/// [`ROOT_MARGIN`] plus [`INDENT_STEP`] per level. With
/// [`details`](TreeDisplay::details) enabled the line also carries the node's
/// priority and creation sequence number, as in `(+) 6!   #3`.
///
/// ### Example
/// ```rust
/// # use arena_tree::{Arena, Prioritized, Side, Tree};
/// # struct P(char);
/// # impl Prioritized for P { fn priority(&self) -> u8 { 0 } }
/// # impl std::fmt::Display for P {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
/// # }
/// let mut arena = Arena::new();
/// let root = arena.allocate(P('+'));
/// arena.allocate_child(P('1'), root, Side::Left).unwrap();
/// arena.allocate_child(P('2'), root, Side::Right).unwrap();
/// let tree = Tree::new(&mut arena, root).unwrap();
/// assert_eq!(
///     tree.display(&arena).to_string(),
///     "          (2)\n  (+)\n          (1)\n"
/// );
/// ```
///
/// Construct instances via [`Tree::display`].
pub struct TreeDisplay<'a, T> {
    tree: &'a Tree,
    arena: &'a Arena<T>,
    details: bool,
}

impl Tree {
    /// Return a [`TreeDisplay`] suitable for formatting with [`fmt::Display`].
    #[inline]
    pub fn display<'a, T>(&'a self, arena: &'a Arena<T>) -> TreeDisplay<'a, T> {
        TreeDisplay {
            tree: self,
            arena,
            details: false,
        }
    }
}

impl<'a, T> TreeDisplay<'a, T> {
    /// Enables or disables the priority and sequence-number suffix.
    pub fn details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }
}

impl<'a, T: fmt::Display + Prioritized> TreeDisplay<'a, T> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        let node = self.arena.get(id).map_err(|_e| fmt::Error)?;
        if let Some(right) = node.right() {
            self.write_node(f, right, indent + INDENT_STEP)?;
        }
        write!(f, "{:indent$}({})", "", node.data())?;
        if self.details {
            write!(f, " {}!   #{}", node.data().priority(), node.seq_no())?;
        }
        writeln!(f)?;
        if let Some(left) = node.left() {
            self.write_node(f, left, indent + INDENT_STEP)?;
        }
        Ok(())
    }
}

impl<'a, T: fmt::Display + Prioritized> fmt::Display for TreeDisplay<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.tree.root(), ROOT_MARGIN)
    }
}
