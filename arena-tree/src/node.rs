//! Defines [`Node`], the element stored in an [`Arena`], and [`Side`].
//!
//! A node owns its payload but none of its neighbours: parent and child
//! links are plain [`NodeId`] handles into the same arena.
//!
//! [`Arena`]: crate::Arena

use crate::NodeId;
use std::fmt;

/// Which child link of a node an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The left child link.
    Left,
    /// The right child link.
    Right,
}

impl Side {
    /// Returns the other side.
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// A binary-tree node carrying a payload of type `T`.
///
/// Nodes are only created by [`Arena::allocate`] and friends, which assign
/// the creation sequence number. Structural links are rewired exclusively by
/// [`Tree`] edits, which keep every parent pointer consistent with the
/// corresponding child pointer.
///
/// Identity is the node's handle, not its payload: two nodes holding equal
/// payloads are still different nodes.
///
/// [`Arena::allocate`]: crate::Arena::allocate
/// [`Tree`]: crate::Tree
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) data: T,
    pub(crate) seq_no: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(data: T, seq_no: usize) -> Self {
        Self {
            data,
            seq_no,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// Returns the payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns the payload mutably. Links are not reachable this way.
    #[inline]
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns the creation sequence number assigned by the arena.
    #[inline]
    pub fn seq_no(&self) -> usize {
        self.seq_no
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Returns the child on the given side.
    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns `true` if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_side() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.opposite().opposite(), Side::Left);
    }

    #[test]
    fn fresh_node_is_unlinked() {
        let node = Node::new('x', 7);
        assert_eq!(*node.data(), 'x');
        assert_eq!(node.seq_no(), 7);
        assert!(node.parent().is_none());
        assert!(node.is_leaf());
        assert_eq!(node.child(Side::Left), None);
    }

    #[test]
    fn side_display() {
        assert_eq!(format!("{} {}", Side::Left, Side::Right), "left right");
    }
}
