//! Defines the [`Arena`] type, which owns every [`Node`] of one tree-building
//! session, and the [`NodeId`] handles that address them.
//!
//! Provides allocation, individual and bulk release, link-level accessors, and
//! parent/child relationship queries.

use crate::{Node, Side, TreeError};
use std::fmt;

/// The arena owns all nodes of a given payload type created during one
/// session. Nodes refer to each other only through [`NodeId`] handles, so
/// there are no owning pointers between nodes and no reference cycles.
///
/// ### Sequence numbers
/// Every allocation receives the next creation sequence number, which is also
/// the node's slot index. Slots are append-only: freeing a node marks its
/// slot vacant, and the slot is never handed out again. Sequence numbers are
/// therefore monotonic until [`free_all`](Arena::free_all) resets them to zero.
///
/// ### Generations
/// Each arena carries a randomly generated [`ArenaID`], embedded in every
/// handle it issues. [`free_all`](Arena::free_all) draws a fresh ID, so a
/// handle kept across a release (or used with another arena) is reported as
/// [`TreeError::InvalidNode`] instead of silently aliasing a newer node.
///
/// ```
/// # use arena_tree::{Arena, TreeError};
/// let mut arena = Arena::new();
/// let a = arena.allocate("a");
/// let b = arena.allocate("b");
/// assert_eq!((a.seq_no(), b.seq_no()), (0, 1));
/// arena.free_all();
/// assert!(matches!(arena.get(a), Err(TreeError::InvalidNode(_))));
/// assert_eq!(arena.allocate("c").seq_no(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Arena<T> {
    /// Randomly generated ID, renewed on every `free_all`.
    pub(crate) arena_id: ArenaID,

    /// Node storage indexed by sequence number. `None` marks a freed slot.
    pub(crate) slots: Vec<Option<Node<T>>>,

    /// Number of occupied slots.
    pub(crate) live: usize,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaID(pub(crate) u32); // Random Arena ID

/// A stable handle to a node, valid until the node is freed or its arena is
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) arena_id: ArenaID,
    pub(crate) index: usize,
}

impl NodeId {
    /// Returns the creation sequence number of the node this handle addresses.
    #[inline]
    pub fn seq_no(&self) -> usize {
        self.index
    }

    /// Returns the ID of the arena generation that issued this handle.
    #[inline]
    pub fn arena_id(&self) -> ArenaID {
        self.arena_id
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    pub arena_id: ArenaID,
    /// Sequence number the next allocation will receive.
    pub allocated: usize,
    /// Nodes currently alive.
    pub live: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Create a new, empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena_id: ArenaID(rand::random()),
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Create a new, empty arena with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Returns stats.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            arena_id: self.arena_id,
            allocated: self.slots.len(),
            live: self.live,
        }
    }

    /// Returns the ID of the current generation.
    #[inline]
    pub fn arena_id(&self) -> ArenaID {
        self.arena_id
    }

    /// Returns the number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocates a detached node holding `data` and returns its handle.
    ///
    /// Exhausting memory aborts, as for any other `Vec` growth; there is no
    /// partial-allocation recovery path.
    pub fn allocate(&mut self, data: T) -> NodeId {
        let index = self.slots.len();
        self.slots.push(Some(Node::new(data, index)));
        self.live += 1;
        NodeId {
            arena_id: self.arena_id,
            index,
        }
    }

    /// Allocates a node holding `data` and hangs it on the `side` link of
    /// `parent`, keeping both link directions consistent.
    ///
    /// Fails without allocating if `parent` does not resolve or already has a
    /// child on that side.
    pub fn allocate_child(
        &mut self,
        data: T,
        parent: NodeId,
        side: Side,
    ) -> Result<NodeId, TreeError> {
        if self.get(parent)?.child(side).is_some() {
            return Err(TreeError::SubtreeTruncation(side));
        }
        let id = self.allocate(data);
        self.set_child(parent, side, Some(id))?;
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Frees a single node and returns its payload.
    ///
    /// Neighbours that still link to the node are unlinked from it first, so
    /// no live node is left pointing at a vacant slot. The slot itself is
    /// never reused.
    pub fn free(&mut self, id: NodeId) -> Result<T, TreeError> {
        self.verify(id)?;
        let (parent, left, right) = {
            let node = self.node(id);
            (node.parent, node.left, node.right)
        };
        if let Some(parent) = parent {
            if let Ok(p) = self.get_mut(parent) {
                if p.left == Some(id) {
                    p.left = None;
                }
                if p.right == Some(id) {
                    p.right = None;
                }
            }
        }
        for child in [left, right].into_iter().flatten() {
            if let Ok(c) = self.get_mut(child) {
                if c.parent == Some(id) {
                    c.parent = None;
                }
            }
        }
        let node = self.slots[id.index].take().ok_or(TreeError::VacantNode(id))?;
        self.live -= 1;
        Ok(node.data)
    }

    /// Releases every node and resets sequence numbering to zero.
    ///
    /// Does not shrink the allocated capacity. A new generation ID is drawn,
    /// which invalidates every handle issued so far.
    pub fn free_all(&mut self) {
        log::trace!("arena {:?}: releasing {} live node(s)", self.arena_id, self.live);
        self.slots.clear();
        self.live = 0;
        let old = self.arena_id;
        while self.arena_id == old {
            self.arena_id = ArenaID(rand::random());
        }
    }

    /// Returns `true` if `id` addresses a live node of this arena.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.verify(id).is_ok()
    }

    /// Resolves a handle to its node.
    #[inline]
    pub fn get(&self, id: NodeId) -> Result<&Node<T>, TreeError> {
        self.verify(id)?;
        Ok(self.node(id))
    }

    /// Resolves a handle to its node, mutably.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node<T>, TreeError> {
        self.verify(id)?;
        match self.slots[id.index].as_mut() {
            Some(node) => Ok(node),
            None => Err(TreeError::VacantNode(id)),
        }
    }

    /// Returns the payload of a node.
    #[inline]
    pub fn data(&self, id: NodeId) -> Result<&T, TreeError> {
        Ok(&self.get(id)?.data)
    }

    /// Iterates over live nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        let arena_id = self.arena_id;
        self.slots.iter().enumerate().filter_map(move |(index, slot)| {
            slot.as_ref().map(|node| (NodeId { arena_id, index }, node))
        })
    }

    /// Returns `true` if `parent` holds `child` on either side and `child`
    /// points back at `parent`.
    pub fn is_parent_of(&self, parent: NodeId, child: NodeId) -> bool {
        self.is_child_on(child, parent, Side::Left) || self.is_child_on(child, parent, Side::Right)
    }

    /// Returns `true` if `child` is the left child of `parent`, checked in
    /// both link directions.
    pub fn is_left_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.is_child_on(child, parent, Side::Left)
    }

    /// Returns `true` if `child` is the right child of `parent`, checked in
    /// both link directions.
    pub fn is_right_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.is_child_on(child, parent, Side::Right)
    }

    #[inline]
    pub fn is_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.is_parent_of(parent, child)
    }

    /// Returns the side of its parent on which `id` hangs, or `None` for a
    /// node without parent.
    ///
    /// # Errors
    /// Returns [`TreeError::Inconsistent`] if the parent does not hold `id` on
    /// either side. This is an internal-consistency fault, never a user error.
    pub fn side_of(&self, id: NodeId) -> Result<Option<Side>, TreeError> {
        let Some(parent) = self.get(id)?.parent else {
            return Ok(None);
        };
        let p = self.get(parent)?;
        if p.left == Some(id) {
            Ok(Some(Side::Left))
        } else if p.right == Some(id) {
            Ok(Some(Side::Right))
        } else {
            Err(TreeError::Inconsistent { node: id, parent })
        }
    }

    fn is_child_on(&self, child: NodeId, parent: NodeId, side: Side) -> bool {
        match (self.get(child), self.get(parent)) {
            (Ok(c), Ok(p)) => c.parent == Some(parent) && p.child(side) == Some(child),
            _ => false,
        }
    }

    #[inline]
    pub(crate) fn set_parent(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.get_mut(id)?.parent = parent;
        Ok(())
    }

    #[inline]
    pub(crate) fn set_child(
        &mut self,
        id: NodeId,
        side: Side,
        child: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.get_mut(id)?.set_child(side, child);
        Ok(())
    }

    /// Returns an error if the handle was issued by another generation or
    /// arena, or if its slot is vacant.
    #[inline]
    fn verify(&self, id: NodeId) -> Result<(), TreeError> {
        if id.arena_id != self.arena_id || id.index >= self.slots.len() {
            return Err(TreeError::InvalidNode(id));
        }
        if self.slots[id.index].is_none() {
            return Err(TreeError::VacantNode(id));
        }
        Ok(())
    }

    /// Borrows a node already checked by [`Self::verify`].
    #[inline]
    fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.index] {
            Some(node) => node,
            None => unreachable!("slot {} verified as live", id.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_are_monotonic() {
        let mut arena = Arena::new();
        let a = arena.allocate(1);
        let b = arena.allocate(2);
        arena.free(a).unwrap();
        let c = arena.allocate(3);
        assert_eq!(a.seq_no(), 0);
        assert_eq!(b.seq_no(), 1);
        assert_eq!(c.seq_no(), 2);
        assert_eq!(arena.get(c).unwrap().seq_no(), 2);
        assert_eq!(arena.stats().allocated, 3);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn freed_slot_is_vacant() {
        let mut arena = Arena::new();
        let a = arena.allocate("a");
        assert_eq!(arena.free(a), Ok("a"));
        assert_eq!(arena.get(a).unwrap_err(), TreeError::VacantNode(a));
        assert_eq!(arena.free(a), Err(TreeError::VacantNode(a)));
        assert!(!arena.contains(a));
        assert!(arena.is_empty());
    }

    #[test]
    fn free_all_resets_numbering_and_invalidates_handles() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..5).map(|i| arena.allocate(i)).collect();
        let before = arena.arena_id();
        arena.free_all();
        assert!(arena.is_empty());
        assert_ne!(arena.arena_id(), before);
        for id in ids {
            assert_eq!(arena.get(id).unwrap_err(), TreeError::InvalidNode(id));
        }
        let fresh = arena.allocate(42);
        assert_eq!(fresh.seq_no(), 0);
        assert_eq!(arena.data(fresh), Ok(&42));
        assert_eq!(arena.iter().count(), 1);
    }

    #[test]
    fn every_generation_gets_a_new_id() {
        let mut arena = Arena::<u8>::new();
        for _ in 0..1000 {
            let before = arena.arena_id();
            let stale = arena.allocate(0);
            arena.free_all();
            assert_ne!(arena.arena_id(), before);
            assert!(!arena.contains(stale));
        }
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let mut a1 = Arena::new();
        let mut a2 = Arena::new();
        let x = a1.allocate('x');
        let _ = a2.allocate('y');
        assert_eq!(a2.get(x).unwrap_err(), TreeError::InvalidNode(x));
    }

    #[test]
    fn allocate_child_links_both_ways() {
        let mut arena = Arena::new();
        let b = arena.allocate('B');
        let a = arena.allocate_child('A', b, Side::Left).unwrap();
        let c = arena.allocate_child('C', b, Side::Right).unwrap();
        assert_eq!(arena.get(b).unwrap().left(), Some(a));
        assert_eq!(arena.get(b).unwrap().right(), Some(c));
        assert_eq!(arena.get(a).unwrap().parent(), Some(b));
        assert_eq!(arena.get(c).unwrap().parent(), Some(b));
        assert!(arena.is_parent_of(b, a));
        assert!(arena.is_parent_of(b, c));
        assert!(arena.is_left_child_of(a, b));
        assert!(arena.is_right_child_of(c, b));
        assert!(!arena.is_left_child_of(c, b));
        assert!(arena.is_child_of(a, b));
        assert_eq!(arena.side_of(a), Ok(Some(Side::Left)));
        assert_eq!(arena.side_of(b), Ok(None));
        assert_eq!(
            arena.allocate_child('D', b, Side::Left),
            Err(TreeError::SubtreeTruncation(Side::Left))
        );
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn free_unlinks_neighbours() {
        let mut arena = Arena::new();
        let b = arena.allocate('B');
        let a = arena.allocate_child('A', b, Side::Left).unwrap();
        let c = arena.allocate_child('C', a, Side::Right).unwrap();
        arena.free(a).unwrap();
        assert_eq!(arena.get(b).unwrap().left(), None);
        assert_eq!(arena.get(c).unwrap().parent(), None);
    }

    #[test]
    fn inconsistent_links_are_detected() {
        let mut arena = Arena::new();
        let p = arena.allocate(0);
        let c = arena.allocate(1);
        arena.set_parent(c, Some(p)).unwrap();
        assert_eq!(
            arena.side_of(c),
            Err(TreeError::Inconsistent { node: c, parent: p })
        );
    }
}
