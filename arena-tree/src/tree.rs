//! Defines [`Tree`], a cursor-based overlay over nodes stored in an [`Arena`].
//!
//! A tree is just a root handle and a *current* cursor handle; all storage
//! lives in the arena, which is passed to every operation. Besides one-link
//! navigation the tree offers conditional walks driven by a [`Bound`] on node
//! priorities, and structural edits that splice new nodes above or below the
//! cursor or delete the cursor while preserving one of its subtrees.
//!
//! Every edit keeps the following invariants:
//! - a non-root node's parent link and the parent's child link agree,
//! - the root has no parent,
//! - the cursor references a live node of this tree.

use crate::{Arena, Node, NodeId, Side, TreeError};

/// A payload that carries a binding priority. Lower values bind tighter.
pub trait Prioritized {
    fn priority(&self) -> u8;
}

/// Comparison policy for conditional walks.
///
/// A walk keeps moving while the priority of the node under the cursor is
/// *admitted* by the bound.
///
/// | Variant | Continues while |
/// |---------|-----------------|
/// | [`Bound::Below`]  | `priority <  p` |
/// | [`Bound::AtMost`] | `priority <= p` |
///
/// Climbing with [`Bound::AtMost`] pops equal-priority ancestors first, which
/// groups operators to the left; [`Bound::Below`] stops on them, which groups
/// to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Below(u8),
    AtMost(u8),
}

impl Bound {
    /// Returns `true` if a walk may move past a node with this priority.
    #[inline]
    pub fn admits(self, priority: u8) -> bool {
        match self {
            Bound::Below(p) => priority < p,
            Bound::AtMost(p) => priority <= p,
        }
    }
}

/// A binary tree described by its root and a construction cursor.
///
/// `Tree` does not own nodes; it must always be used with the arena its
/// nodes were allocated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tree {
    root: NodeId,
    cursor: NodeId,
}

impl Tree {
    /// Creates a tree rooted at `root` with the cursor on the root.
    ///
    /// If `root` was hanging from another node it is detached first.
    pub fn new<T>(arena: &mut Arena<T>, root: NodeId) -> Result<Self, TreeError> {
        detach_from_parent(arena, root)?;
        Ok(Self { root, cursor: root })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node under the cursor.
    #[inline]
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    #[inline]
    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// Makes `id` both the root and the cursor, detaching it from its parent.
    pub fn set_root_and_cursor<T>(
        &mut self,
        arena: &mut Arena<T>,
        id: NodeId,
    ) -> Result<(), TreeError> {
        detach_from_parent(arena, id)?;
        self.root = id;
        self.cursor = id;
        Ok(())
    }

    /// Moves the cursor to the root.
    #[inline]
    pub fn top(&mut self) -> NodeId {
        self.cursor = self.root;
        self.cursor
    }

    /// Moves the cursor to its left child. Returns `None` without moving if
    /// there is none.
    pub fn step_down_left<T>(&mut self, arena: &Arena<T>) -> Result<Option<NodeId>, TreeError> {
        self.step(arena, Node::left)
    }

    /// Moves the cursor to its right child. Returns `None` without moving if
    /// there is none.
    pub fn step_down_right<T>(&mut self, arena: &Arena<T>) -> Result<Option<NodeId>, TreeError> {
        self.step(arena, Node::right)
    }

    /// Moves the cursor to its parent. Returns `None` without moving at the root.
    pub fn step_up<T>(&mut self, arena: &Arena<T>) -> Result<Option<NodeId>, TreeError> {
        self.step(arena, Node::parent)
    }

    fn step<T>(
        &mut self,
        arena: &Arena<T>,
        link: fn(&Node<T>) -> Option<NodeId>,
    ) -> Result<Option<NodeId>, TreeError> {
        let next = link(arena.get(self.cursor)?);
        if let Some(next) = next {
            self.cursor = next;
        }
        Ok(next)
    }

    /// Climbs from the cursor while each visited node's priority is admitted
    /// by `bound`.
    ///
    /// The cursor stops on the first node the bound does not admit and that
    /// node is returned. If every node up to and including the root is
    /// admitted, the walk found nothing: with `no_move_if_not_found` the
    /// cursor stays where it was and `None` is returned, otherwise the cursor
    /// stops on the root.
    pub fn search_up<T: Prioritized>(
        &mut self,
        arena: &Arena<T>,
        bound: Bound,
        no_move_if_not_found: bool,
    ) -> Result<Option<NodeId>, TreeError> {
        self.search(arena, bound, no_move_if_not_found, Node::parent)
    }

    /// Descends along `side` links from the cursor while each visited node's
    /// priority is admitted by `bound`. Mirrors [`Tree::search_up`], with the
    /// last node on the path playing the role of the root.
    pub fn search_down<T: Prioritized>(
        &mut self,
        arena: &Arena<T>,
        side: Side,
        bound: Bound,
        no_move_if_not_found: bool,
    ) -> Result<Option<NodeId>, TreeError> {
        let link = match side {
            Side::Left => Node::left,
            Side::Right => Node::right,
        };
        self.search(arena, bound, no_move_if_not_found, link)
    }

    fn search<T: Prioritized>(
        &mut self,
        arena: &Arena<T>,
        bound: Bound,
        no_move_if_not_found: bool,
        link: fn(&Node<T>) -> Option<NodeId>,
    ) -> Result<Option<NodeId>, TreeError> {
        let mut last = self.cursor;
        let mut next = Some(self.cursor);
        while let Some(id) = next {
            let node = arena.get(id)?;
            if !bound.admits(node.data.priority()) {
                break;
            }
            last = id;
            next = link(node);
        }
        match next {
            Some(found) => {
                self.cursor = found;
                Ok(Some(found))
            }
            None if no_move_if_not_found => Ok(None),
            None => {
                self.cursor = last;
                Ok(Some(last))
            }
        }
    }

    /// Follows `side` links from the cursor as far as they go.
    pub fn go_down_most<T>(&mut self, arena: &Arena<T>, side: Side) -> Result<NodeId, TreeError> {
        while let Some(next) = arena.get(self.cursor)?.child(side) {
            self.cursor = next;
        }
        Ok(self.cursor)
    }

    /// Descends from the cursor preferring `side` links and falling back to
    /// the other side, until a leaf is reached.
    pub fn go_down_leaf<T>(&mut self, arena: &Arena<T>, side: Side) -> Result<NodeId, TreeError> {
        loop {
            let node = arena.get(self.cursor)?;
            match node.child(side).or(node.child(side.opposite())) {
                Some(next) => self.cursor = next,
                None => return Ok(self.cursor),
            }
        }
    }

    /// Wraps the whole tree under `new_root` on the given side.
    ///
    /// The old root becomes the `side` child of `new_root`, which becomes
    /// both the root and the cursor.
    pub fn make_half_tree<T>(
        &mut self,
        arena: &mut Arena<T>,
        new_root: NodeId,
        side: Side,
    ) -> Result<(), TreeError> {
        orphan_child(arena, new_root, side)?;
        arena.set_parent(self.root, Some(new_root))?;
        arena.set_child(new_root, side, Some(self.root))?;
        arena.set_parent(new_root, None)?;
        self.root = new_root;
        self.cursor = new_root;
        Ok(())
    }

    /// Inserts `new_node` between the cursor and its parent, with the cursor
    /// hanging on the `side` link of `new_node`.
    ///
    /// If the cursor is the root, the tree is wrapped with
    /// [`make_half_tree`](Tree::make_half_tree) and the cursor moves to the
    /// new root; otherwise the cursor stays where it is. With
    /// `truncation_check`, the edit is refused if `new_node` already has a
    /// subtree on `side`.
    pub fn splice_above<T>(
        &mut self,
        arena: &mut Arena<T>,
        new_node: NodeId,
        side: Side,
        truncation_check: bool,
    ) -> Result<(), TreeError> {
        if truncation_check && arena.get(new_node)?.child(side).is_some() {
            return Err(TreeError::SubtreeTruncation(side));
        }
        let Some(slot) = arena.side_of(self.cursor)? else {
            return self.make_half_tree(arena, new_node, side);
        };
        let parent = arena.get(self.cursor)?.parent;
        if let Some(parent) = parent {
            orphan_child(arena, new_node, side)?;
            arena.set_child(parent, slot, Some(new_node))?;
            arena.set_parent(new_node, Some(parent))?;
            arena.set_child(new_node, side, Some(self.cursor))?;
            arena.set_parent(self.cursor, Some(new_node))?;
        }
        Ok(())
    }

    /// Inserts `new_node` as the `side` child of the cursor.
    ///
    /// The subtree previously hanging on that side is re-attached to
    /// `new_node` on the same side, or on the opposite side when `swap` is
    /// set. The cursor does not move. With `truncation_check`, the edit is
    /// refused if `new_node` already has a subtree where the displaced one
    /// would go.
    pub fn splice_below<T>(
        &mut self,
        arena: &mut Arena<T>,
        new_node: NodeId,
        side: Side,
        swap: bool,
        truncation_check: bool,
    ) -> Result<(), TreeError> {
        let target = if swap { side.opposite() } else { side };
        if truncation_check && arena.get(new_node)?.child(target).is_some() {
            return Err(TreeError::SubtreeTruncation(target));
        }
        orphan_child(arena, new_node, target)?;
        let displaced = arena.get(self.cursor)?.child(side);
        arena.set_child(self.cursor, side, Some(new_node))?;
        arena.set_parent(new_node, Some(self.cursor))?;
        arena.set_child(new_node, target, displaced)?;
        if let Some(displaced) = displaced {
            arena.set_parent(displaced, Some(new_node))?;
        }
        Ok(())
    }

    /// Deletes the cursor node, hanging its `side` subtree in the slot the
    /// cursor occupied in its parent, and returns the deleted payload.
    ///
    /// The subtree on the other side is detached and left orphaned in the
    /// arena. The cursor moves to the preserved child, or to the former
    /// parent if there is none or `move_to_parent` is set.
    ///
    /// # Errors
    /// Deleting the root is refused with [`TreeError::RootDeletion`].
    pub fn delete_preserving<T>(
        &mut self,
        arena: &mut Arena<T>,
        side: Side,
        move_to_parent: bool,
    ) -> Result<T, TreeError> {
        let doomed = self.cursor;
        let Some(slot) = arena.side_of(doomed)? else {
            return Err(TreeError::RootDeletion);
        };
        let (parent, preserved) = {
            let node = arena.get(doomed)?;
            (node.parent, node.child(side))
        };
        let Some(parent) = parent else {
            return Err(TreeError::RootDeletion);
        };
        arena.set_child(parent, slot, preserved)?;
        arena.set_child(doomed, side, None)?;
        arena.set_parent(doomed, None)?;
        if let Some(preserved) = preserved {
            arena.set_parent(preserved, Some(parent))?;
        }
        self.cursor = match preserved {
            Some(preserved) if !move_to_parent => preserved,
            _ => parent,
        };
        arena.free(doomed)
    }

    /// Returns the handles of all nodes reachable from the root, children
    /// before parents (left subtree, right subtree, node).
    ///
    /// The walk uses an explicit stack, so depth is bounded only by memory.
    pub fn post_order<T>(&self, arena: &Arena<T>) -> Result<Vec<NodeId>, TreeError> {
        let mut order = Vec::new();
        let mut stack = vec![(self.root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            let node = arena.get(id)?;
            stack.push((id, true));
            if let Some(right) = node.right {
                stack.push((right, false));
            }
            if let Some(left) = node.left {
                stack.push((left, false));
            }
        }
        Ok(order)
    }

    /// Frees every node reachable from the root and returns how many were freed.
    pub fn release<T>(self, arena: &mut Arena<T>) -> Result<usize, TreeError> {
        let order = self.post_order(arena)?;
        for &id in &order {
            arena.free(id)?;
        }
        Ok(order.len())
    }
}

/// Unlinks `id` from its parent, if any, in both link directions.
fn detach_from_parent<T>(arena: &mut Arena<T>, id: NodeId) -> Result<(), TreeError> {
    if let Some(slot) = arena.side_of(id)? {
        if let Some(parent) = arena.get(id)?.parent {
            arena.set_child(parent, slot, None)?;
        }
    }
    arena.set_parent(id, None)
}

/// Detaches whatever hangs on the `side` link of `id`, leaving it orphaned.
fn orphan_child<T>(arena: &mut Arena<T>, id: NodeId, side: Side) -> Result<(), TreeError> {
    if let Some(child) = arena.get(id)?.child(side) {
        arena.set_parent(child, None)?;
        arena.set_child(id, side, None)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Prioritized for u8 {
        fn priority(&self) -> u8 {
            *self
        }
    }

    /// Checks the link invariants over every node reachable from the root.
    fn assert_consistent(arena: &Arena<u8>, tree: &Tree) {
        assert_eq!(arena.get(tree.root()).unwrap().parent(), None);
        assert!(arena.contains(tree.cursor()));
        for id in tree.post_order(arena).unwrap() {
            let node = arena.get(id).unwrap();
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert!(arena.is_parent_of(id, child), "{id} / {child}");
            }
            if id != tree.root() {
                assert!(arena.side_of(id).unwrap().is_some());
            }
        }
    }

    /// Builds `0 <- 1 -> 2` with the cursor on the root.
    fn small_tree(arena: &mut Arena<u8>) -> (Tree, NodeId, NodeId, NodeId) {
        let b = arena.allocate(1);
        let a = arena.allocate(0);
        let c = arena.allocate(2);
        let mut tree = Tree::new(arena, b).unwrap();
        tree.splice_below(arena, a, Side::Left, false, false).unwrap();
        tree.splice_below(arena, c, Side::Right, false, false).unwrap();
        (tree, a, b, c)
    }

    #[test]
    fn splice_below_builds_children() {
        let _ = env_logger::builder().is_test(true).try_init();
        let arena = &mut Arena::<u8>::new();
        let (tree, a, b, c) = small_tree(arena);
        assert_eq!(arena.get(b).unwrap().left(), Some(a));
        assert_eq!(arena.get(b).unwrap().right(), Some(c));
        assert!(arena.is_left_child_of(a, b));
        assert!(arena.is_right_child_of(c, b));
        assert_eq!(tree.cursor(), b);
        assert_consistent(arena, &tree);
    }

    #[test]
    fn stepping_reports_missing_links() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, a, b, c) = small_tree(arena);
        assert_eq!(tree.step_up(arena).unwrap(), None);
        assert_eq!(tree.step_down_left(arena).unwrap(), Some(a));
        assert_eq!(tree.step_down_left(arena).unwrap(), None);
        assert_eq!(tree.cursor(), a);
        assert_eq!(tree.step_up(arena).unwrap(), Some(b));
        assert_eq!(tree.step_down_right(arena).unwrap(), Some(c));
        assert_eq!(tree.top(), b);
    }

    #[test]
    fn splice_below_with_swap_adopts_displaced_on_opposite_side() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, _a, b, c) = small_tree(arena);
        let n = arena.allocate(5);
        tree.splice_below(arena, n, Side::Right, true, true).unwrap();
        assert_eq!(arena.get(b).unwrap().right(), Some(n));
        assert_eq!(arena.get(n).unwrap().left(), Some(c));
        assert_eq!(arena.get(n).unwrap().right(), None);
        assert_consistent(arena, &tree);
    }

    #[test]
    fn splice_below_truncation_check() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, _a, _b, _c) = small_tree(arena);
        let n = arena.allocate(5);
        let m = arena.allocate_child(6, n, Side::Left).unwrap();
        assert_eq!(
            tree.splice_below(arena, n, Side::Right, true, true),
            Err(TreeError::SubtreeTruncation(Side::Left))
        );
        assert_eq!(arena.get(m).unwrap().parent(), Some(n));
        assert_consistent(arena, &tree);
    }

    #[test]
    fn splice_above_root_wraps_tree() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, _a, b, _c) = small_tree(arena);
        let n = arena.allocate(9);
        tree.splice_above(arena, n, Side::Left, true).unwrap();
        assert_eq!(tree.root(), n);
        assert_eq!(tree.cursor(), n);
        assert!(arena.is_left_child_of(b, n));
        assert_consistent(arena, &tree);
    }

    #[test]
    fn splice_above_inner_node_keeps_cursor() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, _a, b, c) = small_tree(arena);
        tree.step_down_right(arena).unwrap();
        let n = arena.allocate(9);
        tree.splice_above(arena, n, Side::Left, false).unwrap();
        assert_eq!(tree.cursor(), c);
        assert!(arena.is_right_child_of(n, b));
        assert!(arena.is_left_child_of(c, n));
        assert_consistent(arena, &tree);

        let m = arena.allocate(8);
        arena.allocate_child(7, m, Side::Right).unwrap();
        assert_eq!(
            tree.splice_above(arena, m, Side::Right, true),
            Err(TreeError::SubtreeTruncation(Side::Right))
        );
    }

    #[test]
    fn search_up_stops_on_first_unadmitted_node() {
        let arena = &mut Arena::<u8>::new();
        let root = arena.allocate(7);
        let mut tree = Tree::new(arena, root).unwrap();
        let mid = arena.allocate_child(4, root, Side::Right).unwrap();
        let leaf = arena.allocate_child(0, mid, Side::Right).unwrap();
        tree.go_down_most(arena, Side::Right).unwrap();
        assert_eq!(tree.cursor(), leaf);

        assert_eq!(tree.search_up(arena, Bound::AtMost(4), false).unwrap(), Some(root));
        assert_eq!(tree.cursor(), root);

        tree.go_down_most(arena, Side::Right).unwrap();
        assert_eq!(tree.search_up(arena, Bound::Below(4), false).unwrap(), Some(mid));
    }

    #[test]
    fn search_up_without_match() {
        let arena = &mut Arena::<u8>::new();
        let root = arena.allocate(3);
        let mut tree = Tree::new(arena, root).unwrap();
        let leaf = arena.allocate_child(1, root, Side::Left).unwrap();
        tree.step_down_left(arena).unwrap();

        assert_eq!(tree.search_up(arena, Bound::AtMost(9), true).unwrap(), None);
        assert_eq!(tree.cursor(), leaf);
        assert_eq!(tree.search_up(arena, Bound::AtMost(9), false).unwrap(), Some(root));
        assert_eq!(tree.cursor(), root);
    }

    #[test]
    fn search_down_mirrors_search_up() {
        let arena = &mut Arena::<u8>::new();
        let root = arena.allocate(0);
        let mut tree = Tree::new(arena, root).unwrap();
        let l1 = arena.allocate_child(1, root, Side::Left).unwrap();
        let l2 = arena.allocate_child(5, l1, Side::Left).unwrap();
        assert_eq!(
            tree.search_down(arena, Side::Left, Bound::Below(2), false).unwrap(),
            Some(l2)
        );
        tree.top();
        assert_eq!(
            tree.search_down(arena, Side::Left, Bound::AtMost(9), true).unwrap(),
            None
        );
        assert_eq!(tree.cursor(), root);
        assert_eq!(
            tree.search_down(arena, Side::Left, Bound::AtMost(9), false).unwrap(),
            Some(l2)
        );
    }

    #[test]
    fn delete_preserving_right_moves_to_parent() {
        let arena = &mut Arena::<u8>::new();
        let root = arena.allocate(7);
        let mut tree = Tree::new(arena, root).unwrap();
        let paren = arena.allocate_child(7, root, Side::Right).unwrap();
        let inner = arena.allocate_child(6, paren, Side::Right).unwrap();
        let lost = arena.allocate_child(0, paren, Side::Left).unwrap();
        tree.step_down_right(arena).unwrap();

        assert_eq!(tree.delete_preserving(arena, Side::Right, true), Ok(7));
        assert_eq!(tree.cursor(), root);
        assert!(arena.is_right_child_of(inner, root));
        assert!(!arena.contains(paren));
        assert_eq!(arena.get(lost).unwrap().parent(), None);
        assert_consistent(arena, &tree);
    }

    #[test]
    fn delete_preserving_left_moves_to_preserved_child() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, a, b, _c) = small_tree(arena);
        tree.step_down_left(arena).unwrap();
        let x = arena.allocate_child(3, a, Side::Left).unwrap();
        assert_eq!(tree.delete_preserving(arena, Side::Left, false), Ok(0));
        assert_eq!(tree.cursor(), x);
        assert!(arena.is_left_child_of(x, b));
        assert_consistent(arena, &tree);
    }

    #[test]
    fn root_is_never_deleted() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, _a, b, _c) = small_tree(arena);
        assert_eq!(
            tree.delete_preserving(arena, Side::Right, true),
            Err(TreeError::RootDeletion)
        );
        assert!(arena.contains(b));
    }

    #[test]
    fn extreme_walks() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, a, _b, c) = small_tree(arena);
        let d = arena.allocate_child(4, a, Side::Right).unwrap();
        assert_eq!(tree.go_down_most(arena, Side::Left).unwrap(), a);
        tree.top();
        assert_eq!(tree.go_down_leaf(arena, Side::Left).unwrap(), d);
        tree.top();
        assert_eq!(tree.go_down_leaf(arena, Side::Right).unwrap(), c);
    }

    #[test]
    fn post_order_and_release() {
        let arena = &mut Arena::<u8>::new();
        let (tree, a, b, c) = small_tree(arena);
        let stray = arena.allocate(9);
        assert_eq!(tree.post_order(arena).unwrap(), vec![a, c, b]);
        assert_eq!(tree.release(arena), Ok(3));
        assert_eq!(arena.len(), 1);
        assert!(arena.contains(stray));
    }

    #[test]
    fn set_root_detaches_from_parent() {
        let arena = &mut Arena::<u8>::new();
        let (mut tree, _a, b, c) = small_tree(arena);
        tree.set_root_and_cursor(arena, c).unwrap();
        assert_eq!(arena.get(b).unwrap().right(), None);
        assert_eq!(tree.root(), c);
        assert_consistent(arena, &tree);
    }
}
