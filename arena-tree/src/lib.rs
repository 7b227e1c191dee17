//! # Arena Tree
//!
//! An arena-backed binary tree with a construction cursor.
//!
//! Nodes live in an [`Arena`] and are addressed by copyable [`NodeId`]
//! handles; a [`Tree`] is only a root handle plus a *current* cursor. Edits
//! are expressed relative to the cursor: splice a new node above or below
//! it, or delete it while preserving one of its subtrees. Conditional walks
//! move the cursor up or down while node priorities satisfy a [`Bound`],
//! which is what an operator-precedence parser needs to find the node a new
//! operator must attach to.
//!
//! ## Example
//! ```rust
//! # use arena_tree::{Arena, Bound, Prioritized, Side, Tree};
//! struct Op(u8);
//! impl Prioritized for Op {
//!     fn priority(&self) -> u8 { self.0 }
//! }
//!
//! let mut arena = Arena::new();
//! let root = arena.allocate(Op(7));
//! let mut tree = Tree::new(&mut arena, root).unwrap();
//!
//! let plus = arena.allocate(Op(6));
//! tree.splice_below(&mut arena, plus, Side::Right, true, true).unwrap();
//! tree.step_down_right(&arena).unwrap();
//! let one = arena.allocate(Op(0));
//! tree.splice_below(&mut arena, one, Side::Right, true, true).unwrap();
//! tree.step_down_right(&arena).unwrap();
//!
//! // climb past everything binding at least as tightly as '+'
//! let found = tree.search_up(&arena, Bound::AtMost(6), false).unwrap();
//! assert_eq!(found, Some(root));
//! ```
//!
//! ## License
//!
//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

mod arena;
mod display;
mod error;
mod node;
mod tree;

pub use arena::{Arena, ArenaID, ArenaStats, NodeId};
pub use display::{INDENT_STEP, ROOT_MARGIN, TreeDisplay};
pub use error::TreeError;
pub use node::{Node, Side};
pub use tree::{Bound, Prioritized, Tree};
