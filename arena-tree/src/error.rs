//! Defines [`TreeError`], the unified error type for arena and tree operations.
//!
//! Provides descriptive error variants for stale or foreign node handles,
//! refused structural edits, and parent/child link inconsistencies.

use crate::{NodeId, Side};
use thiserror::Error;

/// Represents all possible errors that can occur while allocating, resolving,
/// or restructuring nodes.
///
/// A step along an absent link is not an error: navigation simply reports
/// that the cursor did not move. Errors are reserved for handles that do not
/// resolve and for edits that would break the tree's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The handle was issued by another arena, or by a generation of this
    /// arena that has since been released with `free_all`.
    #[error("invalid node {0}")]
    InvalidNode(NodeId),

    /// The handle belongs to this arena but its slot has been freed.
    #[error("vacant node {0}")]
    VacantNode(NodeId),

    /// The root may be replaced through a splice-above, never deleted in place.
    #[error("root node cannot be deleted")]
    RootDeletion,

    /// The edit would silently discard a subtree already hanging off the given side.
    #[error("edit would truncate the {0} subtree")]
    SubtreeTruncation(Side),

    /// A node's parent link and the parent's child links disagree.
    #[error("inconsistent links: {parent} does not hold {node} as a child")]
    Inconsistent {
        /// The node whose side was queried.
        node: NodeId,
        /// The parent it claims to have.
        parent: NodeId,
    },
}
