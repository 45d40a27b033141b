//! A node of a `SpaceTree`.

use serde::{Deserialize, Serialize};

use crate::bound::Bound;

/// A node of a `SpaceTree`, stored in the tree's arena.
///
/// The node covers the points at positions `begin..begin + count` of the
/// tree's reordered point set. Children are addressed by their position in
/// the arena and always come after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The position of the first point of the node.
    pub(crate) begin: usize,
    /// The number of points in the node.
    pub(crate) count: usize,
    /// The depth of the node; the root has depth 0.
    pub(crate) depth: usize,
    /// The bound around the points of the node.
    pub(crate) bound: Bound,
    /// The arena positions of the two children, if the node was split.
    pub(crate) children: Option<(usize, usize)>,
}

impl Node {
    /// The position of the first point of the node.
    #[must_use]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    /// The number of points in the node.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// One past the position of the last point of the node.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.begin.saturating_add(self.count)
    }

    /// The positions of the points of the node.
    #[must_use]
    pub const fn positions(&self) -> core::ops::Range<usize> {
        self.begin..self.end()
    }

    /// The depth of the node; the root has depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The bound around the points of the node.
    #[must_use]
    pub const fn bound(&self) -> &Bound {
        &self.bound
    }

    /// The arena positions of the two children, if the node was split.
    #[must_use]
    pub const fn children(&self) -> Option<(usize, usize)> {
        self.children
    }

    /// Whether the node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Shifts the arena positions of the children by `offset`.
    pub(crate) fn shift_children(&mut self, offset: usize) {
        if let Some((l, r)) = &mut self.children {
            *l += offset;
            *r += offset;
        }
    }
}
