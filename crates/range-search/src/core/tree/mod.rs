//! The space-partitioning tree over a point set.

use crate::{
    bound::{BallBound, Bound},
    metric::{LpMetric, Metric},
    PointSet, RangeSearchError,
};

mod node;
mod tree_type;
mod validate;

pub use node::Node;
pub use tree_type::{BallSplit, KdSplit, SplitRule, TreeType, VpSplit};

/// Nodes with at least this many points build their children in parallel.
const PAR_CUTOFF: usize = 1_024;

/// A binary space-partitioning tree stored as an arena of `Node`s.
///
/// Building the tree reorders the points so that every node covers a
/// contiguous range of positions. The tree keeps the reordered points and
/// the permutation back to the caller's indices. Nodes are stored in
/// depth-first pre-order, so the root is at position 0 and every child comes
/// after its parent.
///
/// # Example
///
/// ```rust
/// use range_search::{metric::LpMetric, PointSet, SpaceTree, TreeType};
///
/// let rows = (0..100).map(|i| vec![f64::from(i), f64::from(i % 7)]).collect();
/// let data = PointSet::from_rows(rows).unwrap();
///
/// let tree = SpaceTree::new(data, 10, TreeType::Kd, LpMetric::Euclidean).unwrap();
/// assert_eq!(tree.root().count(), 100);
/// assert!(!tree.root().is_leaf());
/// assert!(tree.leaves().all(|leaf| leaf.count() <= 10));
///
/// // The permutation maps tree positions back to the original indices.
/// let mut original = tree.permutation().to_vec();
/// original.sort_unstable();
/// assert_eq!(original, (0..100).collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceTree {
    /// How nodes are bounded and partitioned.
    pub(crate) tree_type: TreeType,
    /// The metric under which bounds were built.
    pub(crate) metric: LpMetric,
    /// The most points a leaf may hold.
    pub(crate) leaf_size: usize,
    /// The points, in tree order.
    pub(crate) points: PointSet,
    /// `permutation[position]` is the caller's index of the point at `position`.
    pub(crate) permutation: Vec<usize>,
    /// The nodes, in depth-first pre-order.
    pub(crate) nodes: Vec<Node>,
}

impl SpaceTree {
    /// Builds a tree over `data`.
    ///
    /// # Errors
    ///
    /// * `InvalidLeafSize` if `leaf_size` is zero.
    pub fn new(data: PointSet, leaf_size: usize, tree_type: TreeType, metric: LpMetric) -> Result<Self, RangeSearchError> {
        Self::build(data, leaf_size, tree_type, metric, false)
    }

    /// Parallel version of [`SpaceTree::new`].
    ///
    /// Disjoint subtrees are built concurrently. The result is identical to
    /// the sequential build.
    ///
    /// # Errors
    ///
    /// See [`SpaceTree::new`].
    pub fn par_new(
        data: PointSet,
        leaf_size: usize,
        tree_type: TreeType,
        metric: LpMetric,
    ) -> Result<Self, RangeSearchError> {
        Self::build(data, leaf_size, tree_type, metric, true)
    }

    /// Dispatches the build to the split rule of `tree_type`.
    fn build(
        data: PointSet,
        leaf_size: usize,
        tree_type: TreeType,
        metric: LpMetric,
        parallel: bool,
    ) -> Result<Self, RangeSearchError> {
        if leaf_size == 0 {
            return Err(RangeSearchError::InvalidLeafSize(leaf_size));
        }

        let mut permutation = (0..data.cardinality()).collect::<Vec<_>>();
        let builder = Builder {
            data: &data,
            metric: &metric,
            leaf_size,
            parallel,
        };
        let nodes = match tree_type {
            TreeType::Kd => builder.subtree(&KdSplit, &mut permutation, 0, None),
            TreeType::Ball => builder.subtree(&BallSplit, &mut permutation, 0, None),
            TreeType::Vp => builder.subtree(&VpSplit, &mut permutation, 0, None),
        };
        let points = data.permuted(&permutation);

        ftlog::debug!(
            "Built {tree_type} tree with {} nodes over {} points (leaf size {leaf_size}, {metric})",
            nodes.len(),
            points.cardinality()
        );

        Ok(Self {
            tree_type,
            metric,
            leaf_size,
            points,
            permutation,
            nodes,
        })
    }

    /// The tree variant.
    #[must_use]
    pub const fn tree_type(&self) -> TreeType {
        self.tree_type
    }

    /// The metric under which the bounds were built.
    #[must_use]
    pub const fn metric(&self) -> LpMetric {
        self.metric
    }

    /// The most points a leaf may hold.
    #[must_use]
    pub const fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The points, in tree order.
    #[must_use]
    pub const fn points(&self) -> &PointSet {
        &self.points
    }

    /// The caller's index of the point at each tree position.
    #[must_use]
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// The caller's index of the point at `position`.
    #[must_use]
    pub fn original_index(&self, position: usize) -> usize {
        self.permutation[position]
    }

    /// The number of points in the tree.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.points.cardinality()
    }

    /// The number of coordinates of each point.
    #[must_use]
    pub const fn dimensionality(&self) -> usize {
        self.points.dimensionality()
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// The node at arena position `id`.
    #[must_use]
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// All nodes, in depth-first pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The leaves, from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// The depth of the deepest leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.leaves().map(Node::depth).max().unwrap_or_default()
    }

    /// The arena positions of the nodes that are leaves or sit at `depth`,
    /// from left to right.
    ///
    /// Their point ranges partition the whole set.
    #[must_use]
    pub fn frontier(&self, depth: usize) -> Vec<usize> {
        let mut frontier = Vec::new();
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            match node.children {
                Some((l, r)) if node.depth < depth => {
                    stack.push(r);
                    stack.push(l);
                }
                _ => frontier.push(id),
            }
        }
        frontier
    }

    /// The lower and upper distance bounds from `point` to the node `id`.
    #[must_use]
    pub fn range_to_point(&self, id: usize, point: &[f64]) -> (f64, f64) {
        self.nodes[id].bound.range_to_point(&self.metric, point)
    }
}

/// Shared state of a build.
struct Builder<'a, M: Metric> {
    /// The points in the caller's order.
    data: &'a PointSet,
    /// The metric for ball bounds and pole distances.
    metric: &'a M,
    /// The most points a leaf may hold.
    leaf_size: usize,
    /// Whether to build children concurrently.
    parallel: bool,
}

impl<M: Metric> Builder<'_, M> {
    /// Builds the subtree over `indices`, which sit at positions starting at
    /// `begin`, and returns its nodes with arena positions relative to the
    /// subtree root.
    ///
    /// `parent` is the bound of the parent node, or `None` at the root.
    fn subtree<S: SplitRule>(
        &self,
        rule: &S,
        indices: &mut [usize],
        begin: usize,
        parent: Option<(&Bound, usize)>,
    ) -> Vec<Node> {
        let count = indices.len();
        let depth = parent.map_or(0, |(_, d)| d + 1);
        let bound = self.nested_bound(rule, indices, parent.map(|(b, _)| b));

        if count <= self.leaf_size {
            return vec![Node {
                begin,
                count,
                depth,
                bound,
                children: None,
            }];
        }

        let split = rule
            .split(self.data, self.metric, &bound, indices)
            .filter(|&k| 0 < k && k < count)
            .unwrap_or(count / 2);
        let (left, right) = indices.split_at_mut(split);

        let parent = Some((&bound, depth));
        let (mut left, mut right) = if self.parallel && count >= PAR_CUTOFF {
            rayon::join(
                || self.subtree(rule, left, begin, parent),
                || self.subtree(rule, right, begin + split, parent),
            )
        } else {
            (
                self.subtree(rule, left, begin, parent),
                self.subtree(rule, right, begin + split, parent),
            )
        };

        let right_root = 1 + left.len();
        left.iter_mut().for_each(|n| n.shift_children(1));
        right.iter_mut().for_each(|n| n.shift_children(right_root));

        let mut nodes = Vec::with_capacity(1 + left.len() + right.len());
        nodes.push(Node {
            begin,
            count,
            depth,
            bound,
            children: Some((1, right_root)),
        });
        nodes.append(&mut left);
        nodes.append(&mut right);
        nodes
    }

    /// The bound of the points at `indices`, inside `parent`.
    ///
    /// A ball that pokes out of the parent ball is replaced by the ball
    /// around the parent's center over the same points, whose radius is at
    /// most the parent's.
    fn nested_bound<S: SplitRule>(&self, rule: &S, indices: &[usize], parent: Option<&Bound>) -> Bound {
        let bound = rule.bound(self.data, self.metric, indices);
        match parent {
            Some(Bound::Ball(outer)) => {
                let fits = matches!(&bound, Bound::Ball(inner) if inner.is_within(self.metric, outer, 0.0));
                if fits {
                    bound
                } else {
                    Bound::Ball(BallBound::around(self.data, self.metric, outer.center().to_vec(), indices))
                }
            }
            _ => bound,
        }
    }
}
