//! Checks of the tree invariants, used when a tree is restored from bytes.

use crate::{bound::Bound, RangeSearchError};

use super::{SpaceTree, TreeType};

/// Relative tolerance for points lying on the surface of their bound.
const CONTAINMENT_TOLERANCE: f64 = 1e-9;

/// Shorthand for a `CorruptModelState` error.
fn corrupt(msg: String) -> RangeSearchError {
    RangeSearchError::CorruptModelState(msg)
}

impl SpaceTree {
    /// Checks every structural invariant of the tree.
    ///
    /// A valid tree has a root covering every point, children that partition
    /// their parent's range and come after it in the arena, leaves no larger
    /// than the leaf size, and bounds that contain their points and nest
    /// inside their parent's bound.
    ///
    /// # Errors
    ///
    /// * `CorruptModelState` naming the first violated invariant.
    pub fn validate(&self) -> Result<(), RangeSearchError> {
        let dim = self.points.dimensionality();
        if dim == 0 || self.points.as_flat().is_empty() || self.points.as_flat().len() % dim != 0 {
            return Err(corrupt(format!(
                "{} coordinates do not form points of dimensionality {dim}",
                self.points.as_flat().len()
            )));
        }
        if let Some(i) = self.points.as_flat().iter().position(|x| !x.is_finite()) {
            return Err(corrupt(format!("point at position {} has a non-finite coordinate", i / dim)));
        }
        let n = self.points.cardinality();

        if self.leaf_size == 0 {
            return Err(corrupt("leaf size is zero".to_string()));
        }

        if self.permutation.len() != n {
            return Err(corrupt(format!("permutation has {} entries for {n} points", self.permutation.len())));
        }
        let mut seen = vec![false; n];
        for &i in &self.permutation {
            if i >= n || seen[i] {
                return Err(corrupt(format!("permutation repeats or overflows at index {i}")));
            }
            seen[i] = true;
        }

        let root = self.nodes.first().ok_or_else(|| corrupt("tree has no nodes".to_string()))?;
        if root.begin != 0 || root.count != n || root.depth != 0 {
            return Err(corrupt(format!(
                "root covers {:?} at depth {} instead of 0..{n}",
                root.positions(),
                root.depth
            )));
        }

        let mut parents = vec![0_usize; self.nodes.len()];
        for (id, node) in self.nodes.iter().enumerate() {
            if node.count == 0 || node.end() > n {
                return Err(corrupt(format!("node {id} covers {:?} of {n} points", node.positions())));
            }
            if node.bound.dimensionality() != dim {
                return Err(corrupt(format!("node {id} has a bound of the wrong dimensionality")));
            }
            if matches!(node.bound, Bound::Rect(_)) != (self.tree_type == TreeType::Kd) {
                return Err(corrupt(format!("node {id} has the wrong kind of bound for a {} tree", self.tree_type)));
            }

            match node.children {
                Some((l, r)) => {
                    if l <= id || r <= id || l >= self.nodes.len() || r >= self.nodes.len() || l == r {
                        return Err(corrupt(format!("node {id} has invalid children ({l}, {r})")));
                    }
                    parents[l] += 1;
                    parents[r] += 1;

                    let (left, right) = (&self.nodes[l], &self.nodes[r]);
                    if left.begin != node.begin || left.end() != right.begin || right.end() != node.end() {
                        return Err(corrupt(format!("children of node {id} do not partition its points")));
                    }
                    if left.depth != node.depth + 1 || right.depth != node.depth + 1 {
                        return Err(corrupt(format!("children of node {id} have inconsistent depths")));
                    }
                    let pokes_out = |c: usize| {
                        !self.nodes[c]
                            .bound
                            .is_within(&self.metric, &node.bound, CONTAINMENT_TOLERANCE)
                    };
                    if let Some(c) = [l, r].into_iter().find(|&c| pokes_out(c)) {
                        return Err(corrupt(format!("bound of node {c} pokes out of the bound of its parent {id}")));
                    }
                }
                None => {
                    if node.count > self.leaf_size {
                        return Err(corrupt(format!(
                            "leaf {id} holds {} points, more than the leaf size {}",
                            node.count, self.leaf_size
                        )));
                    }
                }
            }

            if let Some(p) = node
                .positions()
                .find(|&p| !node.bound.contains(&self.metric, self.points.get(p), CONTAINMENT_TOLERANCE))
            {
                return Err(corrupt(format!("point at position {p} lies outside the bound of node {id}")));
            }
        }

        if let Some(id) = parents.iter().skip(1).position(|&c| c != 1) {
            return Err(corrupt(format!("node {} is not the child of exactly one node", id + 1)));
        }

        Ok(())
    }
}
