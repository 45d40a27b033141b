//! The tree variants and their split rules.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    bound::{BallBound, Bound, HRectBound},
    metric::Metric,
    PointSet, RangeSearchError,
};

/// Selects how a `SpaceTree` bounds and partitions its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeType {
    /// Hyper-rectangle bounds, split at the midpoint of the widest dimension.
    #[default]
    Kd,
    /// Ball bounds around the centroid, split between two far-apart poles.
    Ball,
    /// Ball bounds around a vantage point, split at the median distance to it.
    Vp,
}

impl TreeType {
    /// All the tree variants, in a stable order.
    pub const ALL: [Self; 3] = [Self::Kd, Self::Ball, Self::Vp];

    /// The name of the variant, as used in persisted models.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Kd => "kd",
            Self::Ball => "ball",
            Self::Vp => "vp",
        }
    }
}

impl core::fmt::Display for TreeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeType {
    type Err = RangeSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| RangeSearchError::UnrecognizedTreeVariant(s.to_string()))
    }
}

/// The capabilities a tree variant provides to the builder.
pub trait SplitRule: Send + Sync {
    /// The bound of a node holding the points at `indices`.
    fn bound<M: Metric>(&self, data: &PointSet, metric: &M, indices: &[usize]) -> Bound;

    /// Reorders `indices` so that the points of the first child come first,
    /// and returns how many there are.
    ///
    /// Returns `None` if the rule cannot separate the points. The builder then
    /// halves the node by position, and also does so when the returned split
    /// would leave a child empty.
    fn split<M: Metric>(&self, data: &PointSet, metric: &M, bound: &Bound, indices: &mut [usize]) -> Option<usize>;
}

/// Splits the widest dimension of a hyper-rectangle at its midpoint.
pub struct KdSplit;

impl SplitRule for KdSplit {
    fn bound<M: Metric>(&self, data: &PointSet, _: &M, indices: &[usize]) -> Bound {
        Bound::Rect(HRectBound::from_points(data, indices))
    }

    fn split<M: Metric>(&self, data: &PointSet, _: &M, bound: &Bound, indices: &mut [usize]) -> Option<usize> {
        let Bound::Rect(rect) = bound else {
            unreachable!("kd-tree nodes are bounded by rectangles")
        };
        let (dim, mid) = rect.widest_dimension();
        if rect.widths().nth(dim).unwrap_or_default() <= 0.0 {
            return None;
        }
        Some(crate::utils::partition_in_place(indices, |&i| data.get(i)[dim] < mid))
    }
}

/// Assigns each point to the nearer of two poles.
///
/// The first pole is the point farthest from the centroid and the second is
/// the point farthest from the first.
pub struct BallSplit;

impl SplitRule for BallSplit {
    fn bound<M: Metric>(&self, data: &PointSet, metric: &M, indices: &[usize]) -> Bound {
        Bound::Ball(BallBound::around(data, metric, data.centroid(indices), indices))
    }

    fn split<M: Metric>(&self, data: &PointSet, metric: &M, bound: &Bound, indices: &mut [usize]) -> Option<usize> {
        let Bound::Ball(ball) = bound else {
            unreachable!("ball-tree nodes are bounded by balls")
        };
        let (left_pole, _) = crate::utils::arg_max(data.query_to_many(metric, ball.center(), indices))?;
        let left = data.get(left_pole);
        let (right_pole, separation) = crate::utils::arg_max(data.query_to_many(metric, left, indices))?;
        if separation <= 0.0 {
            return None;
        }
        let right = data.get(right_pole);
        Some(crate::utils::partition_in_place(indices, |&i| {
            let p = data.get(i);
            metric.distance(left, p) <= metric.distance(right, p)
        }))
    }
}

/// Splits at the median distance to a vantage point.
///
/// The vantage point is the point farthest from the centroid. It is the
/// center of the node's ball bound unless that ball would not fit inside the
/// parent's, in which case the split measures from the parent's center.
pub struct VpSplit;

impl SplitRule for VpSplit {
    fn bound<M: Metric>(&self, data: &PointSet, metric: &M, indices: &[usize]) -> Bound {
        let centroid = data.centroid(indices);
        let vantage = crate::utils::arg_max(data.query_to_many(metric, &centroid, indices))
            .map_or(centroid, |(i, _)| data.get(i).to_vec());
        Bound::Ball(BallBound::around(data, metric, vantage, indices))
    }

    fn split<M: Metric>(&self, data: &PointSet, metric: &M, bound: &Bound, indices: &mut [usize]) -> Option<usize> {
        let Bound::Ball(ball) = bound else {
            unreachable!("vp-tree nodes are bounded by balls")
        };
        let mut distances = data.query_to_many(metric, ball.center(), indices).collect::<Vec<_>>();
        distances.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        for (slot, (i, _)) in indices.iter_mut().zip(distances) {
            *slot = i;
        }
        Some(indices.len() / 2)
    }
}

#[cfg(test)]
mod tests {
    use crate::{bound::Bound, metric::Euclidean, PointSet};

    use super::{BallSplit, KdSplit, SplitRule, TreeType, VpSplit};

    fn line() -> PointSet {
        PointSet::from_rows((0..10).map(|i| vec![f64::from(i), 0.0]).collect()).unwrap()
    }

    #[test]
    fn names() {
        for t in TreeType::ALL {
            assert_eq!(t.name().parse::<TreeType>().unwrap(), t);
        }
        assert!("octree".parse::<TreeType>().is_err());
    }

    #[test]
    fn kd_split_at_midpoint() {
        let data = line();
        let mut indices = (0..10).rev().collect::<Vec<_>>();
        let bound = KdSplit.bound(&data, &Euclidean, &indices);
        let k = KdSplit.split(&data, &Euclidean, &bound, &mut indices).unwrap();
        assert_eq!(k, 5);
        assert!(indices[..k].iter().all(|&i| i < 5));
        assert!(indices[k..].iter().all(|&i| i >= 5));
    }

    #[test]
    fn ball_split_between_poles() {
        let data = line();
        let mut indices = (0..10).collect::<Vec<_>>();
        let bound = BallSplit.bound(&data, &Euclidean, &indices);
        assert!(matches!(&bound, Bound::Ball(b) if b.radius() == 4.5));
        let k = BallSplit.split(&data, &Euclidean, &bound, &mut indices).unwrap();
        assert_eq!(k, 5);
        let mut left = indices[..k].to_vec();
        left.sort_unstable();
        assert!(left == vec![0, 1, 2, 3, 4] || left == vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn vp_split_at_median() {
        let data = line();
        let mut indices = (0..10).collect::<Vec<_>>();
        let bound = VpSplit.bound(&data, &Euclidean, &indices);
        let Bound::Ball(ball) = &bound else { unreachable!() };
        assert_eq!(ball.radius(), 9.0);
        let k = VpSplit.split(&data, &Euclidean, &bound, &mut indices).unwrap();
        assert_eq!(k, 5);
    }

    #[test]
    fn coincident_points_cannot_split() {
        let data = PointSet::from_rows(vec![vec![1.0, 1.0]; 4]).unwrap();
        let mut indices = (0..4).collect::<Vec<_>>();
        let bound = KdSplit.bound(&data, &Euclidean, &indices);
        assert!(KdSplit.split(&data, &Euclidean, &bound, &mut indices).is_none());
        let bound = BallSplit.bound(&data, &Euclidean, &indices);
        assert!(BallSplit.split(&data, &Euclidean, &bound, &mut indices).is_none());
    }
}
