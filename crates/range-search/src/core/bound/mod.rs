//! Geometric bounds of tree nodes and the distance oracle over them.
//!
//! Every bound summarizes the points of one node. For any point `p` inside
//! bound `A` and any point `q` inside bound `B`, the oracle guarantees
//!
//! `A.range_to_bound(B).0 <= d(p, q) <= A.range_to_bound(B).1`
//!
//! and likewise for a bare query point. The bounds are only used to skip
//! work; reported distances are always exact point-to-point distances.

use serde::{Deserialize, Serialize};

use crate::metric::Metric;

mod ball;
mod hrect;

pub use ball::BallBound;
pub use hrect::HRectBound;

/// The bound of a tree node.
///
/// kd-trees use axis-aligned hyper-rectangles; ball trees and vantage-point
/// trees use balls. The oracle methods work across both kinds, so query and
/// reference trees of different variants may be traversed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// An axis-aligned hyper-rectangle.
    Rect(HRectBound),
    /// A ball around a center.
    Ball(BallBound),
}

impl Bound {
    /// The lower and upper bounds on the distance from `point` to any point
    /// inside this bound.
    #[must_use]
    pub fn range_to_point<M: Metric>(&self, metric: &M, point: &[f64]) -> (f64, f64) {
        match self {
            Self::Rect(r) => (r.min_to_point(metric, point), r.max_to_point(metric, point)),
            Self::Ball(b) => b.range_to_point(metric, point),
        }
    }

    /// The lower and upper bounds on the distance between any point inside
    /// this bound and any point inside `other`.
    #[must_use]
    pub fn range_to_bound<M: Metric>(&self, metric: &M, other: &Self) -> (f64, f64) {
        match (self, other) {
            (Self::Rect(a), Self::Rect(b)) => (a.min_to_rect(metric, b), a.max_to_rect(metric, b)),
            (Self::Ball(a), Self::Ball(b)) => a.range_to_ball(metric, b),
            (Self::Rect(a), Self::Ball(b)) => a.enclosing_ball(metric).range_to_ball(metric, b),
            (Self::Ball(a), Self::Rect(b)) => a.range_to_ball(metric, &b.enclosing_ball(metric)),
        }
    }

    /// The lower bound on the distance from `point` to this bound.
    #[must_use]
    pub fn min_distance_to_point<M: Metric>(&self, metric: &M, point: &[f64]) -> f64 {
        match self {
            Self::Rect(r) => r.min_to_point(metric, point),
            Self::Ball(b) => b.range_to_point(metric, point).0,
        }
    }

    /// The upper bound on the distance from `point` to this bound.
    #[must_use]
    pub fn max_distance_to_point<M: Metric>(&self, metric: &M, point: &[f64]) -> f64 {
        match self {
            Self::Rect(r) => r.max_to_point(metric, point),
            Self::Ball(b) => b.range_to_point(metric, point).1,
        }
    }

    /// The lower bound on the distance between this bound and `other`.
    #[must_use]
    pub fn min_distance<M: Metric>(&self, metric: &M, other: &Self) -> f64 {
        self.range_to_bound(metric, other).0
    }

    /// The upper bound on the distance between this bound and `other`.
    #[must_use]
    pub fn max_distance<M: Metric>(&self, metric: &M, other: &Self) -> f64 {
        self.range_to_bound(metric, other).1
    }

    /// Whether `point` lies inside the bound, allowing a relative `tolerance`.
    #[must_use]
    pub fn contains<M: Metric>(&self, metric: &M, point: &[f64], tolerance: f64) -> bool {
        match self {
            Self::Rect(r) => r.contains(point, tolerance),
            Self::Ball(b) => b.contains(metric, point, tolerance),
        }
    }

    /// Whether this bound lies inside `outer`, allowing a relative
    /// `tolerance`. Bounds of different kinds never nest.
    #[must_use]
    pub fn is_within<M: Metric>(&self, metric: &M, outer: &Self, tolerance: f64) -> bool {
        match (self, outer) {
            (Self::Rect(a), Self::Rect(b)) => a.is_within(b, tolerance),
            (Self::Ball(a), Self::Ball(b)) => a.is_within(metric, b, tolerance),
            _ => false,
        }
    }

    /// The number of coordinates of the bound.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        match self {
            Self::Rect(r) => r.dimensionality(),
            Self::Ball(b) => b.center().len(),
        }
    }
}
