//! Axis-aligned hyper-rectangle bounds.

use serde::{Deserialize, Serialize};

use crate::{metric::Metric, PointSet};

use super::BallBound;

/// An axis-aligned hyper-rectangle given by its lowest and highest corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HRectBound {
    /// The smallest coordinate in each dimension.
    lo: Vec<f64>,
    /// The largest coordinate in each dimension.
    hi: Vec<f64>,
}

impl HRectBound {
    /// The tightest rectangle around the points at `indices`.
    ///
    /// `indices` must not be empty.
    #[must_use]
    pub fn from_points(data: &PointSet, indices: &[usize]) -> Self {
        let dim = data.dimensionality();
        let mut lo = vec![f64::INFINITY; dim];
        let mut hi = vec![f64::NEG_INFINITY; dim];
        for &i in indices {
            for ((l, h), &x) in lo.iter_mut().zip(hi.iter_mut()).zip(data.get(i)) {
                *l = l.min(x);
                *h = h.max(x);
            }
        }
        Self { lo, hi }
    }

    /// The smallest coordinate in each dimension.
    #[must_use]
    pub fn lo(&self) -> &[f64] {
        &self.lo
    }

    /// The largest coordinate in each dimension.
    #[must_use]
    pub fn hi(&self) -> &[f64] {
        &self.hi
    }

    /// The number of dimensions.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.lo.len()
    }

    /// The extent of the rectangle in each dimension.
    pub fn widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.lo.iter().zip(&self.hi).map(|(l, h)| h - l)
    }

    /// The dimension with the largest extent and the midpoint along it.
    #[must_use]
    pub fn widest_dimension(&self) -> (usize, f64) {
        let (dim, _) = self
            .widths()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap_or((0, 0.0));
        (dim, (self.lo[dim] + self.hi[dim]) / 2.0)
    }

    /// The center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec<f64> {
        self.lo.iter().zip(&self.hi).map(|(l, h)| (l + h) / 2.0).collect()
    }

    /// The smallest ball around the center that contains the rectangle.
    #[must_use]
    pub fn enclosing_ball<M: Metric>(&self, metric: &M) -> BallBound {
        let half_widths = self.widths().map(|w| w / 2.0).collect::<Vec<_>>();
        BallBound::new(self.center(), metric.norm(&half_widths))
    }

    /// Lower bound on the distance from `point` to the rectangle.
    #[must_use]
    pub fn min_to_point<M: Metric>(&self, metric: &M, point: &[f64]) -> f64 {
        let gaps = self
            .lo
            .iter()
            .zip(&self.hi)
            .zip(point)
            .map(|((&l, &h), &x)| (l - x).max(x - h).max(0.0))
            .collect::<Vec<_>>();
        metric.norm(&gaps)
    }

    /// Upper bound on the distance from `point` to the rectangle.
    #[must_use]
    pub fn max_to_point<M: Metric>(&self, metric: &M, point: &[f64]) -> f64 {
        let spans = self
            .lo
            .iter()
            .zip(&self.hi)
            .zip(point)
            .map(|((&l, &h), &x)| (x - l).abs().max((h - x).abs()))
            .collect::<Vec<_>>();
        metric.norm(&spans)
    }

    /// Lower bound on the distance between the two rectangles.
    #[must_use]
    pub fn min_to_rect<M: Metric>(&self, metric: &M, other: &Self) -> f64 {
        let gaps = self
            .lo
            .iter()
            .zip(&self.hi)
            .zip(other.lo.iter().zip(&other.hi))
            .map(|((&l, &h), (&ol, &oh))| (ol - h).max(l - oh).max(0.0))
            .collect::<Vec<_>>();
        metric.norm(&gaps)
    }

    /// Upper bound on the distance between the two rectangles.
    #[must_use]
    pub fn max_to_rect<M: Metric>(&self, metric: &M, other: &Self) -> f64 {
        let spans = self
            .lo
            .iter()
            .zip(&self.hi)
            .zip(other.lo.iter().zip(&other.hi))
            .map(|((&l, &h), (&ol, &oh))| (oh - l).abs().max((h - ol).abs()))
            .collect::<Vec<_>>();
        metric.norm(&spans)
    }

    /// Whether this rectangle lies inside `outer`, allowing a relative
    /// `tolerance`.
    #[must_use]
    pub fn is_within(&self, outer: &Self, tolerance: f64) -> bool {
        self.dimensionality() == outer.dimensionality()
            && outer.contains(&self.lo, tolerance)
            && outer.contains(&self.hi, tolerance)
    }

    /// Whether `point` lies inside, allowing a relative `tolerance` per side.
    #[must_use]
    pub fn contains(&self, point: &[f64], tolerance: f64) -> bool {
        point.len() == self.lo.len()
            && self.lo.iter().zip(&self.hi).zip(point).all(|((&l, &h), &x)| {
                let slack = tolerance * (1.0 + l.abs().max(h.abs()));
                l - slack <= x && x <= h + slack
            })
    }
}
