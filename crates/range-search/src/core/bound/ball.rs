//! Ball bounds.

use serde::{Deserialize, Serialize};

use crate::{metric::Metric, PointSet};

/// A ball given by a center and a radius.
///
/// The center need not be one of the bounded points. These bounds rely only
/// on the triangle inequality, so they are valid for every Lp metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallBound {
    /// The center of the ball.
    center: Vec<f64>,
    /// The distance from the center to the farthest bounded point.
    radius: f64,
}

impl BallBound {
    /// Creates a new `BallBound`.
    #[must_use]
    pub const fn new(center: Vec<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The smallest ball around `center` containing the points at `indices`.
    #[must_use]
    pub fn around<M: Metric>(data: &PointSet, metric: &M, center: Vec<f64>, indices: &[usize]) -> Self {
        let radius = data
            .query_to_many(metric, &center, indices)
            .map(|(_, d)| d)
            .fold(0.0, f64::max);
        Self { center, radius }
    }

    /// The center of the ball.
    #[must_use]
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// The radius of the ball.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Lower and upper bounds on the distance from `point` to the ball.
    #[must_use]
    pub fn range_to_point<M: Metric>(&self, metric: &M, point: &[f64]) -> (f64, f64) {
        let d = metric.distance(&self.center, point);
        ((d - self.radius).max(0.0), d + self.radius)
    }

    /// Lower and upper bounds on the distance between the two balls.
    #[must_use]
    pub fn range_to_ball<M: Metric>(&self, metric: &M, other: &Self) -> (f64, f64) {
        let d = metric.distance(&self.center, &other.center);
        let r = self.radius + other.radius;
        ((d - r).max(0.0), d + r)
    }

    /// Whether this ball lies inside `outer`, allowing a relative `tolerance`.
    #[must_use]
    pub fn is_within<M: Metric>(&self, metric: &M, outer: &Self, tolerance: f64) -> bool {
        self.center.len() == outer.center.len()
            && metric.distance(&self.center, &outer.center) + self.radius
                <= outer.radius + tolerance * (1.0 + outer.radius)
    }

    /// Whether `point` lies inside, allowing a relative `tolerance`.
    #[must_use]
    pub fn contains<M: Metric>(&self, metric: &M, point: &[f64], tolerance: f64) -> bool {
        point.len() == self.center.len()
            && metric.distance(&self.center, point) <= self.radius + tolerance * (1.0 + self.radius)
    }
}

#[cfg(test)]
mod tests {
    use crate::{metric::Euclidean, PointSet};

    use super::BallBound;

    #[test]
    fn around_points() {
        let data = PointSet::from_rows(vec![vec![0.0, 0.0], vec![6.0, 8.0], vec![3.0, 4.0]]).unwrap();
        let ball = BallBound::around(&data, &Euclidean, vec![3.0, 4.0], &[0, 1, 2]);
        assert_eq!(ball.radius(), 5.0);
        assert_eq!(ball.center(), &[3.0, 4.0]);

        assert_eq!(ball.range_to_point(&Euclidean, &[3.0, 4.0]), (0.0, 5.0));
        assert_eq!(ball.range_to_point(&Euclidean, &[3.0, 14.0]), (5.0, 15.0));

        let other = BallBound::new(vec![3.0, 24.0], 5.0);
        assert_eq!(ball.range_to_ball(&Euclidean, &other), (10.0, 30.0));
        assert!(ball.contains(&Euclidean, &[6.0, 8.0], 0.0));
        assert!(!ball.contains(&Euclidean, &[6.0, 8.1], 0.0));

        assert!(BallBound::new(vec![4.0, 4.0], 4.0).is_within(&Euclidean, &ball, 0.0));
        assert!(!BallBound::new(vec![6.0, 8.0], 1.0).is_within(&Euclidean, &ball, 0.0));
        assert!(ball.is_within(&Euclidean, &ball, 0.0));
    }
}
