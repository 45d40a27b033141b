//! The `Manhattan` distance metric.

use super::Metric;

/// The `Manhattan` distance metric, also known as the city block distance.
///
/// This is a distance metric that measures the distance between two points in a
/// grid based on the sum of the absolute differences of their coordinates.
pub struct Manhattan;

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        distances::vectors::manhattan(a, b)
    }

    fn norm(&self, components: &[f64]) -> f64 {
        components.iter().sum()
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}
