//! The `Euclidean` distance metric.

use super::Metric;

/// The `Euclidean` distance metric.
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        distances::vectors::euclidean(a, b)
    }

    fn norm(&self, components: &[f64]) -> f64 {
        components.iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}
