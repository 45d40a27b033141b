//! The `Chebyshev` distance metric.

use super::Metric;

/// The `Chebyshev` distance metric, the largest absolute difference along any
/// single dimension.
pub struct Chebyshev;

impl Metric for Chebyshev {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        distances::vectors::chebyshev(a, b)
    }

    fn norm(&self, components: &[f64]) -> f64 {
        components.iter().copied().fold(0.0, f64::max)
    }

    fn name(&self) -> &'static str {
        "chebyshev"
    }
}
