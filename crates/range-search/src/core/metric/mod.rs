//! The `Metric` trait is used for all distance computations.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RangeSearchError;

mod chebyshev;
mod euclidean;
mod manhattan;

pub use chebyshev::Chebyshev;
pub use euclidean::Euclidean;
pub use manhattan::Manhattan;

/// The `Metric` trait is used for all distance computations.
///
/// Besides the exact point-to-point distance, a metric must be able to
/// measure the length of a displacement from its per-dimension components.
/// The hyper-rectangle bound uses this to turn per-dimension gaps into
/// conservative distance bounds.
///
/// # Example
///
/// ```rust
/// use range_search::metric::{Euclidean, Manhattan, Metric};
///
/// let a = [0.0, 0.0];
/// let b = [3.0, 4.0];
///
/// assert_eq!(Euclidean.distance(&a, &b), 5.0);
/// assert_eq!(Manhattan.distance(&a, &b), 7.0);
/// assert_eq!(Euclidean.norm(&[3.0, 4.0]), 5.0);
/// ```
pub trait Metric: Send + Sync {
    /// Call the metric on two points.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// The length of a displacement with the given non-negative components.
    fn norm(&self, components: &[f64]) -> f64;

    /// The name of the metric.
    fn name(&self) -> &'static str;
}

/// Selects one of the Lp metrics.
///
/// This is the form in which a model stores its metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LpMetric {
    /// L1, the city block distance.
    Manhattan,
    /// L2, the straight-line distance.
    #[default]
    Euclidean,
    /// L-infinity, the largest coordinate difference.
    Chebyshev,
}

impl LpMetric {
    /// All the metrics, in a stable order.
    pub const ALL: [Self; 3] = [Self::Manhattan, Self::Euclidean, Self::Chebyshev];
}

impl Metric for LpMetric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Manhattan => Manhattan.distance(a, b),
            Self::Euclidean => Euclidean.distance(a, b),
            Self::Chebyshev => Chebyshev.distance(a, b),
        }
    }

    fn norm(&self, components: &[f64]) -> f64 {
        match self {
            Self::Manhattan => Manhattan.norm(components),
            Self::Euclidean => Euclidean.norm(components),
            Self::Chebyshev => Chebyshev.norm(components),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Manhattan => Manhattan.name(),
            Self::Euclidean => Euclidean.name(),
            Self::Chebyshev => Chebyshev.name(),
        }
    }
}

impl core::fmt::Display for LpMetric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LpMetric {
    type Err = RangeSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| RangeSearchError::UnrecognizedMetric(s.to_string()))
    }
}
