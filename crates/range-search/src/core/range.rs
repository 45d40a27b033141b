//! The closed distance interval that selects matches.

use serde::{Deserialize, Serialize};

use crate::RangeSearchError;

/// Relative slack applied when a bound is compared against the range.
///
/// Bounds are only used to skip work, so widening them never changes a
/// result. The slack absorbs floating-point error in bound arithmetic,
/// e.g. a ball bound whose radius was computed to a point that lies
/// exactly on the range boundary.
const BOUND_SLACK: f64 = 1e-9;

/// A closed interval `[min, max]` of distances.
///
/// A reference point `r` matches a query `q` iff `min <= d(q, r) <= max`.
///
/// # Example
///
/// ```rust
/// use range_search::Range;
///
/// let range = Range::new(1.0, 3.0).unwrap();
/// assert!(range.contains(1.0));
/// assert!(range.contains(3.0));
/// assert!(!range.contains(3.000_001));
///
/// assert!(Range::new(3.0, 1.0).is_err());
/// assert!(Range::new(-1.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// The smallest distance that matches.
    min: f64,
    /// The largest distance that matches.
    max: f64,
}

impl Range {
    /// Creates a new `Range`.
    ///
    /// # Errors
    ///
    /// * `InvalidRange` if `max < min`, if `min` is negative, or if either
    ///   bound is NaN.
    pub fn new(min: f64, max: f64) -> Result<Self, RangeSearchError> {
        // Written so that NaN fails every comparison and is rejected.
        if min >= 0.0 && max >= min {
            Ok(Self { min, max })
        } else {
            Err(RangeSearchError::InvalidRange { min, max })
        }
    }

    /// The lower end of the interval.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// The upper end of the interval.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Whether an exact distance lies in the interval, both ends included.
    #[must_use]
    pub fn contains(&self, distance: f64) -> bool {
        self.min <= distance && distance <= self.max
    }

    /// Whether no distance in `[lo, hi]` can lie in this range.
    ///
    /// `lo` and `hi` are the lower and upper distance bounds produced by the
    /// bound oracle for a node or a node pair.
    #[must_use]
    pub fn excludes(&self, lo: f64, hi: f64) -> bool {
        lo - slack(lo) > self.max + slack(self.max) || hi + slack(hi) < self.min - slack(self.min)
    }

    /// Whether every distance in `[lo, hi]` lies in this range.
    ///
    /// Contained nodes are still checked point by point; this only lets the
    /// traversal stop evaluating bounds below them.
    #[must_use]
    pub fn encloses(&self, lo: f64, hi: f64) -> bool {
        self.min <= lo && hi <= self.max
    }
}

impl core::fmt::Display for Range {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Absolute slack for a bound compared against `value`.
fn slack(value: f64) -> f64 {
    BOUND_SLACK * (1.0 + value.abs())
}
