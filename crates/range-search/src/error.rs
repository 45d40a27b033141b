//! Errors reported by building, searching and restoring models.

use thiserror::Error;

/// The ways in which a range search call can fail.
///
/// All of these are detected at the boundary of the public operations,
/// before any tree work happens, and none of them leave partial results
/// behind.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RangeSearchError {
    /// The range has `max < min`, or one of the bounds is negative or NaN.
    #[error("Invalid range: [{min}, {max}]")]
    InvalidRange {
        /// The lower bound that was requested.
        min: f64,
        /// The upper bound that was requested.
        max: f64,
    },

    /// Leaves must be allowed to hold at least one point.
    #[error("Invalid leaf size: {0}, must be at least 1")]
    InvalidLeafSize(usize),

    /// A point had a different number of coordinates than the set it joins.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The dimensionality of the reference data.
        expected: usize,
        /// The dimensionality that was supplied.
        found: usize,
    },

    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate {dimension} of point {point}")]
    NonFiniteCoordinate {
        /// The index of the point.
        point: usize,
        /// The index of the coordinate within the point.
        dimension: usize,
    },

    /// A point set had no points, or points had no coordinates.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A persisted model named a tree variant that this build does not know.
    #[error("Unrecognized tree variant: {0}")]
    UnrecognizedTreeVariant(String),

    /// A persisted model named a metric that this build does not know.
    #[error("Unrecognized metric: {0}")]
    UnrecognizedMetric(String),

    /// A search mode name that this build does not know.
    #[error("Unrecognized search mode: {0}")]
    UnrecognizedSearchMode(String),

    /// A persisted model decoded, but its tree violates the tree invariants.
    #[error("Corrupt model state: {0}")]
    CorruptModelState(String),

    /// The bytes of a persisted model could not be encoded or decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Reading or writing a model file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bitcode::Error> for RangeSearchError {
    fn from(e: bitcode::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}
