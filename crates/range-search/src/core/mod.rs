//! The building blocks of the trees: points, metrics, bounds and ranges.

pub mod bound;
pub mod dataset;
pub mod metric;
mod range;
pub mod tree;

pub use dataset::PointSet;
pub use range::Range;
pub use tree::{SpaceTree, TreeType};
