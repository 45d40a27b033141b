//! Point sets and the operations the trees need from them.

mod point_set;

pub use point_set::PointSet;
