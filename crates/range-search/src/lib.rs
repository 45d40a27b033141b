#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

mod core;
pub mod error;
mod model;
pub mod search;
pub(crate) mod utils;

pub use crate::{
    core::{bound, dataset, metric, tree, PointSet, Range, SpaceTree, TreeType},
    error::RangeSearchError,
    metric::LpMetric,
    model::{ModelConfig, RangeSearchModel},
    search::{RangeSearchResult, SearchMode, TraversalStats},
};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
