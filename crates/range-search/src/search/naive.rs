//! Linear search: every query against every reference point.

use rayon::prelude::*;

use crate::{PointSet, Range, SpaceTree};

use super::{RangeSearchResult, TraversalStats};

/// Linear search for the reference points within `range` of each query.
///
/// # Arguments
///
/// * `tree` - The reference points. Only its points and permutation are used.
/// * `queries` - The query points.
/// * `range` - The distance range to search within.
/// * `exclude_self` - Whether `queries` are the tree's own points, in tree
///   order, so that the query at position `q` must not match itself.
///
/// # Returns
///
/// Matches indexed by query position, with reference points reported by
/// their original indices.
pub fn search(tree: &SpaceTree, queries: &PointSet, range: Range, exclude_self: bool) -> RangeSearchResult {
    let mut result = RangeSearchResult::with_queries(queries.cardinality());
    for (q, query) in queries.iter().enumerate() {
        let (hits, stats) = scan(tree, query, range, exclude_self.then_some(q));
        result.extend(q, hits);
        result.add_stats(stats);
    }
    ftlog::debug!("Naive search in {range}: {:?}", result.stats());
    result
}

/// Parallel version of [`search`], over the queries.
pub fn par_search(tree: &SpaceTree, queries: &PointSet, range: Range, exclude_self: bool) -> RangeSearchResult {
    let per_query = (0..queries.cardinality())
        .into_par_iter()
        .map(|q| scan(tree, queries.get(q), range, exclude_self.then_some(q)))
        .collect::<Vec<_>>();

    let mut result = RangeSearchResult::with_queries(queries.cardinality());
    for (q, (hits, stats)) in per_query.into_iter().enumerate() {
        result.extend(q, hits);
        result.add_stats(stats);
    }
    ftlog::debug!("Parallel naive search in {range}: {:?}", result.stats());
    result
}

/// Compares one query with all reference points, skipping the position `skip`.
fn scan(tree: &SpaceTree, query: &[f64], range: Range, skip: Option<usize>) -> (Vec<(usize, f64)>, TraversalStats) {
    let positions = (0..tree.cardinality()).filter(|&p| Some(p) != skip).collect::<Vec<_>>();
    let stats = TraversalStats {
        base_cases: positions.len(),
        ..TraversalStats::default()
    };
    let hits = tree
        .points()
        .query_to_many(&tree.metric(), query, &positions)
        .filter(|&(_, d)| range.contains(d))
        .map(|(p, d)| (tree.original_index(p), d))
        .collect();
    (hits, stats)
}
