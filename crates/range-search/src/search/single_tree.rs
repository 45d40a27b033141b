//! Single-tree search: each query descends the reference tree on its own.

use rayon::prelude::*;

use crate::{PointSet, Range, SpaceTree};

use super::{RangeSearchResult, TraversalStats};

/// Single-tree search for the reference points within `range` of each query.
///
/// # Arguments
///
/// * `tree` - The reference tree.
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
        let (hits, stats) = search_one(tree, query, range, exclude_self.then_some(q));
        result.extend(q, hits);
        result.add_stats(stats);
    }
    ftlog::debug!("Single-tree search in {range}: {:?}", result.stats());
    result
}

/// Parallel version of [`search`], over the queries.
pub fn par_search(tree: &SpaceTree, queries: &PointSet, range: Range, exclude_self: bool) -> RangeSearchResult {
    let per_query = (0..queries.cardinality())
        .into_par_iter()
        .map(|q| search_one(tree, queries.get(q), range, exclude_self.then_some(q)))
        .collect::<Vec<_>>();

    let mut result = RangeSearchResult::with_queries(queries.cardinality());
    for (q, (hits, stats)) in per_query.into_iter().enumerate() {
        result.extend(q, hits);
        result.add_stats(stats);
    }
    ftlog::debug!("Parallel single-tree search in {range}: {:?}", result.stats());
    result
}

/// Searches the tree for one query point.
///
/// The point at position `skip`, if any, is never reported.
///
/// # Returns
///
/// The `(original index, distance)` pairs of the matches and the work done.
pub fn search_one(tree: &SpaceTree, query: &[f64], range: Range, skip: Option<usize>) -> (Vec<(usize, f64)>, TraversalStats) {
    let ([confirmed, straddlers], mut stats) = tree_search(tree, query, range);
    let hits = leaf_search(tree, confirmed.into_iter().chain(straddlers), query, range, skip, &mut stats);
    (hits, stats)
}

/// Coarse-grained search over the nodes of the tree.
///
/// # Returns
///
/// The ids of the nodes whose bounds lie entirely inside the range, the ids
/// of the leaves that straddle it, and the work done. Every other node was
/// pruned, on its own or with an ancestor.
fn tree_search(tree: &SpaceTree, query: &[f64], range: Range) -> ([Vec<usize>; 2], TraversalStats) {
    let mut stats = TraversalStats::default();
    let mut confirmed = Vec::new();
    let mut straddlers = Vec::new();
    let mut candidates = vec![0];

    while !candidates.is_empty() {
        stats.scores += candidates.len();
        let (inside, outside): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .map(|id| (id, tree.range_to_point(id, query)))
            .partition(|&(_, (lo, hi))| !range.excludes(lo, hi));
        stats.prunes += outside.len();

        let (enclosed, overlapping): (Vec<_>, Vec<_>) =
            inside.into_iter().partition(|&(_, (lo, hi))| range.encloses(lo, hi));
        confirmed.extend(enclosed.into_iter().map(|(id, _)| id));

        let (leaves, parents): (Vec<_>, Vec<_>) = overlapping.into_iter().map(|(id, _)| id).partition(|&id| tree.node(id).is_leaf());
        straddlers.extend(leaves);

        candidates = parents
            .into_iter()
            .flat_map(|id| {
                tree.node(id)
                    .children()
                    .map_or_else(|| unreachable!("Non-leaf node without children"), |(l, r)| [l, r])
            })
            .collect();
    }

    ([confirmed, straddlers], stats)
}

/// Fine-grained search over the points of the surviving nodes.
///
/// Points in confirmed nodes are still checked exactly, so that a bound that
/// is only accurate up to rounding can never admit a point outside the range.
fn leaf_search<I: Iterator<Item = usize>>(
    tree: &SpaceTree,
    nodes: I,
    query: &[f64],
    range: Range,
    skip: Option<usize>,
    stats: &mut TraversalStats,
) -> Vec<(usize, f64)> {
    let positions = nodes
        .flat_map(|id| tree.node(id).positions())
        .filter(|&p| Some(p) != skip)
        .collect::<Vec<_>>();
    stats.base_cases += positions.len();

    tree.points()
        .query_to_many(&tree.metric(), query, &positions)
        .filter(|&(_, d)| range.contains(d))
        .map(|(p, d)| (tree.original_index(p), d))
        .collect()
}
