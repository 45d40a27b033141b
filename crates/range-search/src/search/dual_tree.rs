//! Dual-tree search: a query tree and the reference tree descended together.
//!
//! A pair of nodes is scored by the distance range between their bounds. If
//! no pair of points drawn from the two nodes can fall inside the search
//! range, the whole pair is pruned. If every pair must fall inside, or both
//! nodes are leaves, the points are compared directly. Otherwise the pair is
//! replaced by the pairs of their children.

use rayon::prelude::*;

use crate::{metric::Metric, Range, SpaceTree};

use super::{RangeSearchResult, TraversalStats};

/// Dual-tree search for the reference points within `range` of each query.
///
/// # Arguments
///
/// * `reference` - The reference tree.
/// * `queries` - The query tree. It must use the same metric as `reference`.
/// * `range` - The distance range to search within.
/// * `exclude_self` - Whether `queries` is `reference` itself, so that no
///   point may match itself.
///
/// # Returns
///
/// Matches indexed by position in the query tree, with reference points
/// reported by their original indices. Use
/// [`RangeSearchResult::unpermute`] with the query tree's permutation to
/// index them by the original query indices.
pub fn search(reference: &SpaceTree, queries: &SpaceTree, range: Range, exclude_self: bool) -> RangeSearchResult {
    let mut result = RangeSearchResult::with_queries(queries.cardinality());
    let stats = traverse(reference, queries, range, exclude_self, 0, &mut result);
    result.add_stats(stats);
    ftlog::debug!("Dual-tree search in {range}: {stats:?}");
    result
}

/// Parallel version of [`search`].
///
/// The query tree is cut into a frontier of disjoint subtrees. Each subtree
/// is traversed against the whole reference tree with a collector covering
/// only its own query positions. The frontier runs left to right over the
/// positions, so the collectors are concatenated in order at the end.
pub fn par_search(reference: &SpaceTree, queries: &SpaceTree, range: Range, exclude_self: bool) -> RangeSearchResult {
    let parts = queries
        .frontier(frontier_depth())
        .into_par_iter()
        .map(|q| {
            let mut local = RangeSearchResult::with_queries(queries.node(q).count());
            let stats = traverse(reference, queries, range, exclude_self, q, &mut local);
            local.add_stats(stats);
            local
        })
        .collect::<Vec<_>>();

    let mut result = RangeSearchResult::with_queries(0);
    for part in parts {
        result.append(part);
    }
    ftlog::debug!("Parallel dual-tree search in {range}: {:?}", result.stats());
    result
}

/// The depth at which to cut the query tree: enough subtrees to keep every
/// thread busy a few times over.
fn frontier_depth() -> usize {
    let threads = rayon::current_num_threads().max(1);
    (usize::BITS - threads.leading_zeros()) as usize + 2
}

/// Traverses the pairs of nodes under the query node `query_root` and the
/// reference root, pushing matches into `result`.
///
/// `result` covers the positions of `query_root` only, so query positions
/// are recorded relative to its first position.
fn traverse(
    reference: &SpaceTree,
    queries: &SpaceTree,
    range: Range,
    exclude_self: bool,
    query_root: usize,
    result: &mut RangeSearchResult,
) -> TraversalStats {
    let metric = reference.metric();
    let offset = queries.node(query_root).begin();
    let mut stats = TraversalStats::default();
    let mut stack = vec![(query_root, 0)];

    while let Some((q, r)) = stack.pop() {
        let (q_node, r_node) = (queries.node(q), reference.node(r));

        stats.scores += 1;
        let (lo, hi) = q_node.bound().range_to_bound(&metric, r_node.bound());
        if range.excludes(lo, hi) {
            stats.prunes += 1;
            continue;
        }

        if range.encloses(lo, hi) || (q_node.is_leaf() && r_node.is_leaf()) {
            for qp in q_node.positions() {
                let query = queries.points().get(qp);
                for rp in r_node.positions() {
                    if exclude_self && qp == rp {
                        continue;
                    }
                    stats.base_cases += 1;
                    let d = metric.distance(query, reference.points().get(rp));
                    if range.contains(d) {
                        result.push(qp - offset, reference.original_index(rp), d);
                    }
                }
            }
            continue;
        }

        match (q_node.children(), r_node.children()) {
            (None, Some((rl, rr))) => stack.extend([(q, rr), (q, rl)]),
            (Some((ql, qr)), None) => stack.extend([(qr, r), (ql, r)]),
            (Some((ql, qr)), Some((rl, rr))) => stack.extend([(qr, rr), (qr, rl), (ql, rr), (ql, rl)]),
            (None, None) => unreachable!("Leaf pairs are compared directly"),
        }
    }

    stats
}
