//! Checking search results.

use float_cmp::approx_eq;
use range_search::{metric::Metric, LpMetric, PointSet, Range, RangeSearchResult};

/// Matches per query, as `(reference, distance)` pairs sorted by index.
pub fn canonical(result: &RangeSearchResult) -> Vec<Vec<(usize, f64)>> {
    (0..result.num_queries())
        .map(|q| {
            let mut hits = result.matches(q).collect::<Vec<_>>();
            hits.sort_by_key(|&(i, _)| i);
            hits
        })
        .collect()
}

/// The matches by definition, comparing every pair.
pub fn brute_force(
    reference: &PointSet,
    queries: &PointSet,
    range: Range,
    metric: LpMetric,
    exclude_self: bool,
) -> Vec<Vec<(usize, f64)>> {
    queries
        .iter()
        .enumerate()
        .map(|(q, query)| {
            reference
                .iter()
                .enumerate()
                .filter(|&(r, _)| !(exclude_self && q == r))
                .map(|(r, point)| (r, metric.distance(query, point)))
                .filter(|&(_, d)| range.contains(d))
                .collect()
        })
        .collect()
}

/// Asserts that `result` holds exactly the `expected` neighbors and, up to
/// rounding, the `expected` distances.
pub fn check_expected(result: &RangeSearchResult, neighbors: &[Vec<usize>], distances: &[Vec<f64>], context: &str) {
    let actual = canonical(result);
    assert_eq!(actual.len(), neighbors.len(), "{context}");
    for (q, (hits, (n, d))) in actual.iter().zip(neighbors.iter().zip(distances)).enumerate() {
        let found = hits.iter().map(|&(i, _)| i).collect::<Vec<_>>();
        assert_eq!(&found, n, "{context}: neighbors of query {q}");
        for (&(_, a), &b) in hits.iter().zip(d) {
            assert!(approx_eq!(f64, a, b, epsilon = 1e-5), "{context}: query {q}, {a} vs {b}");
        }
    }
}
