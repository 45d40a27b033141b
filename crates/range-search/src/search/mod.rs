//! Range search algorithms: a naive baseline, single-tree and dual-tree.
//!
//! All three produce the same matches for the same inputs. They work in
//! terms of query *positions*: the order in which the query points are
//! handed to them. When the queries are the reference tree's own points,
//! `exclude_self` stops a point from matching itself.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RangeSearchError;

pub mod dual_tree;
pub mod naive;
mod result;
pub mod single_tree;

pub use result::{RangeSearchResult, TraversalStats};

/// Selects the traversal used to answer queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Compare every query with every reference point.
    Naive,
    /// Descend the reference tree once per query point.
    Single,
    /// Index the queries too and descend both trees together.
    #[default]
    Dual,
}

impl SearchMode {
    /// All the modes, in a stable order.
    pub const ALL: [Self; 3] = [Self::Naive, Self::Single, Self::Dual];

    /// The name of the mode, as used in persisted models.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Naive => "naive",
            Self::Single => "single",
            Self::Dual => "dual",
        }
    }
}

impl core::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMode {
    type Err = RangeSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| RangeSearchError::UnrecognizedSearchMode(s.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::prelude::*;

    use crate::{metric::LpMetric, metric::Metric, PointSet, Range, SpaceTree, TreeType};

    use super::{dual_tree, naive, single_tree, RangeSearchResult, SearchMode};

    pub fn random_points(n: usize, dim: usize, seed: u64) -> PointSet {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = (0..n).map(|_| (0..dim).map(|_| rng.gen_range(-5.0..5.0)).collect()).collect();
        PointSet::from_rows(rows).unwrap()
    }

    /// Matches per query, as sorted `(reference, distance)` pairs.
    pub fn canonical(result: &RangeSearchResult) -> Vec<Vec<(usize, f64)>> {
        (0..result.num_queries())
            .map(|q| {
                let mut hits = result.matches(q).collect::<Vec<_>>();
                hits.sort_by_key(|&(i, _)| i);
                hits
            })
            .collect()
    }

    /// Ground truth by definition, with the caller's indices on both sides.
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
            .map(|(q, point)| {
                reference
                    .iter()
                    .enumerate()
                    .filter(|&(r, _)| !(exclude_self && q == r))
                    .map(|(r, p)| (r, metric.distance(point, p)))
                    .filter(|&(_, d)| range.contains(d))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn names() {
        for m in SearchMode::ALL {
            assert_eq!(m.name().parse::<SearchMode>().unwrap(), m);
        }
        assert!("approximate".parse::<SearchMode>().is_err());
    }

    #[test]
    fn engines_agree() {
        let reference = random_points(300, 3, 1);
        let queries = random_points(120, 3, 2);
        let range = Range::new(1.0, 2.5).unwrap();

        for metric in LpMetric::ALL {
            let truth = brute_force(&reference, &queries, range, metric, false);
            for tree_type in TreeType::ALL {
                let tree = SpaceTree::new(reference.clone(), 8, tree_type, metric).unwrap();
                let query_tree = SpaceTree::new(queries.clone(), 8, tree_type, metric).unwrap();

                let results = [
                    naive::search(&tree, &queries, range, false),
                    naive::par_search(&tree, &queries, range, false),
                    single_tree::search(&tree, &queries, range, false),
                    single_tree::par_search(&tree, &queries, range, false),
                    dual_tree::search(&tree, &query_tree, range, false).unpermute(query_tree.permutation()),
                    dual_tree::par_search(&tree, &query_tree, range, false).unpermute(query_tree.permutation()),
                ];
                for result in &results {
                    assert_eq!(canonical(result), truth, "{metric} {tree_type}");
                }
            }
        }
    }

    #[test]
    fn monochromatic_excludes_self() {
        let reference = random_points(200, 2, 3);
        let range = Range::new(0.0, 1.0).unwrap();
        let truth = brute_force(&reference, &reference, range, LpMetric::Euclidean, true);

        for tree_type in TreeType::ALL {
            let tree = SpaceTree::new(reference.clone(), 5, tree_type, LpMetric::Euclidean).unwrap();
            let permutation = tree.permutation();
            let results = [
                naive::search(&tree, tree.points(), range, true).unpermute(permutation),
                single_tree::search(&tree, tree.points(), range, true).unpermute(permutation),
                single_tree::par_search(&tree, tree.points(), range, true).unpermute(permutation),
                dual_tree::search(&tree, &tree, range, true).unpermute(permutation),
                dual_tree::par_search(&tree, &tree, range, true).unpermute(permutation),
            ];
            for result in &results {
                assert_eq!(canonical(result), truth, "{tree_type}");
            }
        }
    }

    #[test]
    fn trees_prune() {
        let reference = random_points(2_000, 2, 4);
        let queries = random_points(50, 2, 5);
        let range = Range::new(0.0, 0.25).unwrap();

        let tree = SpaceTree::new(reference, 10, TreeType::Kd, LpMetric::Euclidean).unwrap();
        let query_tree = SpaceTree::new(queries.clone(), 10, TreeType::Kd, LpMetric::Euclidean).unwrap();

        let linear = naive::search(&tree, &queries, range, false);
        let single = single_tree::search(&tree, &queries, range, false);
        let dual = dual_tree::search(&tree, &query_tree, range, false);

        assert_eq!(linear.stats().base_cases, 2_000 * 50);
        assert!(single.stats().base_cases < linear.stats().base_cases);
        assert!(single.stats().prunes > 0);
        assert!(dual.stats().base_cases < linear.stats().base_cases);
        assert!(dual.stats().prunes > 0);
    }
}
