//! Accumulating matches per query point.

use core::ops::AddAssign;

/// Counters of the work done by one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Exact point-to-point distance computations.
    pub base_cases: usize,
    /// Bound evaluations for a node or a node pair.
    pub scores: usize,
    /// Nodes or node pairs skipped because no pair in them could match.
    pub prunes: usize,
}

impl AddAssign for TraversalStats {
    fn add_assign(&mut self, rhs: Self) {
        self.base_cases += rhs.base_cases;
        self.scores += rhs.scores;
        self.prunes += rhs.prunes;
    }
}

/// The matches of a range search, one list per query point.
///
/// For query `q`, `neighbors()[q]` holds the indices of the matching
/// reference points and `distances()[q]` their exact distances, in the same
/// order. The order within a query is whatever the traversal produced; use
/// [`RangeSearchResult::sorted`] when an order is needed. A query with no
/// matches has empty lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeSearchResult {
    /// Indices of the matching reference points, per query.
    neighbors: Vec<Vec<usize>>,
    /// Distances to the matching reference points, per query.
    distances: Vec<Vec<f64>>,
    /// Work counters.
    stats: TraversalStats,
}

impl RangeSearchResult {
    /// An empty result for `num_queries` queries.
    #[must_use]
    pub fn with_queries(num_queries: usize) -> Self {
        Self {
            neighbors: vec![Vec::new(); num_queries],
            distances: vec![Vec::new(); num_queries],
            stats: TraversalStats::default(),
        }
    }

    /// Records that `reference` matches `query` at `distance`.
    pub fn push(&mut self, query: usize, reference: usize, distance: f64) {
        self.neighbors[query].push(reference);
        self.distances[query].push(distance);
    }

    /// Records all of the `(reference, distance)` matches of `query`.
    pub fn extend<I: IntoIterator<Item = (usize, f64)>>(&mut self, query: usize, hits: I) {
        for (reference, distance) in hits {
            self.push(query, reference, distance);
        }
    }

    /// Appends the queries of `other` after the queries of this result.
    pub fn append(&mut self, mut other: Self) {
        self.neighbors.append(&mut other.neighbors);
        self.distances.append(&mut other.distances);
        self.stats += other.stats;
    }

    /// Moves the lists for query position `p` to `permutation[p]`.
    ///
    /// Used to report queries in the caller's order after searching them in
    /// a tree's order.
    #[must_use]
    pub fn unpermute(self, permutation: &[usize]) -> Self {
        let mut result = Self::with_queries(self.neighbors.len());
        for ((n, d), &q) in self.neighbors.into_iter().zip(self.distances).zip(permutation) {
            result.neighbors[q] = n;
            result.distances[q] = d;
        }
        result.stats = self.stats;
        result
    }

    /// Adds to the work counters.
    pub fn add_stats(&mut self, stats: TraversalStats) {
        self.stats += stats;
    }

    /// Indices of the matching reference points, per query.
    #[must_use]
    pub fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }

    /// Distances to the matching reference points, per query.
    #[must_use]
    pub fn distances(&self) -> &[Vec<f64>] {
        &self.distances
    }

    /// Work counters of the search.
    #[must_use]
    pub const fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// The number of queries.
    #[must_use]
    pub fn num_queries(&self) -> usize {
        self.neighbors.len()
    }

    /// The number of queries, as for any per-query collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_queries()
    }

    /// Whether there are no queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// The total number of matches over all queries.
    #[must_use]
    pub fn num_matches(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }

    /// The `(reference, distance)` matches of `query`.
    pub fn matches(&self, query: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.neighbors[query]
            .iter()
            .copied()
            .zip(self.distances[query].iter().copied())
    }

    /// Sorts the matches of every query by distance, then by index.
    pub fn sort_by_distance(&mut self) {
        for (n, d) in self.neighbors.iter_mut().zip(self.distances.iter_mut()) {
            let mut hits = n.iter().copied().zip(d.iter().copied()).collect::<Vec<_>>();
            hits.sort_by(|(i, a), (j, b)| a.total_cmp(b).then_with(|| i.cmp(j)));
            (*n, *d) = hits.into_iter().unzip();
        }
    }

    /// Owned version of [`RangeSearchResult::sort_by_distance`].
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.sort_by_distance();
        self
    }

    /// Splits the result into the per-query neighbors and distances.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vec<usize>>, Vec<Vec<f64>>) {
        (self.neighbors, self.distances)
    }
}
