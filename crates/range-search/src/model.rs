//! The model facade: a reference tree plus the settings to search it.

use std::{borrow::Cow, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    metric::{LpMetric, Metric},
    search::{dual_tree, naive, single_tree},
    tree::Node,
    PointSet, Range, RangeSearchError, RangeSearchResult, SearchMode, SpaceTree, TreeType,
};

/// The version of the persisted model layout.
const FORMAT_VERSION: u32 = 1;

/// Settings for building and searching a `RangeSearchModel`.
///
/// The default is a kd-tree with leaves of up to 20 points, the Euclidean
/// metric and dual-tree search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// The most points a leaf may hold.
    leaf_size: usize,
    /// The tree variant to build.
    tree_type: TreeType,
    /// The distance function.
    metric: LpMetric,
    /// The traversal used to answer queries.
    mode: SearchMode,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            leaf_size: 20,
            tree_type: TreeType::default(),
            metric: LpMetric::default(),
            mode: SearchMode::default(),
        }
    }
}

impl ModelConfig {
    /// Sets the leaf size.
    ///
    /// # Errors
    ///
    /// * `InvalidLeafSize` if `leaf_size` is zero.
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Result<Self, RangeSearchError> {
        if leaf_size == 0 {
            return Err(RangeSearchError::InvalidLeafSize(leaf_size));
        }
        self.leaf_size = leaf_size;
        Ok(self)
    }

    /// Sets the tree variant.
    #[must_use]
    pub const fn with_tree_type(mut self, tree_type: TreeType) -> Self {
        self.tree_type = tree_type;
        self
    }

    /// Sets the metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: LpMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the search mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// The most points a leaf may hold.
    #[must_use]
    pub const fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The tree variant.
    #[must_use]
    pub const fn tree_type(&self) -> TreeType {
        self.tree_type
    }

    /// The metric.
    #[must_use]
    pub const fn metric(&self) -> LpMetric {
        self.metric
    }

    /// The search mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }
}

/// A reference set indexed for range search.
///
/// The model owns its tree behind an `Arc`, so clones are cheap and the tree
/// can be shared by concurrent searches. Searching never mutates the model.
///
/// In `Naive` mode the tree is a single leaf over all of the points, so that
/// the model still holds the reference data in the same form.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSearchModel {
    /// The settings the model was built with.
    config: ModelConfig,
    /// The reference tree.
    tree: Arc<SpaceTree>,
}

impl RangeSearchModel {
    /// Builds a model over the `reference` points.
    ///
    /// # Errors
    ///
    /// * `InvalidLeafSize` if the leaf size in `config` is zero.
    pub fn build(reference: PointSet, config: ModelConfig) -> Result<Self, RangeSearchError> {
        Self::build_with(reference, config, SpaceTree::new)
    }

    /// Parallel version of [`RangeSearchModel::build`].
    ///
    /// The tree is identical to the one built sequentially.
    ///
    /// # Errors
    ///
    /// See [`RangeSearchModel::build`].
    pub fn par_build(reference: PointSet, config: ModelConfig) -> Result<Self, RangeSearchError> {
        Self::build_with(reference, config, SpaceTree::par_new)
    }

    /// Builds the reference tree with `new_tree`.
    fn build_with<F>(reference: PointSet, config: ModelConfig, new_tree: F) -> Result<Self, RangeSearchError>
    where
        F: FnOnce(PointSet, usize, TreeType, LpMetric) -> Result<SpaceTree, RangeSearchError>,
    {
        if config.leaf_size == 0 {
            return Err(RangeSearchError::InvalidLeafSize(config.leaf_size));
        }

        let leaf_size = match config.mode {
            SearchMode::Naive => config.leaf_size.max(reference.cardinality()),
            SearchMode::Single | SearchMode::Dual => config.leaf_size,
        };
        let tree = new_tree(reference, leaf_size, config.tree_type, config.metric)?;
        ftlog::info!(
            "Built {} model over {} points in {} dimensions with {} nodes",
            config.tree_type,
            tree.cardinality(),
            tree.dimensionality(),
            tree.nodes().len()
        );

        Ok(Self {
            config,
            tree: Arc::new(tree),
        })
    }

    /// The settings the model was built with.
    #[must_use]
    pub const fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The leaf size the model was configured with.
    #[must_use]
    pub const fn leaf_size(&self) -> usize {
        self.config.leaf_size
    }

    /// The tree variant.
    #[must_use]
    pub const fn tree_type(&self) -> TreeType {
        self.config.tree_type
    }

    /// The metric.
    #[must_use]
    pub const fn metric(&self) -> LpMetric {
        self.config.metric
    }

    /// The search mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.config.mode
    }

    /// The number of coordinates of each reference point.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.tree.dimensionality()
    }

    /// The number of reference points.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.tree.cardinality()
    }

    /// A shared handle to the reference tree.
    #[must_use]
    pub fn tree(&self) -> Arc<SpaceTree> {
        Arc::clone(&self.tree)
    }

    /// Finds, for every reference point, the other reference points within
    /// `range` of it.
    ///
    /// A point is never reported as its own neighbor, even when `range`
    /// includes zero. Duplicates of a point at other indices are reported.
    ///
    /// # Errors
    ///
    /// This does not currently fail; the `Result` leaves room for checks that
    /// depend on the model's state.
    pub fn search(&self, range: Range) -> Result<RangeSearchResult, RangeSearchError> {
        let tree = self.tree.as_ref();
        let result = match self.config.mode {
            SearchMode::Naive => naive::search(tree, tree.points(), range, true),
            SearchMode::Single => single_tree::search(tree, tree.points(), range, true),
            SearchMode::Dual => dual_tree::search(tree, tree, range, true),
        };
        Ok(self.finish(result.unpermute(tree.permutation())))
    }

    /// Parallel version of [`RangeSearchModel::search`].
    ///
    /// # Errors
    ///
    /// See [`RangeSearchModel::search`].
    pub fn par_search(&self, range: Range) -> Result<RangeSearchResult, RangeSearchError> {
        let tree = self.tree.as_ref();
        let result = match self.config.mode {
            SearchMode::Naive => naive::par_search(tree, tree.points(), range, true),
            SearchMode::Single => single_tree::par_search(tree, tree.points(), range, true),
            SearchMode::Dual => dual_tree::par_search(tree, tree, range, true),
        };
        Ok(self.finish(result.unpermute(tree.permutation())))
    }

    /// Finds, for every point in `queries`, the reference points within
    /// `range` of it.
    ///
    /// Query and reference indices are independent: a query that coincides
    /// with a reference point matches it at distance zero. In `Dual` mode a
    /// temporary tree is built over the queries for this call only.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` if the queries do not have the dimensionality of
    ///   the reference points.
    pub fn search_with(&self, queries: &PointSet, range: Range) -> Result<RangeSearchResult, RangeSearchError> {
        queries.check_dimensionality(self.dimensionality())?;
        let tree = self.tree.as_ref();
        let result = match self.config.mode {
            SearchMode::Naive => naive::search(tree, queries, range, false),
            SearchMode::Single => single_tree::search(tree, queries, range, false),
            SearchMode::Dual => {
                let query_tree = self.query_tree(queries, SpaceTree::new)?;
                dual_tree::search(tree, &query_tree, range, false).unpermute(query_tree.permutation())
            }
        };
        Ok(self.finish(result))
    }

    /// Parallel version of [`RangeSearchModel::search_with`].
    ///
    /// # Errors
    ///
    /// See [`RangeSearchModel::search_with`].
    pub fn par_search_with(&self, queries: &PointSet, range: Range) -> Result<RangeSearchResult, RangeSearchError> {
        queries.check_dimensionality(self.dimensionality())?;
        let tree = self.tree.as_ref();
        let result = match self.config.mode {
            SearchMode::Naive => naive::par_search(tree, queries, range, false),
            SearchMode::Single => single_tree::par_search(tree, queries, range, false),
            SearchMode::Dual => {
                let query_tree = self.query_tree(queries, SpaceTree::par_new)?;
                dual_tree::par_search(tree, &query_tree, range, false).unpermute(query_tree.permutation())
            }
        };
        Ok(self.finish(result))
    }

    /// Builds a tree over the queries with the model's settings.
    fn query_tree<F>(&self, queries: &PointSet, new_tree: F) -> Result<SpaceTree, RangeSearchError>
    where
        F: FnOnce(PointSet, usize, TreeType, LpMetric) -> Result<SpaceTree, RangeSearchError>,
    {
        new_tree(queries.clone(), self.config.leaf_size, self.config.tree_type, self.config.metric)
    }

    /// Logs the outcome of a search.
    fn finish(&self, result: RangeSearchResult) -> RangeSearchResult {
        ftlog::debug!(
            "{} search over {} queries found {} matches with {:?}",
            self.config.mode,
            result.num_queries(),
            result.num_matches(),
            result.stats()
        );
        result
    }

    /// Encodes the model, tree included, to bytes with `bitcode`.
    ///
    /// The tree variant, metric and search mode are stored by name.
    ///
    /// # Errors
    ///
    /// * `Encoding` if the model cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RangeSearchError> {
        let persisted = PersistedModel {
            version: FORMAT_VERSION,
            leaf_size: self.config.leaf_size,
            tree_type: Cow::Borrowed(self.config.tree_type.name()),
            metric: Cow::Borrowed(self.config.metric.name()),
            mode: Cow::Borrowed(self.config.mode.name()),
            tree_leaf_size: self.tree.leaf_size,
            points: Cow::Borrowed(&self.tree.points),
            permutation: Cow::Borrowed(&self.tree.permutation),
            nodes: Cow::Borrowed(&self.tree.nodes),
        };
        Ok(bitcode::serialize(&persisted)?)
    }

    /// Restores a model from bytes written by [`RangeSearchModel::to_bytes`].
    ///
    /// The restored tree is checked against the tree invariants before it is
    /// accepted, and searches on it give the same results as on the model
    /// that was saved.
    ///
    /// # Errors
    ///
    /// * `Encoding` if the bytes do not decode.
    /// * `UnrecognizedTreeVariant`, `UnrecognizedMetric` or
    ///   `UnrecognizedSearchMode` if a stored name is unknown.
    /// * `InvalidLeafSize` if the stored leaf size is zero.
    /// * `CorruptModelState` if the layout version is unknown or the tree is
    ///   not a valid tree over its points.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RangeSearchError> {
        let persisted: PersistedModel = bitcode::deserialize(bytes)?;
        if persisted.version != FORMAT_VERSION {
            return Err(RangeSearchError::CorruptModelState(format!(
                "unknown layout version {}",
                persisted.version
            )));
        }

        let config = ModelConfig::default()
            .with_leaf_size(persisted.leaf_size)?
            .with_tree_type(persisted.tree_type.parse()?)
            .with_metric(persisted.metric.parse()?)
            .with_mode(persisted.mode.parse()?);

        let tree = SpaceTree {
            tree_type: config.tree_type,
            metric: config.metric,
            leaf_size: persisted.tree_leaf_size,
            points: persisted.points.into_owned(),
            permutation: persisted.permutation.into_owned(),
            nodes: persisted.nodes.into_owned(),
        };
        tree.validate()?;
        ftlog::info!(
            "Restored {} model over {} points in {} dimensions",
            config.tree_type,
            tree.cardinality(),
            tree.dimensionality()
        );

        Ok(Self {
            config,
            tree: Arc::new(tree),
        })
    }

    /// Writes the model to a file with [`RangeSearchModel::to_bytes`].
    ///
    /// # Errors
    ///
    /// * `Encoding` if the model cannot be encoded.
    /// * `Io` if the file cannot be written.
    pub fn write_to<P: AsRef<std::path::Path>>(&self, path: &P) -> Result<(), RangeSearchError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Reads a model from a file written by [`RangeSearchModel::write_to`].
    ///
    /// # Errors
    ///
    /// * `Io` if the file cannot be read.
    /// * Any error of [`RangeSearchModel::from_bytes`].
    pub fn read_from<P: AsRef<std::path::Path>>(path: &P) -> Result<Self, RangeSearchError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

/// The persisted form of a model.
#[derive(Serialize, Deserialize)]
struct PersistedModel<'a> {
    /// The layout version.
    version: u32,
    /// The configured leaf size.
    leaf_size: usize,
    /// The name of the tree variant.
    tree_type: Cow<'a, str>,
    /// The name of the metric.
    metric: Cow<'a, str>,
    /// The name of the search mode.
    mode: Cow<'a, str>,
    /// The leaf size the tree was built with. It differs from `leaf_size` in
    /// `Naive` mode.
    tree_leaf_size: usize,
    /// The points, in tree order.
    points: Cow<'a, PointSet>,
    /// Tree positions to original indices.
    permutation: Cow<'a, [usize]>,
    /// The node arena.
    nodes: Cow<'a, [Node]>,
}
