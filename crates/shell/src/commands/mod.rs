//! The commands under the `range-search` CLI.

pub mod build;
pub mod search;

use std::path::PathBuf;

use clap::Subcommand;
use range_search::{ModelConfig, PointSet, RangeSearchModel};

use crate::{
    metrics::Metric,
    trees::{Mode, Tree},
};

/// How to build a model.
#[derive(clap::Args, Debug, Clone)]
pub struct ModelOptions {
    /// The most points a leaf may hold.
    #[arg(long, default_value_t = 20)]
    leaf_size: usize,

    /// The tree variant to build.
    #[arg(short('t'), long, default_value = "kd")]
    tree_type: Tree,

    /// The name of the metric to use.
    #[arg(short('m'), long, default_value = "euclidean")]
    metric: Metric,

    /// The traversal used to answer queries.
    #[arg(long, default_value = "dual")]
    mode: Mode,

    /// Whether to build trees and search in parallel.
    #[arg(short('p'), long, default_value_t = false)]
    parallel: bool,
}

impl ModelOptions {
    /// The library configuration for these options.
    pub fn config(&self) -> Result<ModelConfig, String> {
        Ok(ModelConfig::default()
            .with_leaf_size(self.leaf_size)
            .map_err(|e| e.to_string())?
            .with_tree_type(self.tree_type.tree_type())
            .with_metric(self.metric.lp_metric())
            .with_mode(self.mode.search_mode()))
    }

    /// Builds a model over `reference` with these options.
    pub fn build(&self, reference: PointSet) -> Result<RangeSearchModel, String> {
        let config = self.config()?;
        let model = if self.parallel {
            RangeSearchModel::par_build(reference, config)
        } else {
            RangeSearchModel::build(reference, config)
        };
        model.map_err(|e| e.to_string())
    }

    /// Whether to search in parallel.
    pub const fn parallel(&self) -> bool {
        self.parallel
    }
}

/// The subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a model over a reference set and save it.
    Build {
        /// The path to the reference CSV, one point per row.
        #[arg(short('r'), long)]
        reference: PathBuf,

        /// The path to write the model to.
        #[arg(short('o'), long)]
        out_model: PathBuf,

        #[command(flatten)]
        options: ModelOptions,
    },
    /// Answer range queries with a new or saved model.
    Search {
        /// The path to the reference CSV. Required unless `--in-model` is given.
        #[arg(short('r'), long, conflicts_with = "in_model")]
        reference: Option<PathBuf>,

        /// The path to a saved model.
        #[arg(short('i'), long)]
        in_model: Option<PathBuf>,

        /// The path to the query CSV. Without it, the reference points are
        /// searched against each other.
        #[arg(short('q'), long)]
        query: Option<PathBuf>,

        /// The smallest distance that matches.
        #[arg(long, default_value_t = 0.0)]
        min: f64,

        /// The largest distance that matches.
        #[arg(long)]
        max: f64,

        /// The path to write the neighbors of each query to.
        #[arg(short('n'), long)]
        neighbors_file: PathBuf,

        /// The path to write the distances to the neighbors of each query to.
        #[arg(short('d'), long)]
        distances_file: PathBuf,

        /// The path to write the model to, if it should be kept.
        #[arg(short('o'), long)]
        out_model: Option<PathBuf>,

        #[command(flatten)]
        options: ModelOptions,
    },
}
