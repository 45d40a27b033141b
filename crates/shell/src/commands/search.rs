//! Answering range queries and writing the results.

use std::path::PathBuf;

use range_search::{Range, RangeSearchModel};

use crate::data;

use super::ModelOptions;

/// The inputs of the `search` command.
pub struct SearchArgs {
    /// The reference CSV to build a model over.
    pub reference: Option<PathBuf>,
    /// A saved model to load instead.
    pub in_model: Option<PathBuf>,
    /// The query CSV.
    pub query: Option<PathBuf>,
    /// The smallest distance that matches.
    pub min: f64,
    /// The largest distance that matches.
    pub max: f64,
    /// Where to write the neighbors.
    pub neighbors_file: PathBuf,
    /// Where to write the distances.
    pub distances_file: PathBuf,
    /// Where to write the model, if anywhere.
    pub out_model: Option<PathBuf>,
    /// How to build a new model.
    pub options: ModelOptions,
}

/// Loads or builds a model, searches it and writes the results.
pub fn search_model(args: &SearchArgs) -> Result<(), String> {
    // The range is checked before any data is read or any tree is built.
    let range = Range::new(args.min, args.max).map_err(|e| e.to_string())?;

    let model = match (&args.reference, &args.in_model) {
        (Some(reference), None) => args.options.build(data::read_points(reference)?)?,
        (None, Some(in_model)) => RangeSearchModel::read_from(in_model).map_err(|e| e.to_string())?,
        _ => return Err("Exactly one of --reference and --in-model must be given".to_string()),
    };

    let result = match &args.query {
        Some(query) => {
            let queries = data::read_points(query)?;
            if args.options.parallel() {
                model.par_search_with(&queries, range)
            } else {
                model.search_with(&queries, range)
            }
        }
        None => {
            if args.options.parallel() {
                model.par_search(range)
            } else {
                model.search(range)
            }
        }
    }
    .map_err(|e| e.to_string())?;

    ftlog::info!(
        "Found {} matches for {} queries in {range}",
        result.num_matches(),
        result.num_queries()
    );

    data::write_rows(&args.neighbors_file, result.neighbors())?;
    data::write_rows(&args.distances_file, result.distances())?;

    if let Some(out_model) = &args.out_model {
        model.write_to(out_model).map_err(|e| e.to_string())?;
    }

    Ok(())
}
