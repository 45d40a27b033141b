//! Building a model and saving it.

use std::path::Path;

use crate::data;

use super::ModelOptions;

/// Reads the reference CSV, builds a model over it and writes the model.
pub fn build_model<P: AsRef<Path>>(reference: &P, out_model: &P, options: &ModelOptions) -> Result<(), String> {
    let reference = data::read_points(reference)?;
    let model = options.build(reference)?;
    model.write_to(out_model).map_err(|e| e.to_string())?;

    ftlog::info!(
        "Wrote {} model over {} points to {:?}",
        model.tree_type(),
        model.cardinality(),
        out_model.as_ref()
    );
    Ok(())
}
