//! Reading points from and writing results to CSV files.

use std::path::Path;

use range_search::PointSet;

/// Reads a CSV file with one point per row and no header.
pub fn read_points<P: AsRef<Path>>(path: &P) -> Result<PointSet, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| e.to_string())?;
        let row = record
            .iter()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| format!("Row {i} of {:?}: {field:?}: {e}", path.as_ref()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    let points = PointSet::from_rows(rows).map_err(|e| e.to_string())?;
    ftlog::info!(
        "Read {} points in {} dimensions from {:?}",
        points.cardinality(),
        points.dimensionality(),
        path.as_ref()
    );
    Ok(points)
}

/// Writes one comma-separated line per row. Rows may differ in length and
/// may be empty.
pub fn write_rows<P: AsRef<Path>, T: ToString>(path: &P, rows: &[Vec<T>]) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    for row in rows {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}
