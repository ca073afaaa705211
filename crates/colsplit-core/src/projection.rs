//! Column projection.

use colsplit_model::{Dataset, Row, sort_columns};

/// Restrict every record of `dataset` to the requested columns.
///
/// The result has exactly the requested names (sorted and deduplicated the
/// same way as the working column list), one row per source row, in source
/// row order. Names missing from the source project as absent values.
pub fn project<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> Dataset {
    let columns = sort_columns(columns.iter().map(|name| name.as_ref().to_string()));
    let indexes: Vec<Option<usize>> = columns
        .iter()
        .map(|name| dataset.column_index(name))
        .collect();

    let missing = indexes.iter().filter(|index| index.is_none()).count();
    if missing > 0 {
        tracing::debug!(missing, "projected columns not present in source");
    }

    let rows: Vec<Row> = dataset
        .rows()
        .iter()
        .map(|row| {
            indexes
                .iter()
                .map(|index| index.and_then(|index| row.get(index).cloned().flatten()))
                .collect()
        })
        .collect();

    Dataset::new(columns, rows)
}
