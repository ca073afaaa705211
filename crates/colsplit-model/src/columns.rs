//! Canonical column ordering.

use std::cmp::Ordering;

/// Compare two column names case-insensitively, breaking ties by the raw
/// string so the order is total.
pub fn compare_columns(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Returns the working column list: sorted with [`compare_columns`] and
/// without duplicates.
pub fn sort_columns<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut columns: Vec<String> = names.into_iter().map(Into::into).collect();
    columns.sort_by(|a, b| compare_columns(a, b));
    columns.dedup();
    columns
}
