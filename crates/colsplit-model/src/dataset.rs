//! Row-oriented dataset storage.

use crate::columns::sort_columns;

/// One row of cell values, positionally aligned with [`Dataset::columns`].
///
/// `None` marks an absent value: the source row was too short, or the column
/// does not exist in the source at all.
pub type Row = Vec<Option<String>>;

/// An ordered sequence of records sharing one column set.
///
/// Ingested datasets keep the header order of the source file; projected
/// datasets keep the canonical (sorted) order of the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset, padding or truncating every row to the column count.
    pub fn new(columns: Vec<String>, mut rows: Vec<Row>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, None);
        }
        Self { columns, rows }
    }

    /// A dataset with a header but no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The working column list: sorted case-insensitively, deduplicated.
    pub fn column_names(&self) -> Vec<String> {
        sort_columns(self.columns.iter().cloned())
    }

    /// Position of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn record(&self, index: usize) -> Option<RecordRef<'_>> {
        self.rows.get(index).map(|values| RecordRef {
            columns: &self.columns,
            values,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = RecordRef<'_>> {
        self.rows.iter().map(|values| RecordRef {
            columns: &self.columns,
            values,
        })
    }

    /// View the whole dataset as a single chunk (part 1).
    pub fn as_chunk(&self) -> Chunk<'_> {
        Chunk {
            part: 1,
            columns: &self.columns,
            rows: &self.rows,
        }
    }
}

/// Borrowed view of one record, keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct RecordRef<'a> {
    columns: &'a [String],
    values: &'a [Option<String>],
}

impl<'a> RecordRef<'a> {
    /// Value for the first column named `name`; `None` when the column is
    /// unknown or the value is absent.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        let index = self.columns.iter().position(|column| column == name)?;
        self.values.get(index)?.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + use<'a> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(column, value)| (column.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A contiguous, non-overlapping slice of a dataset's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// 1-based part number, used for archive entry names.
    pub part: usize,
    pub columns: &'a [String],
    pub rows: &'a [Row],
}

impl<'a> Chunk<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = RecordRef<'a>> + use<'a> {
        let columns = self.columns;
        self.rows.iter().map(move |values| RecordRef { columns, values })
    }

    /// Copy the chunk into an owned dataset.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            columns: self.columns.to_vec(),
            rows: self.rows.to_vec(),
        }
    }
}
