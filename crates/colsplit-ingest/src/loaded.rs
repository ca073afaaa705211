//! Result of loading one input file.

use std::path::{Path, PathBuf};

use colsplit_model::Dataset;

use crate::decode::DetectedEncoding;

/// A parsed input file: the immutable dataset plus what was learned about it.
///
/// Each load produces a fresh value; nothing is merged with earlier loads.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Records in file order, columns in header order.
    pub dataset: Dataset,
    /// Working column list (sorted case-insensitively, deduplicated).
    pub columns: Vec<String>,
    pub encoding: DetectedEncoding,
    pub delimiter: u8,
    /// Path the data was read from, when it came from disk.
    pub source: Option<PathBuf>,
}

impl LoadedFile {
    pub fn new(dataset: Dataset, encoding: DetectedEncoding, delimiter: u8) -> Self {
        let columns = dataset.column_names();
        Self {
            dataset,
            columns,
            encoding,
            delimiter,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn total_rows(&self) -> usize {
        self.dataset.len()
    }

    /// File stem of the source, used to name exported files.
    pub fn base_name(&self) -> Option<String> {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
    }
}
