//! Delimited text reading with a single header row.

use std::path::Path;
use std::time::Instant;

use csv::ReaderBuilder;
use tracing::{debug, info, info_span, warn};

use colsplit_model::{Dataset, Row};

use crate::decode::{DetectedEncoding, decode_bytes};
use crate::delimiter::detect_delimiter;
use crate::error::{IngestError, Result};
use crate::loaded::LoadedFile;

/// Maximum file size for loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Options controlling how input text is parsed.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Field delimiter; detected from the content when `None`.
    pub delimiter: Option<u8>,
    /// Files larger than this are refused before reading.
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Check file size against a limit, returning the size in bytes.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(metadata.len())
}

/// Load a delimited text file from disk.
pub fn read_csv_file(path: &Path, options: &IngestOptions) -> Result<LoadedFile> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let size = check_file_size_with_limit(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::open(path, e))?;
    let loaded = read_csv_bytes(&bytes, options)?.with_source(path);

    info!(
        bytes = size,
        rows = loaded.total_rows(),
        columns = loaded.columns.len(),
        encoding = loaded.encoding.label(),
        duration_ms = start.elapsed().as_millis(),
        "file loaded"
    );
    Ok(loaded)
}

/// Load delimited text from raw bytes, detecting the encoding.
pub fn read_csv_bytes(bytes: &[u8], options: &IngestOptions) -> Result<LoadedFile> {
    let (text, encoding) = decode_bytes(bytes);
    parse_text(&text, encoding, options)
}

/// Load delimited text that is already decoded.
pub fn read_csv_str(text: &str, options: &IngestOptions) -> Result<LoadedFile> {
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => parse_text(stripped, DetectedEncoding::Utf8Bom, options),
        None => parse_text(text, DetectedEncoding::Utf8, options),
    }
}

fn parse_text(text: &str, encoding: DetectedEncoding, options: &IngestOptions) -> Result<LoadedFile> {
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(text));

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|source| IngestError::CsvParse { record: 0, source })?
            .iter()
            .map(str::to_string)
            .collect(),
        None => {
            debug!("input is empty");
            return Ok(LoadedFile::new(Dataset::default(), encoding, delimiter));
        }
    };

    let width = header.len();
    let mut rows: Vec<Row> = Vec::new();
    let mut ragged = 0usize;
    for (index, record) in records.enumerate() {
        let record = record.map_err(|source| IngestError::CsvParse {
            record: index as u64 + 1,
            source,
        })?;
        if record.len() != width {
            ragged += 1;
        }
        let row: Row = (0..width)
            .map(|column| record.get(column).map(str::to_string))
            .collect();
        rows.push(row);
    }

    if ragged > 0 {
        warn!(
            ragged_rows = ragged,
            expected_fields = width,
            "rows with inconsistent field counts were padded or truncated"
        );
    }

    Ok(LoadedFile::new(Dataset::new(header, rows), encoding, delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn opts() -> IngestOptions {
        IngestOptions::default()
    }

    #[test]
    fn test_reads_header_and_rows() {
        let loaded = read_csv_str("b,A,c\n1,2,3\n4,5,6\n", &opts()).unwrap();
        assert_eq!(loaded.dataset.columns(), ["b", "A", "c"]);
        assert_eq!(loaded.columns, vec!["A", "b", "c"]);
        assert_eq!(loaded.total_rows(), 2);
        assert_eq!(loaded.dataset.record(1).unwrap().get("A"), Some("5"));
    }

    #[test]
    fn test_header_only_file_keeps_columns() {
        let loaded = read_csv_str("name,email\n", &opts()).unwrap();
        assert_eq!(loaded.columns, vec!["email", "name"]);
        assert_eq!(loaded.total_rows(), 0);
    }

    #[test]
    fn test_empty_input() {
        let loaded = read_csv_str("", &opts()).unwrap();
        assert!(loaded.columns.is_empty());
        assert!(loaded.dataset.is_empty());
    }

    #[test]
    fn test_ragged_rows_are_tolerated() {
        let loaded = read_csv_str("a,b,c\n1\n1,2,3,4\n", &opts()).unwrap();
        assert_eq!(loaded.total_rows(), 2);
        assert_eq!(
            loaded.dataset.rows()[0],
            vec![Some("1".to_string()), None, None]
        );
        assert_eq!(loaded.dataset.rows()[1].len(), 3);
    }

    #[test]
    fn test_values_are_verbatim() {
        let loaded = read_csv_str("a,b\n\"  padded \",\"x, \"\"y\"\"\"\n", &opts()).unwrap();
        let record = loaded.dataset.record(0).unwrap();
        assert_eq!(record.get("a"), Some("  padded "));
        assert_eq!(record.get("b"), Some("x, \"y\""));
    }

    #[test]
    fn test_empty_cell_is_present() {
        let loaded = read_csv_str("a,b\n,2\n", &opts()).unwrap();
        assert_eq!(loaded.dataset.rows()[0][0], Some(String::new()));
    }

    #[test]
    fn test_bom_is_stripped_from_header() {
        let loaded = read_csv_str("\u{feff}id,name\n1,x\n", &opts()).unwrap();
        assert_eq!(loaded.dataset.columns(), ["id", "name"]);
        assert_eq!(loaded.encoding, DetectedEncoding::Utf8Bom);
    }

    #[test]
    fn test_explicit_delimiter() {
        let options = IngestOptions::default().with_delimiter(b';');
        let loaded = read_csv_str("a,b;c\n1,2;3\n", &options).unwrap();
        assert_eq!(loaded.dataset.columns(), ["a,b", "c"]);
        assert_eq!(loaded.delimiter, b';');
    }

    #[test]
    fn test_read_file_with_legacy_encoding() {
        let file = create_temp_csv(b"name,city\nJos\xE9,M\xFCnchen\n");
        let loaded = read_csv_file(file.path(), &opts()).unwrap();
        assert_eq!(loaded.encoding, DetectedEncoding::Windows1252);
        assert_eq!(loaded.dataset.record(0).unwrap().get("city"), Some("München"));
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_file_not_found() {
        let result = read_csv_file(Path::new("/definitely/not/here.csv"), &opts());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_file_too_large() {
        let file = create_temp_csv(b"a,b\n1,2\n");
        let options = IngestOptions::default().with_max_file_size(4);
        let result = read_csv_file(file.path(), &options);
        assert!(matches!(result, Err(IngestError::FileTooLarge { size: 8, .. })));
    }
}
