//! Export and copy actions over a column selection.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, info_span, warn};

use colsplit_core::{ColumnSelection, chunk};
use colsplit_model::{Dataset, Deliverable, OutputFormat, RowsPerFile};

use crate::error::{OutputError, Result};
use crate::naming::ExportNaming;
use crate::package::package;
use crate::render::{CsvStyle, render};
use crate::sink::{ClipboardSink, SaveSink};

/// Everything needed to export one selection to files.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub dataset: &'a Dataset,
    pub selection: &'a ColumnSelection,
    pub format: OutputFormat,
    pub rows_per_file: RowsPerFile,
    pub naming: ExportNaming,
    pub style: CsvStyle,
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub file_name: String,
    pub location: PathBuf,
    /// Archive entry names; empty for a single document.
    pub entries: Vec<String>,
    pub rows: usize,
    pub columns: usize,
    pub bytes: usize,
}

impl ExportOutcome {
    pub fn is_archive(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.entries.len().max(1)
    }
}

/// Project, chunk, render and package the selection, then save it.
///
/// An empty selection fails with [`OutputError::NoSelection`] before
/// anything is rendered or handed to `sink`.
pub fn export_selection(
    request: &ExportRequest<'_>,
    sink: &mut dyn SaveSink,
) -> Result<ExportOutcome> {
    let span = info_span!(
        "export",
        format = %request.format,
        rows_per_file = %request.rows_per_file
    );
    let _guard = span.enter();
    let start = Instant::now();

    if request.selection.is_empty() {
        warn!("export requested with no columns selected");
        return Err(OutputError::NoSelection);
    }

    let projected = request.selection.project(request.dataset);
    let chunks = chunk(&projected, request.rows_per_file);
    let deliverable = package(&chunks, request.format, &request.naming, &request.style)?;
    let location = sink.save(deliverable.file_name(), deliverable.bytes())?;

    let entries = match &deliverable {
        Deliverable::Archive { entries, .. } => entries.clone(),
        Deliverable::Document { .. } => Vec::new(),
    };
    let outcome = ExportOutcome {
        file_name: deliverable.file_name().to_string(),
        location,
        entries,
        rows: projected.len(),
        columns: projected.columns().len(),
        bytes: deliverable.bytes().len(),
    };
    info!(
        file = %outcome.file_name,
        documents = outcome.document_count(),
        rows = outcome.rows,
        columns = outcome.columns,
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(outcome)
}

/// Everything needed to copy one selection to the clipboard.
#[derive(Debug, Clone)]
pub struct CopyRequest<'a> {
    pub dataset: &'a Dataset,
    pub selection: &'a ColumnSelection,
    pub format: OutputFormat,
    /// Quoting applies; the byte order mark never does on the clipboard.
    pub style: CsvStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOutcome {
    pub rows: usize,
    pub columns: usize,
    pub chars: usize,
}

/// Render the whole selection as one document and put it on the clipboard.
///
/// Rows-per-file does not apply here.
pub fn copy_selection(
    request: &CopyRequest<'_>,
    sink: &mut dyn ClipboardSink,
) -> Result<CopyOutcome> {
    let span = info_span!("copy", format = %request.format);
    let _guard = span.enter();

    if request.selection.is_empty() {
        warn!("copy requested with no columns selected");
        return Err(OutputError::NoSelection);
    }

    let projected = request.selection.project(request.dataset);
    let text = render(
        &projected.as_chunk(),
        request.format,
        &request.style.without_bom(),
    )?;
    if let Err(err) = sink.write_text(&text) {
        warn!(error = %err, "clipboard write rejected");
        return Err(err);
    }

    let outcome = CopyOutcome {
        rows: projected.len(),
        columns: projected.columns().len(),
        chars: text.chars().count(),
    };
    info!(rows = outcome.rows, columns = outcome.columns, "copied to clipboard");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemoryClipboard;

    #[derive(Default)]
    struct RecordingSink {
        saved: Vec<(String, Vec<u8>)>,
    }

    impl SaveSink for RecordingSink {
        fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
            self.saved.push((file_name.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(file_name))
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["id".to_string(), "name".to_string(), "secret".to_string()],
            (1..=5)
                .map(|n| {
                    vec![
                        Some(n.to_string()),
                        Some(format!("user{n}")),
                        Some("x".to_string()),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn empty_selection_has_no_side_effects() {
        let dataset = dataset();
        let selection = ColumnSelection::new(dataset.column_names());
        let mut sink = RecordingSink::default();
        let request = ExportRequest {
            dataset: &dataset,
            selection: &selection,
            format: OutputFormat::Csv,
            rows_per_file: RowsPerFile::Unbounded,
            naming: ExportNaming::default(),
            style: CsvStyle::default(),
        };
        let err = export_selection(&request, &mut sink).unwrap_err();
        assert!(matches!(err, OutputError::NoSelection));
        assert!(sink.saved.is_empty());

        let mut clipboard = MemoryClipboard::new().with_contents("untouched");
        let copy = CopyRequest {
            dataset: &dataset,
            selection: &selection,
            format: OutputFormat::Csv,
            style: CsvStyle::default(),
        };
        assert!(matches!(
            copy_selection(&copy, &mut clipboard),
            Err(OutputError::NoSelection)
        ));
        assert_eq!(clipboard.contents(), Some("untouched"));
    }

    #[test]
    fn split_export_saves_one_archive() {
        let dataset = dataset();
        let mut selection = ColumnSelection::new(dataset.column_names());
        selection.set_selected("name", true).unwrap();
        let mut sink = RecordingSink::default();
        let request = ExportRequest {
            dataset: &dataset,
            selection: &selection,
            format: OutputFormat::Json,
            rows_per_file: RowsPerFile::from_count(2),
            naming: ExportNaming::new("users"),
            style: CsvStyle::default(),
        };
        let outcome = export_selection(&request, &mut sink).unwrap();
        assert_eq!(outcome.file_name, "users_split.zip");
        assert_eq!(
            outcome.entries,
            vec!["users_part1.json", "users_part2.json", "users_part3.json"]
        );
        assert_eq!(outcome.rows, 5);
        assert_eq!(outcome.columns, 1);
        assert_eq!(sink.saved.len(), 1);
    }

    #[test]
    fn copy_ignores_bom_and_row_limit() {
        let dataset = dataset();
        let mut selection = ColumnSelection::new(dataset.column_names());
        selection.set_selected("id", true).unwrap();
        let mut clipboard = MemoryClipboard::new();
        let request = CopyRequest {
            dataset: &dataset,
            selection: &selection,
            format: OutputFormat::Csv,
            style: CsvStyle::default(),
        };
        let outcome = copy_selection(&request, &mut clipboard).unwrap();
        assert_eq!(outcome.rows, 5);
        assert_eq!(
            clipboard.contents(),
            Some("\"id\"\r\n\"1\"\r\n\"2\"\r\n\"3\"\r\n\"4\"\r\n\"5\"\r\n")
        );
    }

    #[test]
    fn rejected_clipboard_is_reported() {
        let dataset = dataset();
        let mut selection = ColumnSelection::new(dataset.column_names());
        selection.select_all_visible();
        let mut clipboard = MemoryClipboard::rejecting().with_contents("keep");
        let request = CopyRequest {
            dataset: &dataset,
            selection: &selection,
            format: OutputFormat::Json,
            style: CsvStyle::default(),
        };
        let err = copy_selection(&request, &mut clipboard).unwrap_err();
        assert!(err.is_warning());
        assert_eq!(clipboard.contents(), Some("keep"));
    }
}
