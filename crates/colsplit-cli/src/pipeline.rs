//! Load, select, export and copy steps shared by the subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use colsplit_core::{ColumnSelection, SelectionError};
use colsplit_ingest::{IngestOptions, LoadedFile, read_csv_file};
use colsplit_model::{OutputFormat, RowsPerFile};
use colsplit_output::{
    ClipboardSink, CopyOutcome, CopyRequest, CsvStyle, DirectorySink, ExportNaming,
    ExportOutcome, ExportRequest, copy_selection, export_selection,
};

/// Selection flags, applied in a fixed order: filter, select all visible,
/// deselect all visible, then per-column toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPlan {
    pub filter: Option<String>,
    pub select_all: bool,
    pub deselect_all: bool,
    pub toggles: Vec<String>,
}

impl SelectionPlan {
    /// Build a fresh selection over `columns` and replay the flags on it.
    pub fn apply(&self, columns: &[String]) -> std::result::Result<ColumnSelection, SelectionError> {
        let mut selection = ColumnSelection::new(columns.iter().cloned());
        if let Some(filter) = &self.filter {
            selection.set_filter(filter);
        }
        if self.select_all {
            selection.select_all_visible();
        }
        if self.deselect_all {
            selection.deselect_all_visible();
        }
        for column in &self.toggles {
            let name = selection
                .find_column(column)
                .map_or_else(|| column.clone(), str::to_string);
            selection.toggle(&name)?;
        }
        debug!(
            selected = selection.selected_count(),
            visible = selection.visible_columns().count(),
            "applied selection flags"
        );
        Ok(selection)
    }
}

/// Export options after merging flags over settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub format: OutputFormat,
    pub rows_per_file: RowsPerFile,
    pub output_dir: PathBuf,
    /// Explicit base name; `selected_<input stem>` is used otherwise.
    pub name: Option<String>,
    pub style: CsvStyle,
    pub overwrite: bool,
}

pub fn load_input(path: &Path) -> Result<LoadedFile> {
    read_csv_file(path, &IngestOptions::default())
        .with_context(|| format!("load {}", path.display()))
}

/// Load `input`, apply `plan`, and write the export to disk.
pub fn export_file(
    input: &Path,
    selection: &SelectionPlan,
    plan: &ExportPlan,
) -> Result<ExportOutcome> {
    let span = info_span!("export_file", input = %input.display());
    let _guard = span.enter();

    let loaded = load_input(input)?;
    let columns = selection.apply(&loaded.columns)?;
    let request = ExportRequest {
        dataset: &loaded.dataset,
        selection: &columns,
        format: plan.format,
        rows_per_file: plan.rows_per_file,
        naming: ExportNaming::resolve(plan.name.as_deref(), loaded.base_name().as_deref()),
        style: plan.style,
    };
    let mut sink = DirectorySink::new(&plan.output_dir)
        .with_overwrite(plan.overwrite)
        .protecting(input);
    let outcome = export_selection(&request, &mut sink)?;
    Ok(outcome)
}

/// Load `input`, apply the selection, and copy it to `clipboard`.
pub fn copy_file(
    input: &Path,
    selection: &SelectionPlan,
    format: OutputFormat,
    style: CsvStyle,
    clipboard: &mut dyn ClipboardSink,
) -> Result<CopyOutcome> {
    let span = info_span!("copy_file", input = %input.display());
    let _guard = span.enter();

    let loaded = load_input(input)?;
    let columns = selection.apply(&loaded.columns)?;
    let request = CopyRequest {
        dataset: &loaded.dataset,
        selection: &columns,
        format,
        style,
    };
    let outcome = copy_selection(&request, clipboard)?;
    Ok(outcome)
}
