use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info_span;

use colsplit_cli::pipeline::{ExportPlan, copy_file, export_file, load_input};
use colsplit_cli::settings::{Settings, save_settings, to_toml};
use colsplit_model::RowsPerFile;
use colsplit_output::{ClipboardSink, CopyOutcome, ExportOutcome, SystemClipboard};

use crate::cli::{ColumnsArgs, ConfigArgs, CopyArgs, ExportArgs};
use crate::summary::{print_columns, print_copy, print_export};

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let span = info_span!("columns", file = %args.file.display());
    let _guard = span.enter();

    let loaded = load_input(&args.file)?;
    let selection = args.selection.plan().apply(&loaded.columns)?;
    print_columns(&loaded, &selection);
    Ok(())
}

pub fn run_export(args: &ExportArgs, settings: &Settings) -> Result<ExportOutcome> {
    let plan = export_plan(args, settings);
    let outcome = export_file(&args.file, &args.selection.plan(), &plan)?;
    print_export(&outcome, plan.format);
    Ok(outcome)
}

pub fn run_copy(args: &CopyArgs, settings: &Settings) -> Result<CopyOutcome> {
    let format = args.format.map_or(settings.export.format, Into::into);
    let mut clipboard = AnnouncedClipboard(SystemClipboard::new());
    let outcome = copy_file(
        &args.file,
        &args.selection.plan(),
        format,
        settings.export.csv,
        &mut clipboard,
    )?;
    print_copy(&outcome, format);
    Ok(outcome)
}

pub fn run_config(args: &ConfigArgs, settings: &Settings, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let state = if path.exists() { "" } else { " (not created)" };
            println!("Settings file: {}{state}", path.display());
            if args.init && !path.exists() {
                save_settings(settings, path)?;
                println!("Wrote default settings.");
            }
        }
        None => println!("Settings file: unavailable on this platform"),
    }
    println!();
    print!("{}", to_toml(settings)?);
    Ok(())
}

/// Tells the user why the command keeps running after the text is copied.
struct AnnouncedClipboard(SystemClipboard);

impl ClipboardSink for AnnouncedClipboard {
    fn write_text(&mut self, text: &str) -> colsplit_output::Result<()> {
        if SystemClipboard::holds_until_replaced() {
            eprintln!("Holding the copied text until another application takes the clipboard...");
        }
        self.0.write_text(text)
    }
}

/// Flags override settings; settings override built-in defaults.
fn export_plan(args: &ExportArgs, settings: &Settings) -> ExportPlan {
    let defaults = &settings.export;
    let rows_per_file = args
        .rows_per_file
        .as_deref()
        .map_or_else(|| defaults.rows_per_file(), RowsPerFile::parse_lenient);
    let mut style = defaults.csv;
    if args.no_bom {
        style.byte_order_mark = false;
    }
    ExportPlan {
        format: args.format.map_or(defaults.format, Into::into),
        rows_per_file,
        output_dir: args
            .output_dir
            .clone()
            .or_else(|| defaults.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(".")),
        name: args.name.clone(),
        style,
        overwrite: args.force,
    }
}
