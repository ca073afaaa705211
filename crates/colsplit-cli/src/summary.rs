use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use colsplit_core::ColumnSelection;
use colsplit_ingest::LoadedFile;
use colsplit_model::OutputFormat;
use colsplit_output::{CopyOutcome, ExportOutcome};

/// Checklist of the visible columns, with fill counts.
pub fn print_columns(loaded: &LoadedFile, selection: &ColumnSelection) {
    if let Some(source) = &loaded.source {
        println!("File: {}", source.display());
    }
    println!(
        "Encoding: {}  Delimiter: {}",
        loaded.encoding,
        delimiter_label(loaded.delimiter)
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Column"),
        header_cell("Filled"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut visible = 0usize;
    for column in selection.visible_columns() {
        visible += 1;
        let selected = selection.is_selected(column);
        let filled = filled_count(loaded, column);
        table.add_row(vec![
            check_cell(selected),
            if selected {
                Cell::new(column).add_attribute(Attribute::Bold)
            } else {
                Cell::new(column)
            },
            Cell::new(filled),
        ]);
    }
    if visible > 0 {
        println!("{table}");
    } else {
        println!("No columns match \"{}\".", selection.filter());
    }

    println!(
        "{} of {} columns shown, {} selected",
        visible,
        selection.columns().len(),
        selection.selected_count()
    );
    println!("(Total rows: {})", loaded.total_rows());
    println!("Rows per file: All rows ({})", loaded.total_rows());
}

pub fn print_export(outcome: &ExportOutcome, format: OutputFormat) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Format"),
        header_cell("Documents"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Bytes"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(&outcome.file_name)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format.label()),
        Cell::new(outcome.document_count()),
        Cell::new(outcome.rows),
        Cell::new(outcome.columns),
        Cell::new(outcome.bytes),
    ]);
    println!("{table}");
    if outcome.is_archive() {
        for entry in &outcome.entries {
            println!("  {entry}");
        }
    }
    println!("Saved: {}", outcome.location.display());
}

pub fn print_copy(outcome: &CopyOutcome, format: OutputFormat) {
    println!(
        "Copied {} rows x {} columns to the clipboard as {} ({} characters).",
        outcome.rows,
        outcome.columns,
        format.label(),
        outcome.chars
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn filled_count(loaded: &LoadedFile, column: &str) -> usize {
    let Some(index) = loaded.dataset.column_index(column) else {
        return 0;
    };
    loaded
        .dataset
        .rows()
        .iter()
        .filter(|row| row.get(index).and_then(Option::as_deref).is_some_and(|v| !v.is_empty()))
        .count()
}

fn delimiter_label(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tab".to_string(),
        other => format!("'{}'", char::from(other)),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn check_cell(selected: bool) -> Cell {
    if selected {
        Cell::new("[x]").fg(Color::Green)
    } else {
        dim_cell("[ ]")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
