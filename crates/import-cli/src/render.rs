//! Terminal rendering of wizard state.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use import_map::{ColumnMapping, DEFAULT_LABEL};
use import_model::{SaveRequest, Table as DataTable};
use import_validate::ValidationReport;
use import_wizard::{Step, Wizard};

/// Maximum number of rows printed per table.
pub const MAX_ROWS: usize = 50;

/// Step indicator line, e.g. "Step 2 of 3 - Preview".
pub fn step_line(wizard: &Wizard) -> String {
    let title = match wizard.step() {
        Step::Upload => "Upload",
        Step::Editing => "Map columns and fix cells",
        Step::Previewing => "Preview",
        Step::Success => "Saved",
        Step::Failed => "Save failed",
    };
    match wizard.step_label() {
        Some(label) => format!("{label} - {title}"),
        None => title.to_string(),
    }
}

/// One word describing how a column will be treated on save.
pub fn column_status(mapping: &ColumnMapping, column: &str) -> &'static str {
    match mapping.label(column) {
        None => "unknown",
        Some(DEFAULT_LABEL) => "excluded",
        Some(label) if !mapping.is_recognized(column, label) => "unrecognized",
        Some(_) if mapping.is_read_only(column) => "unmapped",
        Some(label) if label == column => "kept",
        Some(_) => "renamed",
    }
}

/// Column, label, status and selector options for every column.
pub fn mapping_table(mapping: &ColumnMapping) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Label"),
        header_cell("Status"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    for (column, label) in mapping.labels() {
        let status = column_status(mapping, column);
        let status_cell = match status {
            "renamed" => Cell::new(status).fg(Color::Green),
            "unmapped" | "unrecognized" => Cell::new(status).fg(Color::Yellow),
            "excluded" => dim_cell(status),
            _ => Cell::new(status),
        };
        table.add_row(vec![
            Cell::new(column).add_attribute(Attribute::Bold),
            Cell::new(label),
            status_cell,
            dim_cell(mapping.options(column).join(", ")),
        ]);
    }
    table
}

/// The table being edited, with invalid cells marked and read-only
/// columns dimmed.
pub fn editing_table(wizard: &Wizard) -> Table {
    let mapping = wizard.mapping();
    let report = wizard.validation_report();
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    for (column, label) in mapping.labels() {
        let mut text = column.to_string();
        if label != column {
            text.push_str(&format!("\n-> {label}"));
        }
        if mapping.is_flagged_unmapped(column) {
            text.push_str("\n(unmapped)");
        }
        header.push(if mapping.is_read_only(column) {
            dim_cell(text)
        } else {
            header_cell(&text)
        });
    }
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (index, row) in wizard.table().rows().iter().take(MAX_ROWS).enumerate() {
        let mut cells = vec![dim_cell(index + 1)];
        for column in mapping.columns() {
            let value = row.get(column).unwrap_or_default();
            let cell = if report.is_flagged(index, column) {
                Cell::new(format!("{value} ✗"))
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold)
            } else if mapping.is_read_only(column) {
                dim_cell(value)
            } else {
                Cell::new(value)
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }
    table
}

/// The rows that will be sent.
pub fn preview_table(preview: &DataTable) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(preview.columns().iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, row) in preview.rows().iter().take(MAX_ROWS).enumerate() {
        let mut cells = vec![dim_cell(index + 1)];
        cells.extend(
            preview
                .columns()
                .iter()
                .map(|column| Cell::new(row.get(column).unwrap_or_default())),
        );
        table.add_row(cells);
    }
    table
}

/// Invalid cells, one line each; `None` when every cell is valid.
pub fn issue_table(report: &ValidationReport) -> Option<Table> {
    if report.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for issue in &report.issues {
        table.add_row(vec![
            Cell::new(issue.row + 1),
            Cell::new(&issue.column),
            Cell::new(&issue.field),
            Cell::new(&issue.value).fg(Color::Red),
        ]);
    }
    Some(table)
}

/// The JSON body a save would send.
pub fn payload_json(preview: &DataTable, template_name: Option<&str>) -> serde_json::Result<String> {
    let request = match template_name {
        Some(name) => SaveRequest::template(preview, name),
        None => SaveRequest::data(preview),
    };
    serde_json::to_string_pretty(&request)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
