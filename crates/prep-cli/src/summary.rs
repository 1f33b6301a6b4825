use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use prep_validate::ConstraintReport;

use crate::types::RunResult;

/// Violations listed in the terminal table; the JSON report has all of them.
const MAX_VIOLATION_ROWS: usize = 20;

pub fn print_summary(result: &RunResult) {
    println!("Source: {} ({})", result.location, result.source);
    println!(
        "Loaded: {} rows x {} columns",
        result.loaded_rows, result.loaded_columns
    );
    if let Some(report) = &result.constraint_report {
        println!("{report}");
    }
    if let Some(path) = &result.report_json {
        println!("Constraint report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Artifact"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Path"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for artifact in &result.artifacts {
        table.add_row(vec![
            Cell::new(artifact.label)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(artifact.rows),
            Cell::new(artifact.columns),
            Cell::new(artifact.path.display()),
        ]);
    }
    println!("{table}");

    if let Some(report) = &result.constraint_report {
        print_violation_table(report);
    }
}

fn print_violation_table(report: &ConstraintReport) {
    if report.is_clean() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Row"), header_cell(&report.column)]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for violation in report.violations.iter().take(MAX_VIOLATION_ROWS) {
        let value = match &violation.value {
            Some(value) => Cell::new(value).fg(Color::Yellow),
            None => dim_cell("<missing>"),
        };
        table.add_row(vec![Cell::new(violation.row), value]);
    }
    let hidden = report.violation_count().saturating_sub(MAX_VIOLATION_ROWS);
    if hidden > 0 {
        table.add_row(vec![dim_cell("..."), dim_cell(format!("{hidden} more"))]);
    }
    println!();
    println!("Constraint violations:");
    println!("{table}");
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
