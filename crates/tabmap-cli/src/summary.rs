use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabmap_cli::pipeline::{FilePreview, ImportOutcome, MappingSummary};

/// Mapping table and notices on stderr; stdout carries the result JSON.
pub fn print_mapping_summary(outcome: &ImportOutcome) {
    eprintln!("Header row: {}", outcome.header_row);
    if let Some(notice) = &outcome.notice {
        eprintln!("{notice}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Source column"),
        header_cell("Destination"),
        header_cell("Included"),
        header_cell("Origin"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for mapping in &outcome.mappings {
        table.add_row(vec![
            Cell::new(mapping.index),
            name_cell(&mapping.name),
            destination_cell(mapping),
            include_cell(mapping.include),
            origin_cell(mapping),
        ]);
    }
    eprintln!("{table}");
    eprintln!(
        "{} rows, {} columns",
        outcome.result.num_rows, outcome.result.num_columns
    );
    print_warnings(&outcome.warnings);
}

pub fn print_preview(file_preview: &FilePreview) {
    let preview = &file_preview.rows;
    let suggested_header = file_preview.suggested_header;
    if let Some(notice) = &file_preview.notice {
        println!("{notice}");
    }
    let width = preview
        .rows
        .iter()
        .map(|row| row.values.len())
        .max()
        .unwrap_or(0);

    let mut table = Table::new();
    let mut header = vec![header_cell("Row")];
    header.extend((0..width).map(|column| header_cell(&column.to_string())));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in &preview.rows {
        let mut cells = Vec::with_capacity(width + 1);
        if row.index == suggested_header {
            cells.push(
                Cell::new(row.index)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            );
        } else {
            cells.push(Cell::new(row.index));
        }
        cells.extend((0..width).map(|column| match row.values.get(column) {
            Some(value) => Cell::new(value),
            None => dim_cell(""),
        }));
        table.add_row(cells);
    }
    println!("{table}");
    if preview.is_truncated() {
        println!(
            "Showing {} of {} rows",
            preview.rows.len(),
            preview.total_rows
        );
    }
    println!("Suggested header row: {suggested_header}");
    print_warnings(&file_preview.warnings);
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("Warnings:");
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
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

fn name_cell(name: &str) -> Cell {
    if name.is_empty() {
        dim_cell("(blank)")
    } else {
        Cell::new(name)
    }
}

fn destination_cell(mapping: &MappingSummary) -> Cell {
    match &mapping.key {
        Some(key) => Cell::new(key)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn include_cell(include: bool) -> Cell {
    if include {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Yellow)
    }
}

fn origin_cell(mapping: &MappingSummary) -> Cell {
    match (&mapping.key, mapping.suggested) {
        (None, _) => dim_cell("-"),
        (Some(_), true) => Cell::new("suggested"),
        (Some(_), false) => Cell::new("--map"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
