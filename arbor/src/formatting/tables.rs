//! Table formatting utilities using comfy-table.

use comfy_table::{Cell, Table};

/// Prints a table with bold headers; the first column is highlighted.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(*h).add_attribute(comfy_table::Attribute::Bold))
        .collect();
    table
        .set_header(header_cells)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for row in rows {
        let row_cells: Vec<Cell> = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                if idx == 0 {
                    Cell::new(cell).fg(comfy_table::Color::White)
                } else {
                    Cell::new(cell).fg(comfy_table::Color::DarkGrey)
                }
            })
            .collect();
        table.add_row(row_cells);
    }

    println!("{}", table);
}
