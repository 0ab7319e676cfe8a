use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{GenerateResult, TableSummary};

pub fn print_summary(result: &GenerateResult) {
    println!("Master data: {}", result.master_dir.display());
    println!("{}", tables_table(&result.tables));
    println!();
    println!("{}", run_table(result));
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: dry run, nothing written"),
    }
}

fn tables_table(tables: &[TableSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Used"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for summary in tables {
        let name = if summary.used {
            Cell::new(&summary.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell(&summary.name)
        };
        table.add_row(vec![
            name,
            Cell::new(summary.rows),
            Cell::new(summary.columns),
            used_cell(summary.used),
        ]);
    }
    table
}

fn run_table(result: &GenerateResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let seed = if result.seed_fixed {
        Cell::new(result.seed)
    } else {
        Cell::new(format!("{} (random)", result.seed)).fg(Color::Yellow)
    };
    table.add_row(vec![Cell::new("Seed"), seed]);
    table.add_row(vec![Cell::new("Requested"), Cell::new(result.requested)]);
    table.add_row(vec![Cell::new("Generated"), Cell::new(result.generated)]);
    table.add_row(vec![
        Cell::new("Duplicates removed"),
        count_cell(result.duplicates_removed, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Records written"),
        Cell::new(result.written)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Customers"),
        Cell::new(result.customers_assigned),
    ]);
    table.add_row(vec![
        Cell::new("Seat combinations"),
        Cell::new(result.universe_size),
    ]);
    table.add_row(vec![
        Cell::new("Seat pool resets"),
        count_cell(result.seat_resets, Color::Yellow),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn used_cell(used: bool) -> Cell {
    if used {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
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
