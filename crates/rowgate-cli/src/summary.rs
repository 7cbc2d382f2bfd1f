use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rowgate_model::{MissingPolicy, RuleSet, RunStats};
use rowgate_sink::Destination;

pub fn print_summary(stats: &RunStats, destination: &Destination) {
    println!("{}", summary_table(stats, destination));
    if !stats.warnings.is_empty() {
        println!();
        println!("Rejected rows:");
        println!("{}", warning_table(&stats.warnings));
    }
}

pub fn print_rules(rules: &RuleSet) {
    println!("{}", rules_table(rules));
}

fn summary_table(stats: &RunStats, destination: &Destination) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Destination"),
        header_cell("Stage"),
        header_cell("Total"),
        header_cell("Inserted"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let (stage, inserted) = if stats.is_persisted() {
        (
            Cell::new("persisted").fg(Color::Green),
            count_cell(stats.inserted_rows, Color::Green),
        )
    } else {
        (dim_cell("validated (dry run)"), dim_cell("-"))
    };
    table.add_row(vec![
        Cell::new(destination),
        stage,
        Cell::new(stats.total_rows).add_attribute(Attribute::Bold),
        inserted,
        count_cell(stats.skipped_rows, Color::Yellow),
    ]);
    table
}

fn warning_table(warnings: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Diagnostic")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, warning) in warnings.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(warning)]);
    }
    table
}

fn rules_table(rules: &RuleSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Missing"),
        header_cell("Constraint"),
    ]);
    apply_table_style(&mut table);
    for rule in &rules.rules {
        let missing = match rule.missing {
            MissingPolicy::NullSubstitute => dim_cell("null"),
            MissingPolicy::Reject => Cell::new("reject").fg(Color::Yellow),
        };
        let constraint = match &rule.constraint {
            Some(constraint) => Cell::new(constraint.describe()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(rule.column.trim()).add_attribute(Attribute::Bold),
            Cell::new("numeric"),
            missing,
            constraint,
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
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
