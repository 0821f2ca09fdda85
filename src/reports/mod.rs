use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mulnim::analysis::Summary;
use mulnim::config::Config;
use mulnim::position::Position;
use mulnim::replacement::Replacement;

fn fmt_capacity(value: Option<u128>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "overflow".to_string(),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_capacity(
    config: &Config,
    alphabet: &[u32],
    theoretical: Option<u128>,
    after_exclusion: Option<u128>,
) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Parameter").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Piles (count)"), Cell::new(config.count)]);
    table.add_row(vec![Cell::new("Max value"), Cell::new(config.max_value)]);
    table.add_row(vec![Cell::new("Modulus"), Cell::new(config.modulus)]);
    table.add_row(vec![
        Cell::new("Alphabet"),
        Cell::new(format!("{} ({} symbols)", config.policy(), alphabet.len())),
    ]);
    table.add_row(vec![
        Cell::new("Total combinations"),
        Cell::new(fmt_capacity(theoretical)).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("After exclusion"),
        Cell::new(fmt_capacity(after_exclusion)).fg(Color::Cyan),
    ]);

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}

pub fn print_summary(s: &Summary) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(format!(
            "count={} max={} mod={}",
            s.count, s.max_value, s.modulus
        ))
        .add_attribute(Attribute::Bold),
        Cell::new("Positions").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Total"), Cell::new(s.total)]);
    table.add_row(vec![
        Cell::new("Losing"),
        Cell::new(s.losing).fg(Color::Green),
    ]);
    table.add_row(vec![Cell::new("Convertible"), Cell::new(s.convertible)]);
    table.add_row(vec![
        Cell::new("Non-convertible"),
        Cell::new(s.non_convertible_set).fg(Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Reduced non-convertible"),
        Cell::new(s.reduced_non_convertible).fg(Color::Red),
    ]);

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}

pub fn print_positions(title: &str, positions: &[Position]) {
    println!("\n{} ({} found, sorted by sum)", title, positions.len());
    if positions.is_empty() {
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Position").add_attribute(Attribute::Bold),
        Cell::new("Product"),
        Cell::new("Sum"),
    ]);
    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for p in positions {
        table.add_row(vec![
            Cell::new(p.to_string()),
            Cell::new(p.product().to_string()),
            Cell::new(p.sum()),
        ]);
    }
    println!("{}", table);
}

/// Target-product breakdown for positions replacement could not rescue.
pub fn print_replacement_details(replacements: &[Replacement], modulus: u32) {
    let unreachable: Vec<&Replacement> =
        replacements.iter().filter(|r| !r.is_reachable()).collect();
    if unreachable.is_empty() {
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Position").add_attribute(Attribute::Bold),
        Cell::new("Product"),
        Cell::new("Modulus"),
        Cell::new("m"),
        Cell::new("Target").fg(Color::Cyan),
    ]);
    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in unreachable {
        let target = r
            .target
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(r.position.to_string()),
            Cell::new(r.product.to_string()),
            Cell::new(modulus),
            Cell::new(r.residue),
            Cell::new(target).fg(Color::Cyan),
        ]);
    }
    println!("\nTarget products for reduced non-convertible positions:");
    println!("{}", table);
}
