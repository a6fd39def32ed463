use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use hdh_ingest::DatasetOrigin;
use hdh_model::StatusLabel;

use crate::types::{CatalogStats, FacetListing, SearchOutcome};

pub fn print_search(outcome: &SearchOutcome) {
    print_origin(outcome.origin);
    if outcome.rows.is_empty() {
        println!("No project matches the selected filters.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Référence"),
            header_cell("Titre"),
            header_cell("Sources"),
            header_cell("Domaine"),
            header_cell("Statut"),
        ]);
        apply_table_style(&mut table);
        for row in &outcome.rows {
            table.add_row(vec![
                Cell::new(&row.reference)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(&row.title),
                text_cell(&row.sources),
                text_cell(&row.domain),
                status_cell(&row.status),
            ]);
        }
        println!("{table}");
    }
    if outcome.rows.len() < outcome.match_count {
        println!(
            "Showing {} of {} matching projects.",
            outcome.rows.len(),
            outcome.match_count
        );
    }
    print_counts(
        outcome.match_count,
        outcome.total_records,
        outcome.in_progress,
        outcome.completed,
    );
    if let Some(path) = &outcome.export {
        println!("Exported: {}", path.display());
    }
}

pub fn print_facets(listing: &FacetListing) {
    let mut table = Table::new();
    table.set_header(vec![header_cell(&listing.target)]);
    apply_table_style(&mut table);
    for option in &listing.options {
        table.add_row(vec![Cell::new(option)]);
    }
    println!("{table}");
}

pub fn print_stats(stats: &CatalogStats) {
    println!("Register: {}", stats.source.display());
    print_origin(stats.origin);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statut"), header_cell("Projets")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        status_cell(StatusLabel::InProgress.as_str()),
        Cell::new(stats.in_progress),
    ]);
    table.add_row(vec![
        status_cell(StatusLabel::Completed.as_str()),
        Cell::new(stats.completed),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_records).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_origin(origin: Option<DatasetOrigin>) {
    match origin {
        Some(DatasetOrigin::Fallback) => {
            println!("Warning: register unavailable, showing the fallback file.");
        }
        Some(DatasetOrigin::Empty) => {
            println!("Warning: no register source could be read.");
        }
        Some(DatasetOrigin::Primary) | None => {}
    }
}

fn print_counts(matches: usize, total: usize, in_progress: usize, completed: usize) {
    println!(
        "{matches} of {total} projects ({in_progress} {}, {completed} {})",
        StatusLabel::InProgress,
        StatusLabel::Completed
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() == 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
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

fn status_cell(status: &str) -> Cell {
    let color = if status == StatusLabel::Completed.as_str() {
        Color::Green
    } else {
        Color::Yellow
    };
    Cell::new(status).fg(color)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
