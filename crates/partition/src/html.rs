//! HTML table reading.
//!
//! Used for uploaded HTML documents and for the `text_as_html` markup the
//! partition API attaches to table elements.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use sentinel_core::document::Table;

/// Upper bound on a single cell's `colspan`.
const MAX_COLSPAN: usize = 64;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("selector is valid"));

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("selector is valid"));

/// Reads every `<table>` in an HTML document.
///
/// The header row is the first row holding a `<th>` cell, or the first row
/// when the table has no `<th>` at all. Rows above the header are dropped.
/// Tables without rows are skipped.
#[must_use]
pub fn read_tables(html: &str) -> Vec<Table> {
    let document = Html::parse_document(html);
    document.select(&TABLE).filter_map(read_table).collect()
}

/// Reads the first table in an HTML fragment.
#[must_use]
pub fn parse_table(html: &str) -> Option<Table> {
    read_tables(html).into_iter().next()
}

fn read_table(table: ElementRef<'_>) -> Option<Table> {
    let rows: Vec<(bool, Vec<String>)> = table
        .select(&ROW)
        .filter(|row| owning_table(*row) == Some(table))
        .map(read_row)
        .collect();

    let header_index = rows.iter().position(|(has_th, _)| *has_th).unwrap_or(0);
    let mut rows = rows.into_iter().skip(header_index).map(|(_, cells)| cells);
    let headers = rows.next()?;

    Some(Table::new(headers, rows.collect()))
}

/// Nearest enclosing `<table>`, so nested tables keep their own rows.
fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

fn read_row(row: ElementRef<'_>) -> (bool, Vec<String>) {
    let mut has_th = false;
    let mut cells = Vec::new();

    for cell in row.children().filter_map(ElementRef::wrap) {
        let name = cell.value().name();
        if name != "td" && name != "th" {
            continue;
        }
        has_th |= name == "th";

        let text = cell_text(cell);
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1)
            .min(MAX_COLSPAN);
        cells.extend(std::iter::repeat_n(text, span));
    }

    (has_th, cells)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
