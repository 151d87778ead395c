//! Output rendering for parsed documents.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use csvrows_ingest::Document;

/// Renders one line per row as `key: value` pairs separated by two spaces.
pub fn render_text(document: &Document) -> String {
    let mut out = String::new();
    for row in document {
        let line = row
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Renders the document as a grid with the header as column titles.
pub fn render_table(document: &Document) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(document.header().iter().enumerate().map(|(idx, name)| {
        if name.is_empty() {
            dim_cell(format!("#{}", idx + 1))
        } else {
            header_cell(name)
        }
    }));
    for row in document {
        table.add_row(row.values().map(Cell::new));
    }
    table
}

/// Renders the document as pretty-printed JSON.
pub fn render_json(document: &Document) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
