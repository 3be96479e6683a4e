//! Plain-text rendering of resource tables for the terminal.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use resources::format::asset_url;
use resources::rich_text::plain_excerpt;
use resources::table::{Column, TableRow, TableView};
use resources::Record;
use serde_json::{Map, Value};

const EXCERPT_CHARS: usize = 240;
const SELECT_COLUMN: &str = "ID";

/// Aligned columns, an `ID` column first, one line per row.
#[must_use]
pub fn table(columns: &[Column], rows: &[&Record]) -> String {
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    let mut header = vec![SELECT_COLUMN.to_owned()];
    header.extend(columns.iter().map(|column| column.label.to_owned()));
    grid.push(header);
    for row in rows {
        let mut line = vec![row.row_id().to_string()];
        line.extend(columns.iter().map(|column| row.cell(column.key).display()));
        grid.push(line);
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|col| grid.iter().map(|line| line[col].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for line in &grid {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(field, width)| format!("{field:<width$}"))
            .collect();
        out.push_str(padded.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Footer line under a paginated table.
#[must_use]
pub fn page_footer<R>(view: &TableView<'_, R>) -> String {
    let noun = if view.total == 1 { "row" } else { "rows" };
    format!(
        "Page {} of {} ({} {noun})",
        view.page_index + 1,
        view.page_count,
        view.total
    )
}

/// Expanded view of one record: details, author, text excerpt and assets.
#[must_use]
pub fn details(record: &Record, base_url: &str) -> String {
    let mut out = format!("{} #{}\n", record.title(), record.id);
    for (label, value) in &record.details {
        out.push_str(&format!("  {label}: {value}\n"));
    }
    if let Some(author) = &record.author {
        out.push_str(&format!("  Author: {author}\n"));
    }
    if let Some(body) = &record.body_html {
        let excerpt = plain_excerpt(body, EXCERPT_CHARS);
        if !excerpt.is_empty() {
            out.push_str(&format!("  {excerpt}\n"));
        }
    }
    for asset in &record.assets {
        let url = asset_url(base_url, &asset.file_url);
        match asset.title.as_deref() {
            Some(title) => out.push_str(&format!("  - {title}: {url}\n")),
            None => out.push_str(&format!("  - {url}\n")),
        }
    }
    out
}

/// Rows as JSON objects keyed by column, values as displayed.
#[must_use]
pub fn rows_json(columns: &[Column], rows: &[&Record]) -> Value {
    let rows = rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            object.insert("id".to_owned(), Value::from(row.row_id()));
            for column in columns {
                object.insert(column.key.to_owned(), Value::String(row.cell(column.key).display()));
            }
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}
