//! Client-side table state: filter, sort, paginate, expand and select.
//!
//! DESIGN
//! ======
//! Everything here is derived from the last fetched list. Nothing talks to
//! the backend; a [`TableView`] is recomputed from `(state, rows)` on every
//! render, so the state only stores user intent (query, sort column, page,
//! expanded and selected ids).

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use time::OffsetDateTime;

use crate::format::{format_date, format_idr};

/// Page sizes offered by the pagination control.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// =============================================================================
// CELLS AND COLUMNS
// =============================================================================

/// A typed table cell. Typing keeps sorting numeric for prices and
/// chronological for timestamps instead of lexicographic.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(i64),
    Money(i64),
    Time(OffsetDateTime),
    Flag(bool),
}

impl Cell {
    /// Text cell from an optional string, empty when blank.
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(text) if !text.is_empty() => Self::Text(text.to_owned()),
            _ => Self::Empty,
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::Money(amount) => format_idr(*amount),
            Self::Time(ts) => format_date(*ts),
            Self::Flag(flag) => (if *flag { "Yes" } else { "No" }).to_owned(),
        }
    }

    /// Total order used for sorting. Empty cells sort before everything.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Empty, _) => Ordering::Less,
            (_, Self::Empty) => Ordering::Greater,
            (Self::Number(a) | Self::Money(a), Self::Number(b) | Self::Money(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            _ => self.display().cmp(&other.display()),
        }
    }
}

/// Column metadata shared by every surface that renders a resource table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl Column {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: true }
    }

    #[must_use]
    pub const fn unsortable(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: false }
    }
}

/// Anything that can be shown as a table row.
pub trait TableRow {
    fn row_id(&self) -> i64;
    fn cell(&self, key: &str) -> Cell;
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported page size {0}; expected one of 10, 20, 30, 40, 50")]
pub struct InvalidPageSize(pub usize);

/// User intent for one resource table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    filter_column: String,
    filter: String,
    sort: Option<SortSpec>,
    page_index: usize,
    page_size: usize,
    expanded: BTreeSet<i64>,
    selected: BTreeSet<i64>,
}

impl TableState {
    /// New state filtering on `filter_column`.
    #[must_use]
    pub fn new(filter_column: &str) -> Self {
        Self {
            filter_column: filter_column.to_owned(),
            filter: String::new(),
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            expanded: BTreeSet::new(),
            selected: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn filter_column(&self) -> &str {
        &self.filter_column
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Requested page; [`TableView::page_index`] is the clamped value.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Changing the query always returns to the first page.
    pub fn set_filter(&mut self, query: &str) {
        query.clone_into(&mut self.filter);
        self.page_index = 0;
    }

    pub fn set_filter_column(&mut self, column: &str) {
        column.clone_into(&mut self.filter_column);
        self.page_index = 0;
    }

    /// Header click: ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some(spec) if spec.column == column => match spec.direction {
                SortDirection::Asc => Some(SortSpec {
                    column: spec.column,
                    direction: SortDirection::Desc,
                }),
                SortDirection::Desc => None,
            },
            _ => Some(SortSpec {
                column: column.to_owned(),
                direction: SortDirection::Asc,
            }),
        };
    }

    pub fn set_sort(&mut self, column: &str, direction: SortDirection) {
        self.sort = Some(SortSpec {
            column: column.to_owned(),
            direction,
        });
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// # Errors
    ///
    /// Returns [`InvalidPageSize`] when `size` is not one of [`PAGE_SIZES`].
    pub fn set_page_size(&mut self, size: usize) -> Result<(), InvalidPageSize> {
        if !PAGE_SIZES.contains(&size) {
            return Err(InvalidPageSize(size));
        }
        self.page_size = size;
        self.page_index = 0;
        Ok(())
    }

    /// Out-of-range pages are clamped when the view is derived, so callers
    /// should step from [`TableView::page_index`] rather than this value.
    pub fn set_page(&mut self, index: usize) {
        self.page_index = index;
    }

    pub fn toggle_expanded(&mut self, id: i64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle_selected(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    /// Select every row that passes the current filter.
    pub fn select_all_filtered<R: TableRow>(&mut self, rows: &[R]) {
        self.selected = self.filtered(rows).iter().map(|row| row.row_id()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Drop expansion/selection for ids that no longer exist.
    pub fn forget(&mut self, ids: &[i64]) {
        for id in ids {
            self.expanded.remove(id);
            self.selected.remove(id);
        }
    }

    // =========================================================================
    // DERIVATION
    // =========================================================================

    fn filtered<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let query = self.filter.trim().to_lowercase();
        rows.iter()
            .filter(|row| {
                query.is_empty()
                    || row
                        .cell(&self.filter_column)
                        .display()
                        .to_lowercase()
                        .contains(&query)
            })
            .collect()
    }

    fn ordered<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let mut rows = self.filtered(rows);
        if let Some(spec) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering = a.cell(&spec.column).compare(&b.cell(&spec.column));
                match spec.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }

    /// Filter, sort and paginate `rows`.
    #[must_use]
    pub fn view<'a, R: TableRow>(&self, rows: &'a [R]) -> TableView<'a, R> {
        let ordered = self.ordered(rows);
        let total = ordered.len();
        let page_count = total.div_ceil(self.page_size).max(1);
        let page_index = self.page_index.min(page_count - 1);
        let rows = ordered
            .into_iter()
            .skip(page_index * self.page_size)
            .take(self.page_size)
            .collect();
        TableView {
            rows,
            total,
            page_index,
            page_count,
        }
    }

    /// Selected ids that pass the current filter, in table order. Rows hidden
    /// by the filter stay selected but are never acted on.
    #[must_use]
    pub fn visible_selection<R: TableRow>(&self, rows: &[R]) -> Vec<i64> {
        self.ordered(rows)
            .into_iter()
            .map(|row| row.row_id())
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    /// Rows targeted by export: the visible selection when there is one,
    /// otherwise every filtered row, in table order.
    #[must_use]
    pub fn selected_or_all<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let ordered = self.ordered(rows);
        let picked: Vec<&R> = ordered
            .iter()
            .copied()
            .filter(|row| self.selected.contains(&row.row_id()))
            .collect();
        if picked.is_empty() {
            ordered
        } else {
            picked
        }
    }
}

/// One rendered page.
#[derive(Debug)]
pub struct TableView<'a, R> {
    pub rows: Vec<&'a R>,
    /// Rows that passed the filter, across all pages.
    pub total: usize,
    pub page_index: usize,
    pub page_count: usize,
}

impl<R> TableView<'_, R> {
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

// =============================================================================
// EXPORT
// =============================================================================

/// Header row followed by one display row per input row.
#[must_use]
pub fn export_rows<R: TableRow>(columns: &[Column], rows: &[&R]) -> Vec<Vec<String>> {
    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(columns.iter().map(|column| column.label.to_owned()).collect());
    for row in rows {
        out.push(columns.iter().map(|column| row.cell(column.key).display()).collect());
    }
    out
}

/// Render exported rows as RFC 4180 CSV.
#[must_use]
pub fn to_csv(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }
    out
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
