use super::*;
use time::macros::datetime;

struct Row {
    id: i64,
    name: &'static str,
    price: i64,
}

impl TableRow for Row {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn cell(&self, key: &str) -> Cell {
        match key {
            "name" => Cell::Text(self.name.to_owned()),
            "price" => Cell::Money(self.price),
            _ => Cell::Empty,
        }
    }
}

fn rows(count: i64) -> Vec<Row> {
    (1..=count)
        .map(|id| Row {
            id,
            name: if id % 2 == 0 { "Komodo Sail" } else { "Bali Dive" },
            price: 100_000 * (count - id + 1),
        })
        .collect()
}

fn ids<R: TableRow>(rows: &[&R]) -> Vec<i64> {
    rows.iter().map(|row| row.row_id()).collect()
}

// =============================================================
// Cell
// =============================================================

#[test]
fn cell_text_treats_blank_as_empty() {
    assert_eq!(Cell::text(Some("  ")), Cell::Empty);
    assert_eq!(Cell::text(None), Cell::Empty);
    assert_eq!(Cell::text(Some(" Hi ")), Cell::Text("Hi".into()));
}

#[test]
fn cell_display_formats_by_type() {
    assert_eq!(Cell::Money(150_000).display(), "Rp150.000");
    assert_eq!(Cell::Flag(true).display(), "Yes");
    assert_eq!(Cell::Number(7).display(), "7");
    assert_eq!(Cell::Time(datetime!(2026-10-18 00:00 UTC)).display(), "18 Oktober 2026");
    assert_eq!(Cell::Empty.display(), "");
}

#[test]
fn cell_compare_is_numeric_for_money() {
    assert_eq!(Cell::Money(9_000).compare(&Cell::Money(10_000)), Ordering::Less);
    assert_eq!(Cell::Empty.compare(&Cell::Money(0)), Ordering::Less);
    assert_eq!(Cell::Text("b".into()).compare(&Cell::Text("A".into())), Ordering::Greater);
}

// =============================================================
// Filter / sort / paginate
// =============================================================

#[test]
fn filter_is_case_insensitive_substring_on_designated_column() {
    let data = rows(6);
    let mut state = TableState::new("name");
    state.set_filter("KOMODO");
    let view = state.view(&data);
    assert_eq!(view.total, 3);
    assert_eq!(ids(&view.rows), vec![2, 4, 6]);
}

#[test]
fn filter_resets_to_first_page() {
    let data = rows(30);
    let mut state = TableState::new("name");
    state.set_page(2);
    state.set_filter("bali");
    assert_eq!(state.page_index(), 0);
    assert_eq!(state.view(&data).page_index, 0);
}

#[test]
fn toggle_sort_cycles_asc_desc_off() {
    let mut state = TableState::new("name");
    state.toggle_sort("price");
    assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Asc));
    state.toggle_sort("price");
    assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Desc));
    state.toggle_sort("price");
    assert_eq!(state.sort(), None);
}

#[test]
fn toggle_sort_on_new_column_starts_ascending() {
    let mut state = TableState::new("name");
    state.set_sort("price", SortDirection::Desc);
    state.toggle_sort("name");
    let sort = state.sort().expect("sorted");
    assert_eq!(sort.column, "name");
    assert_eq!(sort.direction, SortDirection::Asc);
}

#[test]
fn sort_orders_rows_by_typed_cell() {
    let data = rows(4);
    let mut state = TableState::new("name");
    state.set_sort("price", SortDirection::Asc);
    assert_eq!(ids(&state.view(&data).rows), vec![4, 3, 2, 1]);
    state.set_sort("price", SortDirection::Desc);
    assert_eq!(ids(&state.view(&data).rows), vec![1, 2, 3, 4]);
}

#[test]
fn pagination_slices_and_counts_pages() {
    let data = rows(25);
    let mut state = TableState::new("name");
    let first = state.view(&data);
    assert_eq!(first.rows.len(), 10);
    assert_eq!(first.page_count, 3);
    assert!(!first.has_prev());
    assert!(first.has_next());

    state.set_page(2);
    let last = state.view(&data);
    assert_eq!(ids(&last.rows), vec![21, 22, 23, 24, 25]);
    assert!(!last.has_next());
}

#[test]
fn out_of_range_page_is_clamped() {
    let data = rows(12);
    let mut state = TableState::new("name");
    state.set_page(40);
    let view = state.view(&data);
    assert_eq!(view.page_index, 1);
    assert_eq!(view.rows.len(), 2);
}

#[test]
fn empty_list_has_one_empty_page() {
    let data: Vec<Row> = Vec::new();
    let view = TableState::new("name").view(&data);
    assert_eq!(view.page_count, 1);
    assert_eq!(view.total, 0);
    assert!(view.rows.is_empty());
}

#[test]
fn page_size_accepts_only_offered_sizes() {
    let mut state = TableState::new("name");
    for size in PAGE_SIZES {
        assert!(state.set_page_size(size).is_ok());
    }
    assert_eq!(state.set_page_size(15), Err(InvalidPageSize(15)));
    assert_eq!(state.page_size(), 50);
}

// =============================================================
// Expansion / selection
// =============================================================

#[test]
fn expansion_toggles_per_row() {
    let mut state = TableState::new("name");
    state.toggle_expanded(3);
    assert!(state.is_expanded(3));
    state.toggle_expanded(3);
    assert!(!state.is_expanded(3));
}

#[test]
fn selected_or_all_falls_back_to_filtered_rows() {
    let data = rows(5);
    let mut state = TableState::new("name");
    state.set_filter("bali");
    assert_eq!(ids(&state.selected_or_all(&data)), vec![1, 3, 5]);

    state.toggle_selected(5);
    state.toggle_selected(1);
    assert_eq!(ids(&state.selected_or_all(&data)), vec![1, 5]);
}

#[test]
fn hidden_selection_is_left_out_of_export_and_delete() {
    let data = rows(4);
    let mut state = TableState::new("name");
    state.toggle_selected(1);
    state.toggle_selected(2);
    state.set_filter("komodo");

    let delete_targets = state.visible_selection(&data);
    assert_eq!(delete_targets, vec![2]);
    assert_eq!(ids(&state.selected_or_all(&data)), delete_targets);
    assert_eq!(state.selected_ids(), vec![1, 2]);

    state.toggle_selected(2);
    assert!(state.visible_selection(&data).is_empty());
    assert_eq!(ids(&state.selected_or_all(&data)), vec![2, 4]);
}

#[test]
fn select_all_filtered_then_forget() {
    let data = rows(4);
    let mut state = TableState::new("name");
    state.set_filter("komodo");
    state.select_all_filtered(&data);
    assert_eq!(state.selected_ids(), vec![2, 4]);
    state.toggle_expanded(2);
    state.forget(&[2]);
    assert_eq!(state.selected_ids(), vec![4]);
    assert!(!state.is_expanded(2));
}

// =============================================================
// Export
// =============================================================

#[test]
fn export_rows_emits_header_then_display_cells() {
    let data = rows(2);
    let state = TableState::new("name");
    let columns = [Column::new("name", "Name"), Column::new("price", "Price")];
    let exported = export_rows(&columns, &state.selected_or_all(&data));
    assert_eq!(exported[0], vec!["Name", "Price"]);
    assert_eq!(exported[1], vec!["Bali Dive", "Rp200.000"]);
    assert_eq!(exported.len(), 3);
}

#[test]
fn csv_quotes_fields_with_separators() {
    let csv = to_csv(&[
        vec!["Name".into(), "Note".into()],
        vec!["Labuan Bajo, NTT".into(), "say \"hi\"".into()],
    ]);
    assert_eq!(csv, "Name,Note\r\n\"Labuan Bajo, NTT\",\"say \"\"hi\"\"\"\r\n");
}
