use super::*;
use resources::table::TableState;
use resources::ResourceKind;
use serde_json::json;

fn trips() -> Vec<Record> {
    let body = json!({ "data": { "trips": [
        {
            "id": 1,
            "name": "Komodo Sailing",
            "type": "open",
            "duration": "3D2N",
            "price": 4500000,
            "description": "<p>Pink beach &amp; <strong>dragons</strong></p>",
            "assets": [{ "file_url": "/storage/komodo.jpg", "title": "Deck" }]
        },
        { "id": 2, "name": "Raja Ampat", "price": "12000000" }
    ]}});
    ResourceKind::Trip.decode_records(&body).expect("decode")
}

#[test]
fn table_aligns_columns_and_trims_trailing_space() {
    let records = trips();
    let rows: Vec<&Record> = records.iter().collect();
    let out = table(&ResourceKind::Trip.columns()[..2], &rows);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "ID  Name            Type");
    assert_eq!(lines[1], "1   Komodo Sailing  open");
    assert_eq!(lines[2], "2   Raja Ampat");
}

#[test]
fn table_shows_money_in_rupiah() {
    let records = trips();
    let rows: Vec<&Record> = records.iter().collect();
    let out = table(&[Column::new("price", "Price")], &rows);
    assert!(out.contains("Rp4.500.000"));
    assert!(out.contains("Rp12.000.000"));
}

#[test]
fn footer_counts_filtered_rows() {
    let records = trips();
    let mut state = TableState::new("name");
    state.set_filter("raja");
    let view = state.view(&records);
    assert_eq!(page_footer(&view), "Page 1 of 1 (1 row)");
}

#[test]
fn details_resolve_assets_and_strip_markup() {
    let records = trips();
    let out = details(&records[0], "https://api.example.com/");

    assert!(out.starts_with("Komodo Sailing #1\n"));
    assert!(out.contains("  Pink beach & dragons\n"));
    assert!(out.contains("  - Deck: https://api.example.com/storage/komodo.jpg\n"));
}

#[test]
fn rows_json_uses_display_values() {
    let records = trips();
    let rows: Vec<&Record> = records.iter().collect();
    let value = rows_json(&[Column::new("price", "Price")], &rows);
    assert_eq!(value, json!([
        { "id": 1, "price": "Rp4.500.000" },
        { "id": 2, "price": "Rp12.000.000" }
    ]));
}
