use super::*;
use serde_json::json;

#[test]
fn filename_uses_plural_slug() {
    assert_eq!(export_filename(ResourceKind::Carousel), "carousels.csv");
    assert_eq!(export_filename(ResourceKind::Gallery), "galleries.csv");
}

#[test]
fn csv_has_header_and_display_values() {
    let records = ResourceKind::Hotel
        .decode_records(&json!([{ "id": 1, "name": "Ayana, Bali", "stars": 5, "price": "750000" }]))
        .expect("decode");
    let rows: Vec<&Record> = records.iter().collect();
    let csv = export_csv(ResourceKind::Hotel, &rows);

    let mut lines = csv.lines();
    let header = lines.next().expect("header");
    assert!(header.starts_with("Name,"));
    let row = lines.next().expect("row");
    assert!(row.starts_with("\"Ayana, Bali\","));
    assert!(row.contains("Rp750.000"));
}
