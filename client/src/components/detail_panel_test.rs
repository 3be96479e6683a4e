use super::*;
use resources::ResourceKind;
use serde_json::json;

fn blog(extra: serde_json::Value) -> Record {
    let mut entity = json!({ "id": 1, "title": "Diving Season" });
    if let (Some(map), Some(more)) = (entity.as_object_mut(), extra.as_object()) {
        map.extend(more.clone());
    }
    ResourceKind::Blog
        .decode_records(&json!([entity]))
        .expect("records")
        .remove(0)
}

#[test]
fn updated_line_formats_the_stamp() {
    let record = blog(json!({ "updated_at": "2026-10-18T08:05:00Z" }));
    assert_eq!(updated_line(&record).as_deref(), Some("Last updated 18 Okt 2026 08:05"));
}

#[test]
fn updated_line_absent_without_stamp() {
    assert_eq!(updated_line(&blog(json!({}))), None);
}
