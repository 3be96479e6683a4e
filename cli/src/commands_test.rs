use super::*;
use serde_json::json;

#[test]
fn bare_filter_uses_search_column() {
    let (column, query) = parse_filter(ResourceKind::User, "dewi").expect("filter");
    assert_eq!(column, "email");
    assert_eq!(query, "dewi");
}

#[test]
fn filter_keeps_equals_signs_in_query() {
    let (column, query) = parse_filter(ResourceKind::Trip, "name=a=b").expect("filter");
    assert_eq!(column, "name");
    assert_eq!(query, "a=b");
}

#[test]
fn filter_rejects_unknown_and_empty_columns() {
    assert!(matches!(
        parse_filter(ResourceKind::Trip, "colour=red"),
        Err(CliError::UnknownColumn { column, .. }) if column == "colour"
    ));
    assert!(matches!(parse_filter(ResourceKind::Trip, "=red"), Err(CliError::InvalidFilter(_))));
}

#[test]
fn sort_requires_a_sortable_column() {
    assert!(sort_column(ResourceKind::Testimonial, "rating").is_ok());
    assert!(matches!(
        sort_column(ResourceKind::Testimonial, "message"),
        Err(CliError::UnsortableColumn { .. })
    ));
    assert!(matches!(
        sort_column(ResourceKind::Testimonial, "nope"),
        Err(CliError::UnknownColumn { .. })
    ));
}

#[test]
fn apply_query_sets_filter_and_sort() {
    let mut state = TableState::new(ResourceKind::Trip.filter_column());
    apply_query(&mut state, ResourceKind::Trip, Some("destination=flores"), Some("price"), true).expect("query");

    assert_eq!(state.filter_column(), "destination");
    assert_eq!(state.filter(), "flores");
    let sort = state.sort().expect("sort");
    assert_eq!(sort.column, "price");
    assert_eq!(sort.direction, SortDirection::Desc);
}

#[test]
fn merge_overlays_top_level_keys() {
    let mut base = json!({ "name": "Komodo", "price": 100, "cabins": [{ "name": "A" }] });
    merge(&mut base, json!({ "price": 250, "cabins": [] }));
    assert_eq!(base, json!({ "name": "Komodo", "price": 250, "cabins": [] }));
}

#[test]
fn update_body_keeps_untouched_fields() {
    let detail = json!({ "id": 4, "name": "Komodo", "type": "open", "duration": "3D2N", "price": "4500000" });
    let mut body = AnyForm::from_entity(ResourceKind::Trip, &detail)
        .and_then(|form| form.to_json())
        .expect("form");
    merge(&mut body, json!({ "price": 5000000 }));
    let form = AnyForm::from_json(ResourceKind::Trip, &body).expect("form");
    let sent = form.to_json().expect("json");

    assert_eq!(sent["name"], "Komodo");
    assert_eq!(sent["type"], "open");
    assert_eq!(sent["price"], 5_000_000);
}

#[test]
fn mime_follows_extension() {
    assert_eq!(guess_mime(Path::new("deck.JPG")), "image/jpeg");
    assert_eq!(guess_mime(Path::new("brochure.pdf")), "application/pdf");
    assert_eq!(guess_mime(Path::new("README")), "application/octet-stream");
}

#[test]
fn field_errors_become_one_validation_error() {
    let form = LoginForm {
        email: "not-an-email".into(),
        password: String::new(),
    };
    let Err(CliError::Validation(message)) = check(&form.validate()) else {
        panic!("expected validation error");
    };
    assert!(message.contains("  email: "));
    assert!(message.contains("  password: Password is required."));
}

#[tokio::test]
async fn data_must_be_an_object() {
    assert!(matches!(parse_data("[1, 2]").await, Err(CliError::NotAnObject)));
    assert!(matches!(parse_data("{").await, Err(CliError::InvalidJson(_))));
}

#[tokio::test]
async fn data_can_come_from_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("trip.json");
    std::fs::write(&path, r#"{ "name": "Flores" }"#).expect("write");

    let value = parse_data(&format!("@{}", path.display())).await.expect("data");
    assert_eq!(value, json!({ "name": "Flores" }));
}
