use super::*;

#[test]
fn indicator_marks_only_the_sorted_column() {
    let mut table = TableState::new("name");
    assert_eq!(sort_indicator(&table, "price"), "");

    table.toggle_sort("price");
    assert_eq!(sort_indicator(&table, "price"), "▲");
    assert_eq!(sort_indicator(&table, "name"), "");

    table.toggle_sort("price");
    assert_eq!(sort_indicator(&table, "price"), "▼");
}

#[test]
fn bulk_target_label() {
    assert_eq!(target_label(0), "all");
    assert_eq!(target_label(3), "3 selected");
}
