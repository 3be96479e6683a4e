use super::*;

fn info(index: usize, count: usize, total: usize) -> PageInfo {
    PageInfo { index, count, total, size: 10 }
}

#[test]
fn label_is_one_based() {
    assert_eq!(info(1, 5, 43).label(), "Page 2 of 5 · 43 rows");
    assert_eq!(info(0, 1, 1).label(), "Page 1 of 1 · 1 row");
}

#[test]
fn empty_table_still_has_one_page() {
    let empty = info(0, 0, 0);
    assert_eq!(empty.window(), vec![0]);
    assert!(!empty.has_prev());
    assert!(!empty.has_next());
}

#[test]
fn window_centres_on_the_current_page() {
    assert_eq!(info(5, 10, 100).window(), vec![3, 4, 5, 6, 7]);
}

#[test]
fn window_is_clamped_at_both_ends() {
    assert_eq!(info(0, 10, 100).window(), vec![0, 1, 2, 3, 4]);
    assert_eq!(info(9, 10, 100).window(), vec![5, 6, 7, 8, 9]);
    assert_eq!(info(1, 3, 25).window(), vec![0, 1, 2]);
}
