use super::*;

#[test]
fn stars_fill_from_the_rating() {
    assert_eq!(stars(Some(4)), "★★★★☆");
    assert_eq!(stars(Some(5)), "★★★★★");
}

#[test]
fn stars_clamp_out_of_range_ratings() {
    assert_eq!(stars(None), "☆☆☆☆☆");
    assert_eq!(stars(Some(-2)), "☆☆☆☆☆");
    assert_eq!(stars(Some(9)), "★★★★★");
}
