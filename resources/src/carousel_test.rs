use super::*;

#[test]
fn next_and_prev_wrap() {
    let mut carousel = CarouselState::new(3);
    carousel.prev();
    assert_eq!(carousel.index(), 2);
    carousel.next();
    assert_eq!(carousel.index(), 0);
}

#[test]
fn tick_advances_until_interaction() {
    let mut carousel = CarouselState::new(3);
    assert!(carousel.tick());
    assert_eq!(carousel.index(), 1);

    carousel.interact(|c| c.go_to(0));
    assert!(carousel.is_paused());
    assert!(!carousel.tick());
    assert_eq!(carousel.index(), 0);

    carousel.resume();
    assert!(carousel.tick());
    assert_eq!(carousel.index(), 1);
}

#[test]
fn single_or_empty_never_ticks() {
    assert!(!CarouselState::new(0).tick());
    assert!(!CarouselState::new(1).tick());
    let mut empty = CarouselState::new(0);
    empty.next();
    empty.prev();
    assert_eq!(empty.index(), 0);
}

#[test]
fn go_to_ignores_out_of_range() {
    let mut carousel = CarouselState::new(2);
    carousel.go_to(5);
    assert_eq!(carousel.index(), 0);
}
