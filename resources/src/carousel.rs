//! Testimonial carousel state.
//!
//! The client drives [`CarouselState::tick`] from an interval timer that is
//! cleared on unmount; any manual navigation pauses autoplay until
//! [`CarouselState::resume`].

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

/// Autoplay interval.
pub const AUTOPLAY_INTERVAL_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    index: usize,
    paused: bool,
}

impl CarouselState {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            paused: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Wraps to the first slide after the last.
    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Wraps to the last slide before the first.
    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    /// Timer callback. Returns whether the slide changed.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.len < 2 {
            return false;
        }
        self.next();
        true
    }

    /// Manual navigation: pause autoplay, then apply `action`.
    pub fn interact(&mut self, action: impl FnOnce(&mut Self)) {
        self.paused = true;
        action(self);
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}
