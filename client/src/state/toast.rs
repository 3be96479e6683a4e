//! Toast notifications queued for the `ToastHost` component.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use resources::Toast;

/// How long a toast stays on screen.
pub const TOAST_TIMEOUT_MS: u32 = 4_000;

/// At most this many toasts are shown; older ones are dropped first.
pub const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastItem {
    pub id: u64,
    pub toast: Toast,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    items: Vec<ToastItem>,
    next_id: u64,
}

impl ToastState {
    pub fn push(&mut self, toast: Toast) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(ToastItem { id, toast });
        if self.items.len() > MAX_TOASTS {
            let excess = self.items.len() - MAX_TOASTS;
            self.items.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
    }

    pub fn items(&self) -> &[ToastItem] {
        &self.items
    }
}
