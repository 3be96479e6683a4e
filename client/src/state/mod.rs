//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Only app-wide state lives here (`auth`, `toast`). Per-page list and form
//! state is the `resources` controllers held in page-local signals.

pub mod auth;
pub mod toast;
