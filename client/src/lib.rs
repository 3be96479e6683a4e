//! # client
//!
//! Leptos + WASM frontend for the Tourdesk website and admin dashboard.
//!
//! Resource semantics (envelopes, list and table state, forms, sessions)
//! live in the `resources` crate; this crate owns routing, reactive state
//! wrappers, components, and the `gloo-net` transport.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
