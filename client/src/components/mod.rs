//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the admin chrome, the resource table and the public
//! testimonial carousel while reading/writing shared state from Leptos
//! context providers.

pub mod dashboard_shell;
pub mod data_table;
pub mod detail_panel;
pub mod pagination;
pub mod testimonial_carousel;
pub mod toast;
