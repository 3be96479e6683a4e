//! Shared resource model and list/mutation controllers for the Tourdesk
//! dashboard.
//!
//! This crate owns everything that is not rendering: entity types, response
//! envelope normalization, the REST client over a pluggable [`Transport`],
//! list and table state, the mutation flow, session state and presentation
//! helpers. Both `client` (Leptos) and `cli` (reqwest) sit on top of it, so
//! one implementation serves every resource on every surface.

pub mod api;
pub mod carousel;
mod de;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod format;
pub mod listing;
pub mod mutation;
pub mod rich_text;
pub mod session;
pub mod table;

#[cfg(test)]
mod test_helpers;

pub use api::{ApiClient, ApiRequest, Method, Part, RequestBody, Transport, Upload};
pub use entity::{Record, Resource, ResourceKind};
pub use error::{ApiError, ErrorKind, LOGIN_ROUTE};
pub use listing::{ListError, ListState, ResourceList};
pub use mutation::{AnyForm, Form, Operation, Toast, ToastLevel};
pub use session::{Session, SessionContext, SessionError, SessionStore, SessionUser};
pub use table::{Cell, Column, TableRow, TableState};
