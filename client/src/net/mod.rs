//! Networking for the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` provides the `gloo-net` transport under the shared `ApiClient`;
//! request building and response decoding live in `resources`.

pub mod api;
