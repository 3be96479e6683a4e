//! Route-level page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages compose reusable components and own route-specific workflows such as
//! auth flows, resource listing and create/edit forms.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod my_bookings;
pub mod register;
pub mod resource;
pub mod resource_form;
