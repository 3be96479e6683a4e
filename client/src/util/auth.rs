//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior for signed-out
//! users and for customers opening admin routes.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use resources::LOGIN_ROUTE;

use crate::state::auth::AuthState;

/// Where signed-in customers land.
pub const CUSTOMER_HOME: &str = "/my-bookings";
/// Where admins land.
pub const ADMIN_HOME: &str = "/dashboard";

/// Landing route for a freshly signed-in user.
pub fn home_route(is_admin: bool) -> &'static str {
    if is_admin { ADMIN_HOME } else { CUSTOMER_HOME }
}

/// Redirect to the login page whenever no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if !auth.with(AuthState::is_authenticated) {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        }
    });
}

/// Like [`install_unauth_redirect`], and also sends customers away from
/// admin routes.
pub fn install_admin_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let (signed_in, admin) = auth.with(|state| (state.is_authenticated(), state.is_admin()));
        if !signed_in {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        } else if !admin {
            navigate(CUSTOMER_HOME, NavigateOptions::default());
        }
    });
}

/// Navigate once whenever `pending` is set, then clear it.
///
/// Async handlers only capture signals, so they park the target route here
/// instead of holding the navigator.
pub fn install_pending_redirect<F>(pending: RwSignal<Option<&'static str>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(route) = pending.get() {
            pending.set(None);
            navigate(route, NavigateOptions::default());
        }
    });
}
