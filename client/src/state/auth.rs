//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session lives in `localStorage` so it survives reloads, and the token
//! is mirrored into a cookie for server-rendered requests. Route guards and
//! pages read it through `RwSignal<AuthState>` from context.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use resources::api::encode_component;
use resources::{ApiClient, ApiError, SessionContext, SessionError, SessionStore};

use crate::net::api::{self, GlooTransport};

#[cfg(feature = "hydrate")]
const SESSION_KEY: &str = "tourdesk_session";
const TOKEN_COOKIE: &str = "tourdesk_token";

/// The shared session controller over browser storage.
pub type AuthState = SessionContext<BrowserStore>;

/// `localStorage` plus a token cookie. No-ops outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "hydrate")]
fn write_cookie(token: Option<&str>) {
    use wasm_bindgen::JsCast as _;

    let Some(doc) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
    else {
        return;
    };
    let _ = doc.set_cookie(&cookie_assignment(token));
}

fn cookie_assignment(token: Option<&str>) -> String {
    match token {
        Some(token) => format!("{TOKEN_COOKIE}={}; Path=/; SameSite=Lax", encode_component(token)),
        None => format!("{TOKEN_COOKIE}=; Path=/; Max-Age=0; SameSite=Lax"),
    }
}

impl SessionStore for BrowserStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(SESSION_KEY).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, raw: &str) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or_else(|| SessionError::Storage("localStorage unavailable".to_owned()))?;
            storage
                .set_item(SESSION_KEY, raw)
                .map_err(|_| SessionError::Storage("localStorage rejected the session".to_owned()))?;
            let token = resources::Session::from_json(raw).ok().map(|session| session.token);
            write_cookie(token.as_deref());
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = raw;
            Ok(())
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(SESSION_KEY);
            }
            write_cookie(None);
        }
    }
}

/// REST client for the current session. Reads the token untracked.
pub fn api_client(auth: RwSignal<AuthState>) -> ApiClient<GlooTransport> {
    api::client(auth.with_untracked(|state| state.token().map(ToOwned::to_owned)))
}

/// Forced logout on 401. Returns the route to navigate to, if any.
pub fn handle_api_error(auth: RwSignal<AuthState>, err: &ApiError) -> Option<&'static str> {
    auth.try_update(|state| state.handle_error(err)).flatten()
}
