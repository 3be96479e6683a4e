//! Authenticated session and its persistence.
//!
//! DESIGN
//! ======
//! Stores only move raw strings; [`SessionContext`] owns parsing and
//! validation so every surface (browser storage, CLI session file, memory)
//! rejects the same malformed data. A stored session that fails validation
//! is discarded at restore rather than half-trusted.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de;
use crate::error::{ApiError, ErrorKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session data is malformed: {0}")]
    Malformed(String),
    #[error("session token is empty")]
    MissingToken,
    #[error("session user has no email")]
    MissingEmail,
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl Session {
    /// # Errors
    ///
    /// Returns [`SessionError::MissingToken`] or [`SessionError::MissingEmail`]
    /// for sessions the backend could not have issued.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        if self.user.email.trim().is_empty() {
            return Err(SessionError::MissingEmail);
        }
        Ok(())
    }

    /// Parse and validate a stored session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when `raw` is not a valid session.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        let session: Self = serde_json::from_str(raw).map_err(|e| SessionError::Malformed(e.to_string()))?;
        session.validate()?;
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| SessionError::Malformed(e.to_string()))
    }

    /// Build a session from a login/register response: `{ token, user }`
    /// (or `access_token`), optionally wrapped in `data`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the response carries no usable token
    /// or user.
    pub fn from_login_response(value: &Value) -> Result<Self, SessionError> {
        let payload = match value.get("data") {
            Some(data) if data.is_object() => data,
            _ => value,
        };
        let token = payload
            .get("token")
            .or_else(|| payload.get("access_token"))
            .and_then(Value::as_str)
            .ok_or(SessionError::MissingToken)?;
        let user = payload
            .get("user")
            .ok_or_else(|| SessionError::Malformed("response has no user".to_owned()))?;
        let user = SessionUser::deserialize(user).map_err(|e| SessionError::Malformed(e.to_string()))?;
        let session = Self {
            token: token.to_owned(),
            user,
        };
        session.validate()?;
        Ok(session)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user
            .role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"))
    }
}

// =============================================================================
// STORES
// =============================================================================

/// Persistence for the serialized session.
pub trait SessionStore {
    fn load(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the backing store rejects the write.
    fn save(&self, raw: &str) -> Result<(), SessionError>;

    fn clear(&self);
}

/// Process-local store, used on the server render path and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Mutex::new(Some(raw.to_owned())),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|raw| raw.clone())
    }

    fn save(&self, raw: &str) -> Result<(), SessionError> {
        let mut slot = self
            .raw
            .lock()
            .map_err(|_| SessionError::Storage("memory store poisoned".to_owned()))?;
        *slot = Some(raw.to_owned());
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.raw.lock() {
            *slot = None;
        }
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

/// The current session plus the store it is persisted to.
#[derive(Debug)]
pub struct SessionContext<S> {
    store: S,
    session: Option<Session>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Load the stored session, discarding it if it does not validate.
    pub fn restore(store: S) -> Self {
        let session = match store.load().as_deref().map(Session::from_json) {
            Some(Ok(session)) => Some(session),
            Some(Err(err)) => {
                tracing::warn!(error = %err, "discarding stored session");
                store.clear();
                None
            }
            None => None,
        };
        Self { store, session }
    }

    /// # Errors
    ///
    /// Returns [`SessionError`] when the session is invalid or cannot be
    /// persisted; the previous session is kept in that case.
    pub fn login(&mut self, session: Session) -> Result<(), SessionError> {
        session.validate()?;
        self.store.save(&session.to_json()?)?;
        tracing::info!(user_id = session.user.id, "session started");
        self.session = Some(session);
        Ok(())
    }

    pub fn logout(&mut self) {
        self.store.clear();
        self.session = None;
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.session.as_ref().map(|session| &session.user)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    /// Forced logout on 401. Returns the route to navigate to, if any.
    pub fn handle_error(&mut self, err: &ApiError) -> Option<&'static str> {
        if err.kind() == ErrorKind::Unauthorized && self.session.is_some() {
            tracing::warn!("backend rejected the session token; logging out");
            self.logout();
        }
        err.redirect()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
