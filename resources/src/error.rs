//! Error taxonomy for REST calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Transports report failures as [`ApiError`]. Pages and the CLI never show
//! raw errors; they classify them with [`ApiError::kind`] and render
//! [`ApiError::user_message`], following the redirect on 401.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::envelope::EnvelopeError;

/// Route the user is sent to when the backend rejects their credentials.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Server-side validation messages keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors produced by a single REST call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16, body: Value },

    /// The response body was not the JSON shape the caller needed.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Coarse classification used to decide how a failure is surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Server,
}

impl ApiError {
    /// HTTP status, when the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Network,
            Self::Decode(_) | Self::Encode(_) => ErrorKind::Server,
            Self::Status { status, .. } => match status {
                401 => ErrorKind::Unauthorized,
                403 => ErrorKind::Forbidden,
                404 => ErrorKind::NotFound,
                400..=499 => ErrorKind::Validation,
                _ => ErrorKind::Server,
            },
        }
    }

    /// The backend's own `message` field, if it sent a non-empty one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        body.get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }

    /// Human-readable message for banners and toasts.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Network => "Could not reach the server. Check your connection and try again.".to_owned(),
            ErrorKind::Unauthorized => "Your session has expired. Please sign in again.".to_owned(),
            ErrorKind::Forbidden => "You do not have permission to access this data.".to_owned(),
            ErrorKind::NotFound => "This feature is not available yet: the endpoint was not found.".to_owned(),
            ErrorKind::Validation => self
                .server_message()
                .map_or_else(|| "The submitted data is invalid.".to_owned(), ToOwned::to_owned),
            ErrorKind::Server => "Something went wrong on our side. Please try again.".to_owned(),
        }
    }

    /// Field errors from a `{ "errors": { field: [messages] } }` body.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        let Self::Status { body, .. } = self else {
            return FieldErrors::new();
        };
        let Some(errors) = body.get("errors").and_then(Value::as_object) else {
            return FieldErrors::new();
        };
        errors
            .iter()
            .filter_map(|(field, messages)| {
                let messages: Vec<String> = match messages {
                    Value::String(message) => vec![message.clone()],
                    Value::Array(items) => items.iter().filter_map(Value::as_str).map(ToOwned::to_owned).collect(),
                    _ => Vec::new(),
                };
                (!messages.is_empty()).then(|| (field.clone(), messages))
            })
            .collect()
    }

    /// Route to navigate to instead of rendering the failure.
    #[must_use]
    pub fn redirect(&self) -> Option<&'static str> {
        (self.kind() == ErrorKind::Unauthorized).then_some(LOGIN_ROUTE)
    }
}
