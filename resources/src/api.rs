//! REST client over a pluggable transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`ApiClient`] builds [`ApiRequest`]s and decodes responses; the
//! [`Transport`] underneath does the HTTP. The browser uses `gloo-net`, the
//! CLI uses `reqwest`, and tests use a recording mock, all behind the same
//! trait.
//!
//! ERROR HANDLING
//! ==============
//! One attempt per call, no retries. A 401 is returned as-is; callers hand
//! it to `SessionContext::handle_error` to force the logout and redirect.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use crate::entity::{Booking, Record, Resource, ResourceKind};
use crate::envelope::{self, normalize, normalize_one};
use crate::error::ApiError;
use crate::session::Session;

/// Upload endpoint for files attached to any record.
pub const ASSETS_UPLOAD_PATH: &str = "/api/assets/multiple";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One multipart form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
}

/// A request as handed to the transport. `path` is relative to the API base.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

/// Sends one request and returns the parsed JSON body.
///
/// Implementations map non-2xx responses to [`ApiError::Status`] (with the
/// parsed body, or `Null`), connection failures to [`ApiError::Transport`],
/// and an empty success body to `Value::Null`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// A file picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    token: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, token: None }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request, attaching the bearer token when present.
    ///
    /// # Errors
    ///
    /// Whatever the transport reports.
    pub async fn request(&self, method: Method, path: &str, body: RequestBody) -> Result<Value, ApiError> {
        tracing::debug!(method = method.as_str(), path, "api request");
        let request = ApiRequest {
            method,
            path: path.to_owned(),
            body,
            bearer: self.token.clone(),
        };
        self.transport.send(request).await
    }

    async fn send_json<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.request(method, path, RequestBody::Json(body)).await
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    /// `POST /api/login`.
    ///
    /// # Errors
    ///
    /// Transport/status errors, or [`ApiError::Decode`] when the response
    /// carries no valid session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = json!({ "email": email, "password": password });
        let value = self.send_json(Method::Post, "/api/login", &body).await?;
        Session::from_login_response(&value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /api/register`. Returns a session when the backend logs the
    /// new account in directly.
    ///
    /// # Errors
    ///
    /// Transport/status errors.
    pub async fn register<B: Serialize + ?Sized>(&self, body: &B) -> Result<Option<Session>, ApiError> {
        let value = self.send_json(Method::Post, "/api/register", body).await?;
        Ok(Session::from_login_response(&value).ok())
    }

    // -------------------------------------------------------------------------
    // Typed CRUD
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport/status errors, or [`ApiError::Decode`] for an unknown envelope.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let value = self.request(Method::Get, R::KIND.path(), RequestBody::Empty).await?;
        Ok(normalize::<R>(&value)?)
    }

    /// # Errors
    ///
    /// Transport/status errors, or [`ApiError::Decode`] when the detail
    /// response is not a complete entity.
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        let value = self
            .request(Method::Get, &item_path(R::KIND, id), RequestBody::Empty)
            .await?;
        Ok(normalize_one::<R>(&value)?)
    }

    /// `POST` the form to the collection. Returns the raw response body.
    ///
    /// # Errors
    ///
    /// Transport/status errors.
    pub async fn create<B: Serialize + ?Sized>(&self, kind: ResourceKind, body: &B) -> Result<Value, ApiError> {
        self.send_json(Method::Post, kind.path(), body).await
    }

    /// `PUT` replaces the whole record.
    ///
    /// # Errors
    ///
    /// Transport/status errors.
    pub async fn update<B: Serialize + ?Sized>(&self, kind: ResourceKind, id: i64, body: &B) -> Result<Value, ApiError> {
        self.send_json(Method::Put, &item_path(kind, id), body).await
    }

    /// # Errors
    ///
    /// Transport/status errors.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        self.delete_kind(R::KIND, id).await
    }

    // -------------------------------------------------------------------------
    // Kind-dispatched (one table implementation for every resource)
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport/status errors, or [`ApiError::Decode`] for an unknown envelope.
    pub async fn list_kind(&self, kind: ResourceKind) -> Result<Vec<Record>, ApiError> {
        let value = self.request(Method::Get, kind.path(), RequestBody::Empty).await?;
        Ok(kind.decode_records(&value)?)
    }

    /// Raw detail payload for `kind`/`id`, unwrapped from `data`.
    ///
    /// # Errors
    ///
    /// Transport/status errors, or [`ApiError::Decode`] for an unknown envelope.
    pub async fn get_kind(&self, kind: ResourceKind, id: i64) -> Result<Value, ApiError> {
        let value = self.request(Method::Get, &item_path(kind, id), RequestBody::Empty).await?;
        kind.decode_detail(&value).map_err(ApiError::from)
    }

    /// # Errors
    ///
    /// Transport/status errors.
    pub async fn delete_kind(&self, kind: ResourceKind, id: i64) -> Result<(), ApiError> {
        self.request(Method::Delete, &item_path(kind, id), RequestBody::Empty)
            .await?;
        tracing::info!(%kind, id, "deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Bookings and assets
    // -------------------------------------------------------------------------

    /// The signed-in customer's bookings, newest first.
    ///
    /// # Errors
    ///
    /// Transport/status errors, or [`ApiError::Decode`] for an unknown envelope.
    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let value = self
            .request(Method::Get, "/api/my-bookings", RequestBody::Empty)
            .await?;
        let mut bookings = normalize::<Booking>(&value)?;
        envelope::newest_first(&mut bookings);
        Ok(bookings)
    }

    /// Attach `files` to the record `kind`/`model_id`. No request is sent
    /// for an empty file list.
    ///
    /// # Errors
    ///
    /// Transport/status errors.
    pub async fn upload_assets(&self, kind: ResourceKind, model_id: i64, files: Vec<Upload>) -> Result<Value, ApiError> {
        if files.is_empty() {
            return Ok(Value::Null);
        }
        let count = files.len();
        let mut parts = vec![
            Part::Text {
                name: "model_type".to_owned(),
                value: kind.model_type().to_owned(),
            },
            Part::Text {
                name: "model_id".to_owned(),
                value: model_id.to_string(),
            },
        ];
        parts.extend(files.into_iter().map(|file| Part::File {
            name: "files[]".to_owned(),
            file_name: file.file_name,
            mime: file.mime,
            bytes: file.bytes,
        }));
        let value = self
            .request(Method::Post, ASSETS_UPLOAD_PATH, RequestBody::Multipart(parts))
            .await?;
        tracing::info!(%kind, model_id, count, "assets uploaded");
        Ok(value)
    }

    /// Assets are keyed by their URL, sent as one encoded path segment.
    ///
    /// # Errors
    ///
    /// Transport/status errors.
    pub async fn delete_asset(&self, file_url: &str) -> Result<(), ApiError> {
        let path = format!("/api/assets/{}", encode_component(file_url));
        self.request(Method::Delete, &path, RequestBody::Empty).await?;
        Ok(())
    }
}

#[must_use]
pub fn item_path(kind: ResourceKind, id: i64) -> String {
    format!("{}/{id}", kind.path())
}

/// Percent-encode everything except the URI-component unreserved set
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
#[must_use]
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
