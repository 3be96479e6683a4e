//! Browser transport for the shared REST client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every request fails with a transport error, since the
//! API is only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses keep their parsed body so `ApiError` can extract the
//! backend's message and field errors.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use resources::{ApiClient, ApiError, ApiRequest, Transport};
use serde_json::Value;

/// Used when `TOURDESK_API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// API origin baked in at compile time.
pub fn api_base_url() -> &'static str {
    option_env!("TOURDESK_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

#[cfg(any(test, feature = "hydrate"))]
fn request_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

/// Empty bodies are `Null`; anything else must be JSON.
#[cfg(any(test, feature = "hydrate"))]
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return Some(Value::Null);
    }
    serde_json::from_str(text).ok()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            send_browser(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available on server".to_owned()))
        }
    }
}

/// REST client carrying `token`.
pub fn client(token: Option<String>) -> ApiClient<GlooTransport> {
    ApiClient::new(GlooTransport).with_token(token)
}

#[cfg(feature = "hydrate")]
async fn send_browser(request: ApiRequest) -> Result<Value, ApiError> {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};
    use resources::{Method, RequestBody};

    let url = request_url(api_base_url(), &request.path);
    let method = match request.method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Delete => HttpMethod::DELETE,
    };
    let mut builder = RequestBuilder::new(&url)
        .method(method)
        .header("Accept", "application/json");
    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }
    let built = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(body) => builder.json(&body),
        RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
    }
    .map_err(|e| ApiError::Encode(e.to_string()))?;

    let resp = built
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = resp.status();
    let ok = resp.ok();
    let text = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    let body = parse_body(&text);
    if !ok {
        return Err(ApiError::Status {
            status,
            body: body.unwrap_or(Value::Null),
        });
    }
    body.ok_or_else(|| ApiError::Decode(format!("non-JSON response from {}", request.path)))
}

#[cfg(feature = "hydrate")]
fn form_data(parts: Vec<resources::Part>) -> Result<web_sys::FormData, ApiError> {
    use resources::Part;

    let encode = |_| ApiError::Encode("could not build multipart body".to_owned());
    let form = web_sys::FormData::new().map_err(encode)?;
    for part in parts {
        match part {
            Part::Text { name, value } => form.append_with_str(&name, &value).map_err(encode)?,
            Part::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let sequence = js_sys::Array::of1(&array);
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&mime);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&sequence, &options).map_err(encode)?;
                form.append_with_blob_and_filename(&name, &blob, &file_name)
                    .map_err(encode)?;
            }
        }
    }
    Ok(form)
}
