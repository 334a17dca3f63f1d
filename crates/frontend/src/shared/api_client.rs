//! HTTP transport for frontend-backend communication.
//!
//! All requests go through [`ApiClient`]: it derives the backend base
//! URL from the current window location, attaches the bearer credential
//! supplied by a [`TokenProvider`], and converts non-2xx responses into
//! a uniform [`RequestError`]. The client never touches component
//! state; callers own all store mutation.

use std::sync::Arc;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    /// Non-2xx HTTP response. `detail` is taken from the response body
    /// when the server provided one, otherwise keyed by status.
    #[error("{detail}")]
    Transport { status: u16, detail: String },
    /// Network failure, serialization failure, unparseable response.
    #[error("{0}")]
    Unexpected(String),
}

/// Supplies the bearer token, if any. Token issuance, refresh, and
/// storage belong to the auth collaborator, not to the transport.
pub trait TokenProvider {
    fn token(&self) -> Option<String>;
}

/// Get the base URL for API requests.
///
/// Constructs the URL from the current window location, using port 8000
/// for the backend server. Empty when no window is available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000", protocol, hostname)
}

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
}

impl ApiClient {
    pub fn new(tokens: Arc<dyn TokenProvider + Send + Sync>) -> Self {
        Self {
            base: api_base(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// A missing token is not an error here: the request proceeds
    /// anonymously and the server decides whether that is acceptable.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self
            .authorize(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(send_error)?;
        parse(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestError> {
        let request = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| RequestError::Unexpected(format!("failed to serialize request: {}", e)))?;
        let response = request.send().await.map_err(send_error)?;
        parse(response).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestError> {
        let request = self
            .authorize(Request::put(&self.url(path)))
            .json(body)
            .map_err(|e| RequestError::Unexpected(format!("failed to serialize request: {}", e)))?;
        let response = request.send().await.map_err(send_error)?;
        parse(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), RequestError> {
        let response = self
            .authorize(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(send_error)?;
        if !response.ok() {
            return Err(transport_error(response).await);
        }
        Ok(())
    }

    /// Multipart upload: the form body is passed through untouched and
    /// no JSON content type is forced (the browser sets the boundary).
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<T, RequestError> {
        let request = self
            .authorize(Request::post(&self.url(path)))
            .body(form)
            .map_err(|e| RequestError::Unexpected(format!("failed to build request: {}", e)))?;
        let response = request.send().await.map_err(send_error)?;
        parse(response).await
    }
}

fn send_error(e: gloo_net::Error) -> RequestError {
    RequestError::Unexpected(format!("failed to send request: {}", e))
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
    if !response.ok() {
        return Err(transport_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| RequestError::Unexpected(format!("failed to parse response: {}", e)))
}

async fn transport_error(response: Response) -> RequestError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    RequestError::Transport {
        status,
        detail: error_detail(status, &body),
    }
}

/// Extract a human-readable message from an error response body.
///
/// Prefers the body's own error field (`detail`, `error`, `message`);
/// falls back to a generic message keyed by status.
pub fn error_detail(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    match status {
        400 => "Invalid request".to_string(),
        401 => "Authentication required".to_string(),
        403 => "Access denied".to_string(),
        404 => "Not found".to_string(),
        500..=599 => "Server error".to_string(),
        _ => format!("Request failed with status {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_detail_field_wins() {
        assert_eq!(
            error_detail(400, r#"{"detail": "Unsupported file type"}"#),
            "Unsupported file type"
        );
    }

    #[test]
    fn error_and_message_fields_are_fallbacks() {
        assert_eq!(error_detail(400, r#"{"error": "bad item"}"#), "bad item");
        assert_eq!(error_detail(400, r#"{"message": "nope"}"#), "nope");
    }

    #[test]
    fn unparseable_body_falls_back_to_status_message() {
        assert_eq!(error_detail(404, "<html>not json</html>"), "Not found");
        assert_eq!(error_detail(503, ""), "Server error");
        assert_eq!(error_detail(418, ""), "Request failed with status 418");
    }

    #[test]
    fn empty_detail_string_is_ignored() {
        assert_eq!(error_detail(401, r#"{"detail": ""}"#), "Authentication required");
    }

    #[test]
    fn transport_error_displays_its_detail() {
        let err = RequestError::Transport {
            status: 400,
            detail: "Unsupported file type".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported file type");
    }
}
