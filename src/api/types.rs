use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Connection settings for the marketplace service
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL, without a trailing slash
    pub server_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("rentup-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path.trim_start_matches('/'))
    }
}

/// Failure of a single call to the service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text shown to the user: the server's message when it sent one
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Successful registration answer
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationReceipt {
    pub status: u16,
    pub message: String,
}

/// Error and info bodies carry a `message` field
#[derive(Debug, Deserialize)]
pub(crate) struct ServerMessage {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub mobile_number: &'a str,
    pub password: &'a str,
}

/// Extract the message from a response body, falling back to the raw text
pub(crate) fn message_from_body(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ServerMessage>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ClientConfig::default().with_server_url("http://api.rentup.test/");
        assert_eq!(
            config.endpoint("/visit/schedule"),
            "http://api.rentup.test/visit/schedule"
        );
        assert_eq!(
            config.endpoint("users/register"),
            "http://api.rentup.test/users/register"
        );
    }

    #[test]
    fn message_prefers_json_field() {
        assert_eq!(
            message_from_body(r#"{"message":"Email already registered"}"#, "Conflict"),
            "Email already registered"
        );
        assert_eq!(message_from_body("  plain text ", "Bad Request"), "plain text");
        assert_eq!(message_from_body("", "Bad Request"), "Bad Request");
    }

    #[test]
    fn status_error_shows_server_message() {
        let err = ApiError::Status {
            status: 409,
            message: "Email already registered".to_string(),
        };
        assert_eq!(err.user_message(), "Email already registered");
    }
}
