/*
[INPUT]:  Error sources (HTTP, API error bodies, serialization, URLs)
[OUTPUT]: Structured error types with user-facing messages and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main error type for the roster adapter
#[derive(Error, Debug)]
pub enum RosterError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Server rejected the bearer token
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },
}

/// Error body produced by the roster server (Spring `ResponseStatusException`).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl RosterError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            RosterError::Http(_)
            | RosterError::Timeout { .. }
            | RosterError::InvalidResponse(_) => true,
            RosterError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, RosterError::Unauthorized { .. })
    }

    /// Text to surface to the user: the server's own message when it sent one
    pub fn user_message(&self) -> String {
        match self {
            RosterError::Api { message, .. } | RosterError::Unauthorized { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RosterError::Unauthorized { message }
            }
            _ => RosterError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Build an error from a non-success response body.
    ///
    /// Message precedence: `message` field, `error` field, raw body, status reason.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .or(parsed.error.filter(|e| !e.trim().is_empty()))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && !trimmed.starts_with('{')).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        Self::api_error(status, message)
    }
}

/// Result type alias for roster adapter operations
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_error_retryable() {
        let timeout_err = RosterError::Timeout { duration: 30 };
        assert!(timeout_err.is_retryable());

        let server_err = RosterError::api_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(server_err.is_retryable());

        let bad_request =
            RosterError::api_error(StatusCode::BAD_REQUEST, "Unit update is not valid");
        assert!(!bad_request.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(RosterError::api_error(StatusCode::UNAUTHORIZED, "nope").is_auth_error());
        assert!(RosterError::api_error(StatusCode::FORBIDDEN, "nope").is_auth_error());
        assert!(!RosterError::Timeout { duration: 30 }.is_auth_error());
    }

    #[rstest]
    #[case(
        r#"{"status":400,"message":"Team cannot afford this unit"}"#,
        "Team cannot afford this unit"
    )]
    #[case(
        r#"{"status":500,"error":"Internal Server Error","message":""}"#,
        "Internal Server Error"
    )]
    #[case("plain failure", "plain failure")]
    #[case("", "Bad Request")]
    #[case("{}", "Bad Request")]
    fn test_message_from_response(#[case] body: &str, #[case] expected: &str) {
        let err = RosterError::from_response(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.user_message(), expected);
    }

    #[test]
    fn test_api_error_creation() {
        let err = RosterError::api_error(StatusCode::BAD_REQUEST, "Invalid team");
        match err {
            RosterError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid team");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
