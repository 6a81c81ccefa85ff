use std::fmt;

use serde_json::Value;

/// Failure of a call against the notes server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Login was rejected (any non-2xx from the login endpoint).
    InvalidCredentials,
    /// Input was rejected before any request was sent.
    Validation(String),
    /// The server refused a registration.
    Registration { message: String },
    /// An authorized request came back 401.
    SessionExpired,
    /// Any other non-2xx response.
    Status { status: u16, body: String },
    /// The request never produced a response (connect, timeout, TLS, ...).
    Transport(String),
    /// A 2xx response whose body did not have the expected shape.
    Decode(String),
    /// A local file could not be read or written.
    Io(String),
}

impl ApiError {
    /// Builds a registration error from the server's response body.
    ///
    /// Prefers the payload's `message` field; falls back to the raw body.
    pub fn registration(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            });
        ApiError::Registration { message }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidCredentials => {
                write!(f, "Login failed. Please check your credentials.")
            }
            ApiError::Validation(message) => write!(f, "{message}"),
            ApiError::Registration { message } => write!(f, "Registration failed: {message}"),
            ApiError::SessionExpired => write!(f, "Session expired. Please login again."),
            ApiError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "HTTP {status}: {body}")
                }
            }
            ApiError::Transport(message) => write!(f, "{message}"),
            ApiError::Decode(message) => write!(f, "Unexpected response: {message}"),
            ApiError::Io(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_timeout() {
            ApiError::Transport(format!("Request timed out: {e}"))
        } else if e.is_connect() {
            ApiError::Transport(format!("Connection failed: {e}"))
        } else {
            ApiError::Transport(format!("Network error: {e}"))
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_prefers_message_field() {
        let err = ApiError::registration(400, r#"{"message":"Email already in use"}"#);
        assert_eq!(
            err,
            ApiError::Registration {
                message: "Email already in use".to_string()
            }
        );
    }

    #[test]
    fn test_registration_falls_back_to_raw_body() {
        let err = ApiError::registration(409, r#"{"error":"conflict"}"#);
        assert_eq!(
            err,
            ApiError::Registration {
                message: r#"{"error":"conflict"}"#.to_string()
            }
        );

        let err = ApiError::registration(500, "");
        assert_eq!(err.to_string(), "Registration failed: HTTP 500");
    }
}
