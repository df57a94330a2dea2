use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("User is already authenticated")]
    AlreadyAuthenticated,

    /// Registration failure carrying whatever message the server supplied.
    #[error("{}", .message.as_deref().unwrap_or_default())]
    Registration { message: Option<String> },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - token may be invalid")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Shape of the JSON error bodies the service returns.
#[derive(Debug, Default, Deserialize)]
pub struct ServerErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// Pull the `message` field out of a server error body, if there is one.
pub fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ServerErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.message)
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            code => ApiError::Http {
                status: code,
                body: truncated,
            },
        }
    }

    /// True for errors raised locally before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated | ApiError::AlreadyAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(r#"{"message":"username taken"}"#).as_deref(),
            Some("username taken")
        );
        assert_eq!(extract_message(r#"{"error":"nope"}"#), None);
        assert_eq!(extract_message("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn test_registration_display() {
        let err = ApiError::Registration {
            message: Some("username taken".to_string()),
        };
        assert_eq!(err.to_string(), "username taken");

        let err = ApiError::Registration { message: None };
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_from_status() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "gone"),
            ApiError::NotFound(ref body) if body == "gone"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "bad"),
            ApiError::Http { status: 400, .. }
        ));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "é".repeat(400);
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.contains("truncated, 800 total bytes"));
    }

    #[test]
    fn test_is_precondition() {
        assert!(ApiError::NotAuthenticated.is_precondition());
        assert!(ApiError::AlreadyAuthenticated.is_precondition());
        assert!(!ApiError::Unauthorized.is_precondition());
    }
}
