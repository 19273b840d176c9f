use serde_json::Value;

/// Authentication failure: the key is missing, rejected, or the profile
/// request could not be completed.
///
/// Kept separate from [`ApiError`] because login failures are recoverable
/// (the user is re-prompted) while other fetch failures end the current view.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("API key is empty")]
    EmptyKey,
    #[error("API key was rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("could not reach the Chaparral API: {0}")]
    Transport(String),
    #[error("unexpected response while fetching the user profile: {0}")]
    InvalidResponse(String),
    /// The service answered with a status other than 401/403; the key may
    /// still be valid.
    #[error("could not fetch the user profile: {0}")]
    Unavailable(ApiError),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                status: status @ (401 | 403),
                message,
                ..
            } => AuthError::Rejected { status, message },
            err @ ApiError::Status { .. } => AuthError::Unavailable(err),
            ApiError::Transport { message, .. } => AuthError::Transport(message),
            ApiError::Decode { message, .. } => AuthError::InvalidResponse(message),
            ApiError::Config(message) => AuthError::Transport(message),
        }
    }
}

/// Any other remote failure.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP status error (4xx, 5xx).
    #[error("GET {path} failed with HTTP {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },
    /// Connection failure or timeout.
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },
    /// Response body did not match the expected shape.
    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },
    /// Client could not be built from the configuration.
    #[error("invalid API client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Creates an HTTP status error, preferring the server's own message.
    ///
    /// Recognizes `{"detail": "..."}`, `{"message": "..."}` and
    /// `{"error": {"message": "..."}}` bodies; otherwise keeps the raw body.
    pub fn status(path: &str, status: u16, body: &str) -> Self {
        let message = extract_error_message(body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        });
        ApiError::Status {
            path: path.to_string(),
            status,
            message,
        }
    }

    pub fn transport(path: &str, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        ApiError::Transport {
            path: path.to_string(),
            message,
        }
    }

    pub fn decode(path: &str, err: &impl std::fmt::Display) -> Self {
        ApiError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let text = json
        .get("detail")
        .or_else(|| json.get("message"))
        .or_else(|| json.get("error").and_then(|e| e.get("message")))?;
    match text {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_detail_field() {
        let err = ApiError::status("/search_result", 404, r#"{"detail":"Not found"}"#);
        assert_eq!(err.to_string(), "GET /search_result failed with HTTP 404: Not found");
    }

    #[test]
    fn test_status_reads_nested_error_message() {
        let err = ApiError::status("/x", 500, r#"{"error":{"message":"boom"}}"#);
        assert!(err.to_string().ends_with("boom"));
    }

    #[test]
    fn test_status_keeps_plain_body() {
        let err = ApiError::status("/x", 502, "  Bad Gateway \n");
        assert!(err.to_string().ends_with("Bad Gateway"));

        let err = ApiError::status("/x", 503, "");
        assert!(err.to_string().ends_with("no response body"));
    }

    #[test]
    fn test_auth_error_from_status() {
        let auth: AuthError = ApiError::status("/user/profile", 401, r#"{"detail":"Invalid key"}"#).into();
        assert_eq!(
            auth,
            AuthError::Rejected {
                status: 401,
                message: "Invalid key".to_string(),
            }
        );

        let auth: AuthError = ApiError::status("/user/profile", 403, "forbidden").into();
        assert!(matches!(auth, AuthError::Rejected { status: 403, .. }));
    }

    #[test]
    fn test_auth_error_from_other_status_is_not_a_rejection() {
        let err = ApiError::status("/user/profile", 503, "maintenance");
        let auth: AuthError = err.clone().into();
        assert_eq!(auth, AuthError::Unavailable(err));
        assert_eq!(
            auth.to_string(),
            "could not fetch the user profile: GET /user/profile failed with HTTP 503: maintenance"
        );
    }
}
