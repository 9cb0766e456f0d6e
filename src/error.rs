//! Error taxonomy for every call that goes through the storefront API.

/// Errors produced by the gateway, the session store and the endpoint wrappers.
///
/// The type is `Clone` because one failed refresh is reported to every request
/// that was waiting on it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response reached us (connect failure, timeout, broken body stream).
    #[error("network error: {0}")]
    Network(String),

    /// A 401 that will not be recovered by a refresh.
    #[error("unauthorized: {path}")]
    Unauthorized { path: String },

    /// Any other non-success HTTP status.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// A 2xx response whose envelope did not report `status: "success"`.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The persisted profile could not be read or written.
    #[error("profile storage error: {0}")]
    Storage(String),

    /// The request could not be built (bad URL, header or form part).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// The server-provided message, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Application { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Text to show the user: the server's message when there is one, `fallback` otherwise.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Status { status: 401, .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
