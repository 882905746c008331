// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::persistence::PersistenceError;

/// Request failure, classified by kind. Only `NotAllowed` is visible to the
/// client as such; every other kind is reported as a generic server error.
#[derive(Debug)]
pub enum ApiError {
    // 403 Forbidden
    NotAllowed(String),

    // 500 Internal Server Error
    NotFound(String),
    Malformed(String),
    Storage(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotAllowed(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) | ApiError::Malformed(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-safe message; the detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::NotAllowed(_) => "forbidden",
            _ => "internal server error",
        }
    }

    /// Internal detail for logging
    pub fn detail(&self) -> &str {
        match self {
            ApiError::NotAllowed(msg)
            | ApiError::NotFound(msg)
            | ApiError::Malformed(msg)
            | ApiError::Storage(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotAllowed(_) => "NOT_ALLOWED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Malformed(_) => "MALFORMED",
            ApiError::Storage(_) => "STORAGE_FAILURE",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.public_message() })
    }
}

impl ApiError {
    pub fn not_allowed(message: impl Into<String>) -> Self {
        ApiError::NotAllowed(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ApiError::Malformed(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::Storage(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_not_allowed() {
            ApiError::not_allowed(err.to_string())
        } else {
            ApiError::storage(err.to_string())
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(_) => ApiError::not_found(err.to_string()),
            PersistenceError::InvalidId(_)
            | PersistenceError::Io(_)
            | PersistenceError::Encoding(_) => ApiError::storage(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.detail())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotAllowed(_) => tracing::warn!("request refused: {}", self),
            _ => tracing::error!("request failed: {}", self),
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
