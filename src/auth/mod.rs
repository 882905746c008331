use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use thiserror::Error;

use crate::models::User;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credentials: access not permitted")]
    MissingCredentials,

    #[error("malformed credentials ({0}): access not permitted")]
    MalformedCredentials(&'static str),

    #[error("access not permitted")]
    NotPermitted,

    #[error("failed to read users file: {0}")]
    UsersFile(#[from] std::io::Error),

    #[error("failed to decode users file: {0}")]
    UsersFormat(#[from] serde_json::Error),
}

impl AuthError {
    /// Whether the caller should be refused (403) rather than the server
    /// having failed.
    pub fn is_not_allowed(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredentials
                | AuthError::MalformedCredentials(_)
                | AuthError::NotPermitted
        )
    }
}

/// Permits or rejects access for HTTP requests.
pub trait Authentication: Send + Sync {
    /// Returns the id of the user making the request.
    fn authenticate(&self, headers: &HeaderMap) -> Result<String, AuthError>;
}

/// Checks HTTP basic credentials against a fixed list of users.
#[derive(Debug, Clone, Default)]
pub struct UsersAuthentication {
    users: Vec<User>,
}

impl UsersAuthentication {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Load the user list from a JSON array file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let encoded = std::fs::read(path.as_ref())?;
        let users: Vec<User> = serde_json::from_slice(&encoded)?;
        Ok(Self::new(users))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Authentication for UsersAuthentication {
    fn authenticate(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        let (name, password) = basic_credentials(headers)?;

        // Plain equality, not constant time.
        self.users
            .iter()
            .find(|user| user.name == name && user.password == password)
            .map(|user| user.id.clone())
            .ok_or(AuthError::NotPermitted)
    }
}

/// Extract the `(name, password)` pair from a `Basic` Authorization header.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    let value = header
        .to_str()
        .map_err(|_| AuthError::MalformedCredentials("header is not visible ASCII"))?;

    let (scheme, payload) = value
        .split_once(' ')
        .ok_or(AuthError::MalformedCredentials("missing scheme"))?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::MalformedCredentials("not a basic scheme"));
    }

    let decoded = STANDARD
        .decode(payload.trim())
        .map_err(|_| AuthError::MalformedCredentials("invalid base64"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::MalformedCredentials("invalid UTF-8"))?;

    let (name, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials("missing colon"))?;

    Ok((name.to_string(), password.to_string()))
}

/// `Authorization` header value for the given credentials.
#[cfg(test)]
pub fn basic_header_value(name: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", name, password)))
}
