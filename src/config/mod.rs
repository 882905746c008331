use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub address: String,
    /// Prefix prepended to every route path
    pub path_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per todo
    pub directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JSON file containing user credentials
    pub users_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                address: "127.0.0.1:12345".to_string(),
                path_prefix: "/v1".to_string(),
            },
            storage: StorageConfig {
                directory: PathBuf::from("data").join("store"),
            },
            auth: AuthConfig {
                users_file: PathBuf::from("data").join("users.json"),
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| env::var(key).ok())
    }

    fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("TODO_ADDRESS") {
            self.server.address = v;
        }
        if let Some(v) = var("TODO_PATH_PREFIX") {
            self.server.path_prefix = v;
        }
        if let Some(v) = var("TODO_STORAGE_DIRECTORY") {
            self.storage.directory = PathBuf::from(v);
        }
        if let Some(v) = var("TODO_USERS_FILE") {
            self.auth.users_file = PathBuf::from(v);
        }
        self
    }
}

/// Normalize a route prefix to either `""` or `/segment[/segment...]`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
