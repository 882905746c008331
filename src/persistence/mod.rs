use async_trait::async_trait;
use thiserror::Error;

use crate::models::Todo;

pub mod directory;

pub use directory::DirectoryPersistence;

/// Errors from a todo store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("todo not found: {0}")]
    NotFound(String),

    #[error("invalid todo id: {0:?}")]
    InvalidId(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Storage for todos, one record per identity.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Store a todo and return its id. A record without an id gets a fresh
    /// one and `created` set to now; a supplied id keeps its `created`, which
    /// defaults to now when absent. An existing record with the same id is
    /// overwritten.
    async fn create(&self, todo: Todo) -> Result<String, PersistenceError>;

    /// Remove a single todo. Fails with `NotFound` if there is none.
    async fn delete(&self, id: &str) -> Result<(), PersistenceError>;

    /// Fetch a single todo. Fails with `NotFound` if there is none.
    async fn get(&self, id: &str) -> Result<Todo, PersistenceError>;

    /// All stored todos, ordered by id.
    async fn list(&self) -> Result<Vec<Todo>, PersistenceError>;
}

/// Fill in identity and creation time for a record about to be stored.
///
/// A generated id always comes with a fresh timestamp, so a new record can
/// never be backdated by the caller.
pub(crate) fn stamp_new(mut todo: Todo) -> Todo {
    if !todo.has_id() {
        todo.id = uuid::Uuid::new_v4().to_string();
        todo.created = Some(chrono::Utc::now());
    } else if todo.created.is_none() {
        todo.created = Some(chrono::Utc::now());
    }
    todo
}

/// Ids become file names, so anything that could escape the store
/// directory is refused.
pub(crate) fn validate_id(id: &str) -> Result<(), PersistenceError> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(|c| matches!(c, '/' | '\\' | '\0'));

    if invalid {
        Err(PersistenceError::InvalidId(id.to_string()))
    } else {
        Ok(())
    }
}
