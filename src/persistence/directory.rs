use async_trait::async_trait;
use futures::future::try_join_all;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{stamp_new, validate_id, Persistence, PersistenceError};
use crate::models::Todo;

const RECORD_EXTENSION: &str = "json";

/// Todo store keeping one `<id>.json` file per record in a single directory.
#[derive(Debug, Clone)]
pub struct DirectoryPersistence {
    root: PathBuf,
}

impl DirectoryPersistence {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, RECORD_EXTENSION))
    }

    /// Write to a temp file next to the target and rename it into place, so
    /// readers see either the old record or the new one.
    async fn write_record(&self, id: &str, encoded: &[u8]) -> Result<(), PersistenceError> {
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", id, uuid::Uuid::new_v4().simple()));

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o640);

        let written: std::io::Result<()> = async {
            let mut file = options.open(&tmp).await?;
            file.write_all(encoded).await?;
            file.sync_all().await?;
            fs::rename(&tmp, self.path(id)).await
        }
        .await;

        if written.is_err() {
            let _ = fs::remove_file(&tmp).await;
        }
        written.map_err(PersistenceError::from)
    }

    /// `None` when the file is gone.
    async fn read_record(path: &Path) -> Result<Option<Todo>, PersistenceError> {
        let encoded = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&encoded)?))
    }

    async fn record_paths(&self) -> Result<Vec<PathBuf>, PersistenceError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut paths = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            paths.push(path);
        }

        Ok(paths)
    }
}

#[async_trait]
impl Persistence for DirectoryPersistence {
    async fn create(&self, todo: Todo) -> Result<String, PersistenceError> {
        let todo = stamp_new(todo);
        validate_id(&todo.id)?;

        let encoded = serde_json::to_vec(&todo)?;
        self.write_record(&todo.id, &encoded).await?;

        info!("stored todo {} {}", todo.id, todo);
        Ok(todo.id)
    }

    async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        validate_id(id)?;

        match fs::remove_file(self.path(id)).await {
            Ok(()) => {
                info!("removed todo {}", id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PersistenceError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, id: &str) -> Result<Todo, PersistenceError> {
        validate_id(id)?;

        Self::read_record(&self.path(id))
            .await?
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<Todo>, PersistenceError> {
        let paths = self.record_paths().await?;
        debug!("reading {} todo files from {}", paths.len(), self.root.display());

        // Files deleted between enumeration and read are skipped.
        let mut todos: Vec<Todo> = try_join_all(paths.iter().map(|p| Self::read_record(p)))
            .await?
            .into_iter()
            .flatten()
            .collect();

        todos.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(todos)
    }
}
