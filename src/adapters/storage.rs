use crate::domain::ports::QueryStore;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredState {
    last_query: Option<String>,
}

/// Keeps the last query in a small JSON file.
#[derive(Debug, Clone)]
pub struct FileQueryStore {
    path: PathBuf,
}

impl FileQueryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueryStore for FileQueryStore {
    async fn last_query(&self) -> Result<Option<String>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let state: StoredState = serde_json::from_slice(&data)?;
        Ok(state.last_query)
    }

    async fn remember_query(&self, query: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let state = StoredState {
            last_query: Some(query.to_string()),
        };
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&state)?).await?;

        tracing::debug!("Remembered last query in {}", self.path.display());
        Ok(())
    }
}

/// In-process store; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(query.to_string()))),
        }
    }
}

impl QueryStore for MemoryQueryStore {
    async fn last_query(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn remember_query(&self, query: &str) -> Result<()> {
        *self.slot.lock().await = Some(query.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::LookupError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileQueryStore::new(dir.path().join("state.json"));

        assert_eq!(store.last_query().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remember_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");
        let store = FileQueryStore::new(&path);

        store.remember_query("São Paulo").await.unwrap();

        assert!(path.exists());
        assert_eq!(store.last_query().await.unwrap(), Some("São Paulo".to_string()));
    }

    #[tokio::test]
    async fn test_remember_overwrites_single_slot() {
        let dir = TempDir::new().unwrap();
        let store = FileQueryStore::new(dir.path().join("state.json"));

        store.remember_query("Berlin").await.unwrap();
        store.remember_query("Madrid").await.unwrap();

        let reopened = FileQueryStore::new(store.path());
        assert_eq!(reopened.last_query().await.unwrap(), Some("Madrid".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = FileQueryStore::new(&path).last_query().await.unwrap_err();
        assert!(matches!(err, LookupError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_slot() {
        let store = MemoryQueryStore::new();
        let clone = store.clone();

        clone.remember_query("Tokyo").await.unwrap();

        assert_eq!(store.last_query().await.unwrap(), Some("Tokyo".to_string()));
    }
}
