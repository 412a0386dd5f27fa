//! Key-value store backed by a JSON object file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key under which the last selected city is kept.
pub const CITY_KEY: &str = "city";

const STORE_FILE: &str = "store.json";

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is corrupted: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value. A missing file or key is `None`.
    pub async fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    /// Write a value, keeping the other keys.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut entries = match self.read_all().await {
            Ok(entries) => entries,
            Err(PersistError::Corrupt { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "replacing corrupted store");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|source| {
            PersistError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| self.io_error(source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        Ok(())
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, PersistError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_str(&json).map_err(|source| PersistError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_absent() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = KeyValueStore::in_dir(dir.path());
        assert_eq!(store.get(CITY_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = KeyValueStore::in_dir(dir.path());

        store.set(CITY_KEY, "London").await.unwrap();
        store.set("other", "value").await.unwrap();
        store.set(CITY_KEY, "Paris").await.unwrap();

        assert_eq!(store.get(CITY_KEY).await.unwrap().as_deref(), Some("Paris"));
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("value"));
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_missing_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = KeyValueStore::in_dir(&dir.path().join("nested").join("data"));

        store.set(CITY_KEY, "Kandy").await.unwrap();
        assert_eq!(store.get(CITY_KEY).await.unwrap().as_deref(), Some("Kandy"));
    }

    #[tokio::test]
    async fn test_corrupted_file_errors_on_read_and_is_replaced_on_write() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = KeyValueStore::in_dir(dir.path());
        std::fs::write(store.path(), "not json").unwrap();

        assert!(matches!(
            store.get(CITY_KEY).await,
            Err(PersistError::Corrupt { .. })
        ));

        store.set(CITY_KEY, "Tokyo").await.unwrap();
        assert_eq!(store.get(CITY_KEY).await.unwrap().as_deref(), Some("Tokyo"));
    }
}
