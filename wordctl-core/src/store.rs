//! Per-user key-value persistence for word lists
//!
//! Each logical list is stored under a key such as `favorites_<userId>` and
//! holds a JSON array of [`Word`] records.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::{Result, WordError};
use crate::model::Word;

/// Storage key for a user's favorites
pub fn favorites_key(user_id: &str) -> String {
    format!("favorites_{user_id}")
}

/// Storage key for a user's access history
pub fn history_key(user_id: &str) -> String {
    format!("history_{user_id}")
}

/// Key-value store of word lists
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Read the list stored under `key`; `None` when nothing was saved yet
    async fn load(&self, key: &str) -> Result<Option<Vec<Word>>>;

    /// Replace the list stored under `key`
    async fn save(&self, key: &str, words: &[Word]) -> Result<()>;
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Path separators in user ids are flattened.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl WordStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<Word>>> {
        let path = self.path_for(key);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!(key, "no stored list");
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| WordError::storage_read(key, e.to_string()))?;
        let words = serde_json::from_str(&content)
            .map_err(|e| WordError::storage_read(key, e.to_string()))?;
        Ok(Some(words))
    }

    async fn save(&self, key: &str, words: &[Word]) -> Result<()> {
        let json = serde_json::to_string(words)
            .map_err(|e| WordError::storage_write(key, e.to_string()))?;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| WordError::storage_write(key, e.to_string()))?;

        // Write through a temp file so a crash never leaves half a list
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| WordError::storage_write(key, e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| WordError::storage_write(key, e.to_string()))?;
        debug!(key, count = words.len(), "saved list");
        Ok(())
    }
}

/// Volatile store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Seed raw content for `key`, e.g. to simulate a corrupted entry
    pub fn insert_raw(&self, key: &str, raw: impl Into<String>) {
        if let Ok(mut data) = self.data.lock() {
            data.insert(key.to_string(), raw.into());
        }
    }
}

#[async_trait]
impl WordStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<Word>>> {
        let raw = {
            let data = self
                .data
                .lock()
                .map_err(|e| WordError::storage_read(key, e.to_string()))?;
            data.get(key).cloned()
        };
        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| WordError::storage_read(key, e.to_string())),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, words: &[Word]) -> Result<()> {
        if self.read_only {
            return Err(WordError::storage_write(key, "store is read-only"));
        }
        let json = serde_json::to_string(words)
            .map_err(|e| WordError::storage_write(key, e.to_string()))?;
        self.data
            .lock()
            .map_err(|e| WordError::storage_write(key, e.to_string()))?
            .insert(key.to_string(), json);
        Ok(())
    }
}
