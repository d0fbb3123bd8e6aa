//! JSON key-value file store.
//!
//! A small device-storage replacement: one JSON object on disk mapping keys
//! to string values. Values are usually JSON documents themselves (the
//! signed-in user is stored as a serialized object under `"user"`).
//!
//! Writes go through a temporary file followed by an atomic rename, and are
//! serialized through an async mutex so concurrent `set_item` calls cannot
//! lose updates.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use wayfarer_core::{Result, WayfarerError};

type Entries = BTreeMap<String, String>;

/// File-backed string store.
#[derive(Debug)]
pub struct JsonKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonKeyValueStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value stored under `key`, if any.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries().await?;
        Ok(entries.get(key).cloned())
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set_item(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.into());
        self.write_entries(&entries).await
    }

    /// Removes `key`. Removing a missing key is not an error.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }

    async fn read_entries(&self) -> Result<Entries> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn write_entries(&self, entries: &Entries) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;

        // Write to temporary file in the same directory
        let tmp_path = self.temp_path()?;
        let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
        tmp_file.write_all(json.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        // Atomic rename
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| WayfarerError::io("Storage path has no file name"))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}
