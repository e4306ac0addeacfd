//! File-backed token store
//!
//! The whole store is one flat JSON object of strings. It is loaded when the
//! store is opened and rewritten atomically after every change.

use crate::atomic_writer::AtomicWriter;
use crate::traits::{StorageError, StorageResult, TokenStore};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileTokenStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::parse(&path, &content)?
        } else {
            debug!("Session file {} does not exist yet", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(path: &Path, content: &str) -> StorageResult<BTreeMap<String, String>> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let value: Value = serde_json::from_str(content).map_err(|e| {
            StorageError::Serialization(format!(
                "Failed to parse session file {}: {}",
                path.display(),
                e
            ))
        })?;

        let Value::Object(map) = value else {
            return Err(StorageError::Serialization(format!(
                "Session file {} is not a JSON object",
                path.display()
            )));
        };

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    entries.insert(key, s);
                }
                _ => warn!(
                    "Ignoring non-string entry '{}' in session file {}",
                    key,
                    path.display()
                ),
            }
        }
        Ok(entries)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("session store lock poisoned".to_string()))
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let map: Map<String, Value> = entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let content = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| {
            StorageError::Serialization(format!("Failed to serialize session: {}", e))
        })?;

        let mut writer = AtomicWriter::new(&self.path)?;
        writer.write(content.as_bytes())?;
        writer.commit()
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.lock()?;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.lock()?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
