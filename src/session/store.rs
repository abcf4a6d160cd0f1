//! Persisted session key-value storage

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Key holding the persisted role value
pub const ROLE_KEY: &str = "userRole";

/// Key holding the opaque session token
pub const TOKEN_KEY: &str = "token";

/// Key-value storage the session controller reads and writes through.
///
/// Implementations mirror browser local storage: string keys, string
/// values, absent keys read as `None`, removing an absent key is a no-op.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Write several keys as one change.
    ///
    /// Either every pair is stored or the store is left as it was. The
    /// fallback writes one key at a time and puts back the earlier values
    /// if a later write fails; stores that can commit in one step override it.
    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut written: Vec<(&str, Option<String>)> = Vec::with_capacity(pairs.len());

        for &(key, value) in pairs {
            let prior = self.get(key)?;
            if let Err(e) = self.set(key, value) {
                for (key, prior) in written.into_iter().rev() {
                    let restored = match prior {
                        Some(prior) => self.set(key, &prior),
                        None => self.remove(key),
                    };
                    if let Err(restore_err) = restored {
                        tracing::error!("Failed to restore {} after a failed write: {}", key, restore_err);
                    }
                }
                return Err(e);
            }
            written.push((key, prior));
        }

        Ok(())
    }
}

/// In-memory store, used by tests and one-shot tooling
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given pairs
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut entries = self.entries.write();
        for &(key, value) in pairs {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// On-disk layout of a [`FileStore`]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default)]
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// JSON file backed store that survives process restarts
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreDocument> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(StoreDocument::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, mut doc: StoreDocument) -> Result<()> {
        doc.updated_at = Some(chrono::Utc::now());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| Error::Store(format!("invalid state file path: {:?}", self.path)))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, serde_json::to_string_pretty(&doc)?)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!("Saved session state to {:?}", self.path);
        Ok(())
    }

    /// Last time any key was written, if the file exists
    pub fn updated_at(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        let _guard = self.lock.read();
        Ok(self.load()?.updated_at)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.read();
        Ok(self.load()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.write();
        let mut doc = self.load()?;
        doc.entries.insert(key.to_string(), value.to_string());
        self.save(doc)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.write();
        let mut doc = self.load()?;
        if doc.entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(doc)
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let _guard = self.lock.write();
        let mut doc = self.load()?;
        for &(key, value) in pairs {
            doc.entries.insert(key.to_string(), value.to_string());
        }
        self.save(doc)
    }
}
