//! File-backed local key-value storage
//!
//! Holds the admin/VIP auth tokens and the cached user records. Values are
//! read on every authenticated request, written at login and cleared at logout.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, error};
use crate::utils::errors::{RetailChampionsError, Result};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const VIP_TOKEN_KEY: &str = "vipToken";
pub const VIP_USER_KEY: &str = "vipUser";

/// Local storage shared by every service of one client instance
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl LocalStorage {
    /// Open storage backed by a JSON file, creating it lazily on first write
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    error!(path = %path.display(), error = %e, "Local storage file is corrupt");
                    RetailChampionsError::Storage(format!("{}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened local storage");
        Ok(Self {
            path: Some(path),
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Storage that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        {
            let mut entries = self.write_guard()?;
            entries.insert(key.to_string(), value.into());
        }
        self.persist()
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let removed = {
            let mut entries = self.write_guard()?;
            entries.remove(key).is_some()
        };
        if removed {
            self.persist()?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn write_guard(&self) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .write()
            .map_err(|_| RetailChampionsError::Storage("storage lock poisoned".to_string()))
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let serialized = {
            let entries = self
                .entries
                .read()
                .map_err(|_| RetailChampionsError::Storage("storage lock poisoned".to_string()))?;
            serde_json::to_string_pretty(&*entries)?
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serialized)?;
        debug!(path = %path.display(), "Persisted local storage");
        Ok(())
    }
}
