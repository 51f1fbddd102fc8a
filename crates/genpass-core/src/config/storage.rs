//! Flat key -> string storage backends.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Storage failure. Callers in this crate log and swallow these.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage quota exceeded writing {key:?}: {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A persistent key -> string map with no indexing.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage with an optional byte quota over keys plus values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_without(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage kept in one JSON object file, replaced atomically on every write.
///
/// A write goes to `<file>.tmp` and is renamed over the store; the store it
/// replaces is kept as `<file>.bak` and used when the main file is missing or
/// does not parse.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
    /// The main file parsed (or did not exist) at open; only then is it
    /// worth keeping as the backup.
    main_valid: bool,
}

impl FileStorage {
    /// Default path: `~/.local/state/genpass/store.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("genpass")?;
        Ok(xdg_dirs.get_state_home().join("store.json"))
    }

    /// Open the store at `path`. Never fails: a damaged main file falls back
    /// to the backup, and with neither readable the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (items, main_valid) = match Self::read_items(&path) {
            Ok(Some(items)) => (items, true),
            Ok(None) => (Self::read_backup(&path).unwrap_or_default(), true),
            Err(err) => {
                tracing::warn!("config store {} unusable: {err}", path.display());
                (Self::read_backup(&path).unwrap_or_default(), false)
            }
        };
        Self {
            path,
            items,
            main_valid,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(path: &Path, suffix: &str) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        path.with_file_name(name)
    }

    /// `Ok(None)` when the file does not exist.
    fn read_items(path: &Path) -> Result<Option<BTreeMap<String, String>>, StorageError> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn read_backup(path: &Path) -> Option<BTreeMap<String, String>> {
        let backup = Self::sibling(path, ".bak");
        match Self::read_items(&backup) {
            Ok(Some(items)) => {
                tracing::warn!("config store restored from {}", backup.display());
                Some(items)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("config store backup {} unusable: {err}", backup.display());
                None
            }
        }
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(&self.items)?;

        let temp_path = Self::sibling(&self.path, ".tmp");
        {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }

        if self.main_valid && self.path.exists() {
            std::fs::rename(&self.path, Self::sibling(&self.path, ".bak"))?;
        }
        std::fs::rename(&temp_path, &self.path)?;
        self.main_valid = true;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}
