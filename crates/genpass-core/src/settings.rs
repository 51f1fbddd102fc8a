//! Application settings loaded from `~/.config/genpass/config.toml`.
//!
//! These are install-level knobs (bookmarklet version, asset location, UI
//! details). Per-site derivation settings live in the [`crate::config`] store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::channel::DEFAULT_LATEST_VERSION;

/// Default bookmarklet asset, relative to the data directory.
const DEFAULT_BOOKMARKLET_ASSET: &str = "bookmarklet/bookmarklet.min.js";

/// Global settings for the genpass front ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenpassSettings {
    /// Bookmarklet version shipped with this install; older handshakes get an update notice.
    pub latest_bookmarklet_version: u64,
    /// Location of the latest bookmarklet asset, relative to the data directory.
    pub bookmarklet_asset: String,
    /// Number of `*` characters the progress mask grows to.
    pub mask_length: usize,
    /// Optional language code for labels (e.g. "de", "pt-br").
    #[serde(default)]
    pub language: Option<String>,
    /// Optional override for the per-site config store file.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Default for GenpassSettings {
    fn default() -> Self {
        Self {
            latest_bookmarklet_version: DEFAULT_LATEST_VERSION,
            bookmarklet_asset: DEFAULT_BOOKMARKLET_ASSET.to_string(),
            mask_length: 16,
            language: None,
            store_path: None,
        }
    }
}

impl GenpassSettings {
    /// Path of the per-site config store: the override, or
    /// `~/.local/state/genpass/store.json`.
    pub fn resolved_store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => crate::config::FileStorage::default_path(),
        }
    }
}

pub fn settings_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("genpass")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Data directory holding the bookmarklet assets (`~/.local/share/genpass`).
pub fn data_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("genpass")?;
    Ok(xdg_dirs.get_data_home())
}

/// Load settings from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GenpassSettings> {
    load_or_init_at(&settings_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<GenpassSettings> {
    if !path.exists() {
        let default_settings = GenpassSettings::default();
        let toml = toml::to_string_pretty(&default_settings)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write settings: {}", path.display()))?;
        tracing::info!("created default settings at {}", path.display());
        return Ok(default_settings);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read settings: {}", path.display()))?;
    let settings: GenpassSettings =
        toml::from_str(&data).with_context(|| format!("parse settings: {}", path.display()))?;
    Ok(settings)
}
