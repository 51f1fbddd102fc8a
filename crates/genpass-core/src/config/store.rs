//! Merge and write-back of per-domain configuration.

use crate::derive::DerivationRequest;

use super::record::{ConfigOverlay, ConfigRecord};
use super::storage::Storage;

/// Reserved key holding the most recently used settings.
pub const DEFAULT_KEY: &str = "default";

/// Configuration store over a [`Storage`] backend.
#[derive(Debug)]
pub struct ConfigStore<S> {
    storage: S,
}

impl<S: Storage> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Effective settings for `domain`.
    ///
    /// Built-in default, then the stored `"default"` record, then the stored
    /// record for `domain`; later layers win field by field. An empty domain
    /// only gets the first two layers.
    pub fn load(&self, domain: &str) -> ConfigRecord {
        let mut record = ConfigRecord::default().overlay(&self.read_overlay(DEFAULT_KEY));
        if !domain.is_empty() && domain != DEFAULT_KEY {
            record = record.overlay(&self.read_overlay(domain));
        }
        record
    }

    /// Remember the settings of a successful derivation under `domain` and
    /// as the new global default. Failures are logged and dropped.
    pub fn save(&mut self, domain: &str, request: &DerivationRequest) {
        let record = ConfigRecord::from_request(request);
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("config record for {domain} not serializable: {err}");
                return;
            }
        };

        for key in [domain, DEFAULT_KEY] {
            if key.is_empty() {
                continue;
            }
            if let Err(err) = self.storage.set_item(key, &json) {
                tracing::warn!("config not saved under {key:?}: {err}");
            }
        }
        tracing::debug!(domain, method = %record.method, "saved config");
    }

    fn read_overlay(&self, key: &str) -> ConfigOverlay {
        match self.storage.get_item(key) {
            Ok(Some(raw)) => ConfigOverlay::parse(&raw),
            Ok(None) => ConfigOverlay::default(),
            Err(err) => {
                tracing::warn!("config for {key:?} unreadable: {err}");
                ConfigOverlay::default()
            }
        }
    }
}
