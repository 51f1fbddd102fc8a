//! `genpass config` – effective stored settings for a domain.

use anyhow::Result;
use genpass_core::config::{ConfigStore, FileStorage, DEFAULT_KEY};
use genpass_core::settings::GenpassSettings;

pub fn run_config(cfg: &GenpassSettings, domain: Option<&str>) -> Result<()> {
    let path = cfg.resolved_store_path()?;
    let store = ConfigStore::new(FileStorage::open(&path));
    let key = domain.map(str::trim).unwrap_or_default();
    let record = store.load(key);

    println!("# {} ({})", if key.is_empty() { DEFAULT_KEY } else { key }, path.display());
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
