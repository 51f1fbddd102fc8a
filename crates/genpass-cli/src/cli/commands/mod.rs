//! CLI command handlers, one file per command.

mod bridge;
mod config;
mod generate;
mod hostname;
mod referrer;

use std::sync::Arc;

use anyhow::Result;
use genpass_core::config::{ConfigStore, FileStorage};
use genpass_core::derive::Backends;
use genpass_core::session::{FileFetcher, Session, SessionOptions};
use genpass_core::settings::{self, GenpassSettings};

use super::terminal::{StdoutPort, TerminalUi};

pub use bridge::run_bridge;
pub use config::run_config;
pub use generate::{run_generate, GenerateArgs};
pub use hostname::run_hostname;
pub use referrer::run_referrer;

pub(crate) type CliSession = Session<FileStorage, StdoutPort, TerminalUi>;

/// Session over the on-disk config store and the bookmarklet assets in the data dir.
pub(crate) fn open_session(cfg: &GenpassSettings, ui: TerminalUi) -> Result<CliSession> {
    let store_path = cfg.resolved_store_path()?;
    tracing::debug!("config store at {}", store_path.display());
    let store = ConfigStore::new(FileStorage::open(store_path));
    let fetcher = FileFetcher::new(settings::data_dir()?);
    Ok(Session::new(
        store,
        ui,
        Backends::default(),
        Arc::new(fetcher),
        SessionOptions::from(cfg),
    ))
}
