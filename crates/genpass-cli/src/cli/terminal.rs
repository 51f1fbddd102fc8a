//! Terminal bindings for the core's UI and message-port seams.

use std::io::Write;

use genpass_core::channel::MessagePort;
use genpass_core::config::ConfigRecord;
use genpass_core::locale::Localization;
use genpass_core::ui::{Field, Ui, UiCommand};
use serde::Serialize;

/// Pixel height reported per visible form row.
const ROW_HEIGHT: u32 = 40;
const BASE_ROWS: u32 = 4;

/// Form state mirrored from [`UiCommand`]s.
#[derive(Debug, Default)]
pub struct TerminalUi {
    pub domain: String,
    pub config: Option<ConfigRecord>,
    pub missing: Vec<Field>,
    pub progress: Option<String>,
    pub password: Option<String>,
    pub masked: bool,
    pub advanced: bool,
    pub cost_visible: bool,
    pub update: Option<String>,
    pub identicon: Option<String>,
    pub localization: Option<&'static Localization>,
    /// Draw the progress mask on stderr as it grows.
    pub echo_progress: bool,
}

impl TerminalUi {
    pub fn with_progress_echo() -> Self {
        Self {
            echo_progress: true,
            ..Self::default()
        }
    }

    /// Label for a missing field, localized when labels were selected.
    pub fn label(&self, field: Field) -> &'static str {
        match (field, self.localization) {
            (Field::Password, Some(l)) => l.master_password,
            (Field::Domain, Some(l)) => l.domain,
            (Field::Password, None) => "master password",
            (Field::Domain, None) => "domain",
            (Field::Secret, _) => "secret",
            (Field::Length, _) => "length",
            (Field::Method, _) => "method",
            (Field::Cost, _) => "cost factor",
            (Field::Counter, _) => "counter",
            (Field::DisableTld, _) => "disable TLD",
        }
    }
}

impl Ui for TerminalUi {
    fn apply(&mut self, command: UiCommand) {
        tracing::trace!(?command, "ui");
        match command {
            UiCommand::SetDomain(domain) => self.domain = domain,
            UiCommand::SetLength(length) => {
                if let Some(config) = &mut self.config {
                    config.length = length;
                }
            }
            UiCommand::ApplyConfig(config) => self.config = Some(config),
            UiCommand::FlagMissing(field) => {
                if !self.missing.contains(&field) {
                    self.missing.push(field);
                }
            }
            UiCommand::ClearMissing => self.missing.clear(),
            UiCommand::ShowProgress(mask) => {
                if self.echo_progress {
                    eprint!("\r{mask}");
                    let _ = std::io::stderr().flush();
                }
                self.progress = Some(mask);
            }
            UiCommand::Reveal { password } => {
                if self.echo_progress && self.progress.is_some() {
                    eprintln!();
                }
                self.progress = None;
                self.password = Some(password);
                self.masked = true;
            }
            UiCommand::SetMasked(masked) => self.masked = masked,
            UiCommand::ClearResult => {
                self.progress = None;
                self.password = None;
            }
            UiCommand::ShowCostField(visible) => self.cost_visible = visible,
            UiCommand::ToggleAdvanced => self.advanced = !self.advanced,
            UiCommand::ShowUpdate { bookmarklet } => self.update = Some(bookmarklet),
            UiCommand::ShowIdenticon(seed) => self.identicon = Some(seed),
            UiCommand::HideIdenticon => self.identicon = None,
            UiCommand::Localize(localization) => self.localization = Some(localization),
        }
    }

    fn document_height(&self) -> u32 {
        let mut rows = BASE_ROWS;
        if self.advanced {
            rows += 4;
            if self.cost_visible {
                rows += 1;
            }
        }
        if self.update.is_some() {
            rows += 2;
        }
        rows * ROW_HEIGHT
    }
}

#[derive(Serialize)]
struct Posted<'a> {
    target_origin: &'a str,
    data: &'a str,
}

/// Writes each posted message to stdout as one JSON line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPort;

impl MessagePort for StdoutPort {
    fn post_message(&self, payload: &str, target_origin: &str) {
        let posted = Posted {
            target_origin,
            data: payload,
        };
        match serde_json::to_string(&posted) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::warn!("bridge output not encodable: {err}"),
        }
    }
}
