//! `genpass bridge` – the generator side of the bookmarklet protocol over
//! JSON lines.
//!
//! Each stdin line is one event, externally tagged:
//!
//! ```text
//! {"message": {"origin": "https://shop.example.com", "data": "{\"version\":20140715}"}}
//! {"generate": {"password": "...", "domain": "shop.example.com", "length": "12"}}
//! {"input": "password"}
//! {"credentials": {"password": "...", "secret": "", "method": "md5"}}
//! {"method": "bcrypt"}
//! {"disable_tld": {"domain": "example.com"}}
//! "toggle_mask"
//! "toggle_advanced"
//! ```
//!
//! Messages posted to the page come out on stdout as
//! `{"target_origin": ..., "data": ...}` lines.

use anyhow::{Context, Result};
use genpass_core::derive::HashMethod;
use genpass_core::orchestrator::FormInput;
use genpass_core::session::SessionEvent;
use genpass_core::settings::GenpassSettings;
use genpass_core::ui::Field;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{open_session, CliSession};
use crate::cli::terminal::{StdoutPort, TerminalUi};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BridgeLine {
    Message {
        origin: String,
        data: String,
    },
    Generate(FormInput),
    Input(Field),
    Credentials {
        password: String,
        #[serde(default)]
        secret: String,
        #[serde(default)]
        method: HashMethod,
    },
    Method(HashMethod),
    DisableTld {
        domain: String,
    },
    ToggleMask,
    ToggleAdvanced,
}

impl BridgeLine {
    fn into_event(self) -> SessionEvent<StdoutPort> {
        match self {
            BridgeLine::Message { origin, data } => SessionEvent::Message {
                source: StdoutPort,
                origin,
                data,
            },
            BridgeLine::Generate(form) => SessionEvent::Generate(form),
            BridgeLine::Input(field) => SessionEvent::InputChanged(field),
            BridgeLine::Credentials {
                password,
                secret,
                method,
            } => SessionEvent::CredentialsEdited {
                password,
                secret,
                method,
            },
            BridgeLine::Method(method) => SessionEvent::MethodSelected(method),
            BridgeLine::DisableTld { domain } => SessionEvent::DisableTldToggled {
                current_domain: domain,
            },
            BridgeLine::ToggleMask => SessionEvent::ToggleMask,
            BridgeLine::ToggleAdvanced => SessionEvent::ToggleAdvanced,
        }
    }
}

fn parse_line(line: &str) -> Option<SessionEvent<StdoutPort>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<BridgeLine>(line) {
        Ok(parsed) => Some(parsed.into_event()),
        Err(err) => {
            tracing::warn!("bridge line ignored: {err}");
            None
        }
    }
}

pub async fn run_bridge(cfg: &GenpassSettings, referrer: &str) -> Result<()> {
    let mut session: CliSession = open_session(cfg, TerminalUi::default())?;
    session.start(referrer);
    tracing::info!(domain = %session.ui().domain, "bridge started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("read bridge input")? {
                    Some(line) => {
                        if let Some(event) = parse_line(&line) {
                            session.handle(event);
                        }
                    }
                    None => break,
                }
            }
            Some(completion) = session.next_completion() => session.on_completion(completion),
        }
    }

    // Input closed: let in-flight work finish so a pending result still gets relayed.
    session.settle().await;
    Ok(())
}
