//! `genpass generate` – derive one password and print it.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use clap::Args;
use genpass_core::config::ConfigRecord;
use genpass_core::domain;
use genpass_core::orchestrator::FormInput;
use genpass_core::session::SessionEvent;
use genpass_core::settings::GenpassSettings;

use super::open_session;
use crate::cli::terminal::TerminalUi;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Domain or URL of the site.
    pub domain: String,

    /// Password length, 4 to 24. Defaults to the stored setting.
    #[arg(long)]
    pub length: Option<String>,

    /// Hash method: md5, sha512 or bcrypt. Defaults to the stored setting.
    #[arg(long)]
    pub method: Option<String>,

    /// bcrypt cost factor, 4 to 31.
    #[arg(long)]
    pub cost: Option<String>,

    /// Rotation counter; a nonzero value changes the password for this site only.
    #[arg(long)]
    pub counter: Option<String>,

    /// Master secret mixed into every password.
    #[arg(long)]
    pub secret: Option<String>,

    /// Keep subdomains instead of reducing to the registrable domain
    /// (`--disable-tld=false` to switch back). Defaults to the stored setting.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub disable_tld: Option<bool>,

    /// Master password. Read from the first line of stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

impl GenerateArgs {
    /// Form contents: flags first, stored settings for the rest.
    fn form(self, stored: &ConfigRecord, password: String) -> FormInput {
        FormInput {
            password,
            secret: self.secret.unwrap_or_else(|| stored.secret.clone()),
            domain: self.domain,
            length: self.length.unwrap_or_else(|| stored.length.to_string()),
            method: self
                .method
                .unwrap_or_else(|| stored.method.as_str().to_string()),
            cost: self.cost.unwrap_or_else(|| stored.cost_factor.to_string()),
            counter: self.counter.unwrap_or_else(|| stored.counter.to_string()),
            disable_tld: self.disable_tld.unwrap_or(stored.disable_tld),
        }
    }
}

pub async fn run_generate(cfg: &GenpassSettings, mut args: GenerateArgs) -> Result<()> {
    let password = match args.password.take() {
        Some(password) => password,
        None => read_password()?,
    };

    let mut session = open_session(cfg, TerminalUi::with_progress_echo())?;
    // The site key depends on the subdomain policy, so it comes from the global record.
    let disable_tld = args
        .disable_tld
        .unwrap_or_else(|| session.store().load("").disable_tld);
    session.start_with_domain(&domain::canonicalize(&args.domain, !disable_tld));
    let form = args.form(session.config(), password);
    session.handle(SessionEvent::Generate(form));
    session.settle().await;

    let ui = session.ui();
    match &ui.password {
        Some(password) => println!("{password}"),
        None if !ui.missing.is_empty() => {
            let labels: Vec<&str> = ui.missing.iter().map(|f| ui.label(*f)).collect();
            bail!("missing {}", labels.join(", "));
        }
        None => bail!("derivation failed (details in the log)"),
    }
    Ok(())
}

fn read_password() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read master password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genpass_core::derive::HashMethod;

    fn args(domain: &str) -> GenerateArgs {
        GenerateArgs {
            domain: domain.into(),
            length: None,
            method: None,
            cost: None,
            counter: None,
            secret: None,
            disable_tld: None,
            password: None,
        }
    }

    #[test]
    fn stored_settings_fill_missing_flags() {
        let stored = ConfigRecord {
            length: 16,
            secret: "pepper".into(),
            method: HashMethod::Sha512,
            disable_tld: true,
            cost_factor: 10,
            counter: 2,
        };
        let form = args("example.com").form(&stored, "master".into());
        assert_eq!(form.length, "16");
        assert_eq!(form.secret, "pepper");
        assert_eq!(form.method, "sha512");
        assert_eq!(form.cost, "10");
        assert_eq!(form.counter, "2");
        assert!(form.disable_tld);
        assert_eq!(form.password, "master");
    }

    #[test]
    fn flags_override_stored_settings() {
        let mut a = args("example.com");
        a.length = Some("8".into());
        a.method = Some("bcrypt".into());
        let form = a.form(&ConfigRecord::default(), String::new());
        assert_eq!(form.length, "8");
        assert_eq!(form.method, "bcrypt");
        assert_eq!(form.counter, "0");
    }

    #[test]
    fn stored_disable_tld_can_be_switched_off() {
        let stored = ConfigRecord {
            disable_tld: true,
            ..ConfigRecord::default()
        };
        assert!(args("login.example.com").form(&stored, "pw".into()).disable_tld);

        let mut a = args("login.example.com");
        a.disable_tld = Some(false);
        assert!(!a.form(&stored, "pw".into()).disable_tld);

        let mut a = args("login.example.com");
        a.disable_tld = Some(true);
        assert!(a.form(&ConfigRecord::default(), "pw".into()).disable_tld);
    }
}
