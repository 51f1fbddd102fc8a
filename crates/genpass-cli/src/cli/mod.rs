//! CLI for the genpass password generator.

mod commands;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use genpass_core::settings::{self, GenpassSettings};

use commands::{run_bridge, run_config, run_generate, run_hostname, run_referrer, GenerateArgs};

/// Top-level CLI for genpass.
#[derive(Debug, Parser)]
#[command(name = "genpass")]
#[command(about = "genpass: per-site passwords derived from one master password", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Derive the password for a domain or URL.
    Generate(GenerateArgs),

    /// Print the canonical domain for a hostname or URL.
    Hostname {
        /// Hostname or URL.
        input: String,
        /// Keep subdomains instead of reducing to the registrable domain.
        #[arg(long)]
        keep_subdomains: bool,
    },

    /// Print the domain a referring page would pre-fill (empty for search engines).
    Referrer {
        /// Referrer URL.
        url: String,
        /// Keep subdomains of the referrer host.
        #[arg(long)]
        disable_tld: bool,
    },

    /// Show the effective stored settings for a domain.
    Config {
        /// Canonical domain; omit for the global default.
        domain: Option<String>,
    },

    /// Run the generator over JSON lines on stdin/stdout.
    Bridge {
        /// Referrer of the page that opened the generator.
        #[arg(long)]
        referrer: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Hostname {
                input,
                keep_subdomains,
            } => run_hostname(&input, keep_subdomains)?,
            CliCommand::Referrer { url, disable_tld } => run_referrer(&url, disable_tld),
            CliCommand::Generate(args) => run_generate(&load_settings()?, args).await?,
            CliCommand::Config { domain } => run_config(&load_settings()?, domain.as_deref())?,
            CliCommand::Bridge { referrer } => {
                run_bridge(&load_settings()?, referrer.as_deref().unwrap_or_default()).await?
            }
        }

        Ok(())
    }
}

fn load_settings() -> Result<GenpassSettings> {
    let cfg = settings::load_or_init()?;
    tracing::debug!("loaded settings: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
