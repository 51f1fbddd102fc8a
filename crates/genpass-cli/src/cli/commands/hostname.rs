//! `genpass hostname` – canonical domain of a hostname or URL.

use anyhow::Result;
use genpass_core::domain;

pub fn run_hostname(input: &str, keep_subdomains: bool) -> Result<()> {
    // Surface the parse error instead of printing an empty line.
    domain::parse_host(input)?;
    println!("{}", domain::canonicalize(input, !keep_subdomains));
    Ok(())
}
