//! `genpass referrer` – domain pre-filled for a referring page.

use genpass_core::domain;

pub fn run_referrer(url: &str, disable_tld: bool) {
    let seeded = domain::classify_referrer(url, disable_tld);
    if seeded.is_empty() {
        tracing::debug!(url, "referrer seeds nothing");
    }
    println!("{seeded}");
}
