//! Domain normalization.
//!
//! Turns whatever the user typed (or whatever the embedding page reported as
//! its origin / referrer) into the canonical host string that is used both as
//! the password-binding input and as the per-site storage key.
//!
//! Host extraction is delegated to the `url` crate; this module decides how
//! the host is reduced (full host vs. registrable domain) and which referrers
//! must never seed the domain field.

mod referrer;
mod suffix;

pub use referrer::{classify_referrer, SEARCH_ENGINES};

/// Error from the host extraction step. The public functions absorb it into
/// an empty string; it is exposed for callers that want the reason.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("empty host input")]
    Empty,
    #[error("invalid host {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("no host in {0:?}")]
    NoHost(String),
}

/// Host extracted from raw input, lowercased and without trailing dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHost {
    pub host: String,
    /// IPv4/IPv6 literal; never reduced to a registrable domain.
    pub is_ip: bool,
}

/// Extracts the host part of a hostname or URL.
///
/// Spaces are stripped first. Input without `://` is parsed as `http://<input>`
/// so that bare hostnames (`Sub.Example.com/path`) work.
pub fn parse_host(input: &str) -> Result<ParsedHost, DomainError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(DomainError::Empty);
    }

    let candidate = if compact.contains("://") {
        compact
    } else {
        format!("http://{compact}")
    };
    let parsed = url::Url::parse(&candidate).map_err(|source| DomainError::Invalid {
        input: input.to_string(),
        source,
    })?;

    let is_ip = matches!(
        parsed.host(),
        Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_))
    );
    let host = parsed
        .host_str()
        .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| DomainError::NoHost(input.to_string()))?;

    Ok(ParsedHost { host, is_ip })
}

/// Canonical domain for a hostname or URL.
///
/// With `remove_subdomains` the host is reduced to its registrable domain
/// (`www.example.co.uk` -> `example.co.uk`); otherwise the full host is
/// returned. Unparsable input yields `""`.
pub fn canonicalize(host_or_url: &str, remove_subdomains: bool) -> String {
    match parse_host(host_or_url) {
        Ok(parsed) if remove_subdomains && !parsed.is_ip => registrable_domain(&parsed.host).to_string(),
        Ok(parsed) => parsed.host,
        Err(err) => {
            tracing::debug!("canonicalize: {err}");
            String::new()
        }
    }
}

/// The same host under the opposite subdomain policy, so the user can flip
/// between `example.com` and `sub.example.com` without retyping.
pub fn alternate(domain: &str, disable_tld: bool) -> String {
    canonicalize(domain, disable_tld)
}

/// Last two labels of `host`, or last three when the last two form a known
/// two-level public suffix.
fn registrable_domain(host: &str) -> &str {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host;
    }

    let tail = &labels[labels.len() - 2..];
    let keep = if suffix::is_two_level_suffix(tail[0], tail[1]) {
        3
    } else {
        2
    };
    if labels.len() <= keep {
        return host;
    }

    let skip: usize = labels[..labels.len() - keep]
        .iter()
        .map(|label| label.len() + 1)
        .sum();
    &host[skip..]
}
