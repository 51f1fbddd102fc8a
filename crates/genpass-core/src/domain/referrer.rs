//! Referrer classification for seeding the domain field.

use super::canonicalize;

/// Major search-engine referral hosts. A referral from one of these says
/// nothing about the site being visited.
pub const SEARCH_ENGINES: [&str; 4] = [
    "www.google.com",
    "www.bing.com",
    "duckduckgo.com",
    "r.search.yahoo.com",
];

/// Domain to pre-fill from the referring page, or `""`.
///
/// Returns `""` when the referrer is empty, unparsable, or its full host is a
/// search engine; otherwise the canonical domain with
/// `remove_subdomains = !disable_tld`.
pub fn classify_referrer(referrer: &str, disable_tld: bool) -> String {
    if referrer.trim().is_empty() {
        return String::new();
    }

    let host = canonicalize(referrer, false);
    if host.is_empty() || SEARCH_ENGINES.contains(&host.as_str()) {
        return String::new();
    }
    canonicalize(&host, !disable_tld)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_engines_are_denied_regardless_of_path() {
        assert_eq!(classify_referrer("https://www.google.com/search?q=x", false), "");
        assert_eq!(classify_referrer("https://www.bing.com/search?q=rust", true), "");
        assert_eq!(classify_referrer("https://duckduckgo.com/?q=a", false), "");
        assert_eq!(
            classify_referrer("https://r.search.yahoo.com/_ylt=abc/RU=x", false),
            ""
        );
    }

    #[test]
    fn other_referrers_are_canonicalized() {
        assert_eq!(
            classify_referrer("https://news.example.com/article/1", false),
            "example.com"
        );
        assert_eq!(
            classify_referrer("https://news.example.com/article/1", true),
            "news.example.com"
        );
    }

    #[test]
    fn google_subdomains_other_than_www_are_not_denied() {
        assert_eq!(classify_referrer("https://mail.google.com/", true), "mail.google.com");
    }

    #[test]
    fn empty_referrer() {
        assert_eq!(classify_referrer("", false), "");
        assert_eq!(classify_referrer("  ", true), "");
    }
}
