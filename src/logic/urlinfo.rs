//! URL Helpers - Best-effort URL inspection
//!
//! Shared parsing utilities for feature extraction and heuristics.
//! Nothing here raises: malformed input degrades to `None`, and the
//! callers substitute conservative defaults.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Syntactically valid IPv4 dotted quad (hostname form)
static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").expect("ipv4 pattern is valid")
});

/// ASCII punycode prefix on an encoded hostname label
pub const PUNYCODE_PREFIX: &str = "xn--";

/// Prefix `http://` when the input lacks a scheme, so relative-looking
/// inputs still parse into a vector instead of an error.
pub fn ensure_scheme(raw: &str) -> Cow<'_, str> {
    if raw.contains(":/") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("http://{}", raw))
    }
}

/// Parse a URL string. `None` on any failure; never panics.
pub fn parse(raw: &str) -> Option<Url> {
    Url::parse(raw).ok()
}

/// Hostname of a raw URL string, if it parses and has one.
/// The `url` crate lower-cases and IDNA-encodes hostnames, so the
/// punycode and TLD checks downstream see the canonical ASCII form.
pub fn hostname(raw: &str) -> Option<String> {
    parse(raw).and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Is the hostname a syntactically valid IPv4 dotted quad?
pub fn is_ipv4(host: &str) -> bool {
    IPV4_RE.is_match(host)
}

/// Does the hostname start with the punycode prefix?
pub fn is_punycode(host: &str) -> bool {
    host.to_ascii_lowercase().starts_with(PUNYCODE_PREFIX)
}

/// Top-level label of a hostname (lower-cased); empty for empty input.
pub fn top_level_label(host: &str) -> String {
    host.rsplit('.').next().unwrap_or("").to_ascii_lowercase()
}

/// Number of dot-separated labels in a hostname beyond domain + TLD.
pub fn subdomain_depth(host: &str) -> usize {
    if host.is_empty() {
        return 0;
    }
    host.split('.').count().saturating_sub(2)
}

/// Does the link's hostname differ from the page's hostname?
///
/// The candidate is resolved against the page URL, so relative links
/// compare against their own origin. If either side fails to parse the
/// answer is `true` (fail toward suspicion).
pub fn is_external(page_url: &str, link: &str) -> bool {
    let Some(page) = parse(page_url) else {
        return true;
    };
    let resolved = match page.join(link) {
        Ok(u) => u,
        Err(_) => return true,
    };
    page.host_str() != resolved.host_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_scheme() {
        assert_eq!(ensure_scheme("example.com/a"), "http://example.com/a");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_is_ipv4() {
        assert!(is_ipv4("192.168.1.1"));
        assert!(is_ipv4("8.8.8.8"));
        assert!(!is_ipv4("example.com"));
        assert!(!is_ipv4("192.168.1"));
        assert!(!is_ipv4(""));
    }

    #[test]
    fn test_hostname_lowercased() {
        assert_eq!(hostname("HTTP://EXAMPLE.COM/Path"), Some("example.com".to_string()));
        assert_eq!(hostname("not a url"), None);
    }

    #[test]
    fn test_top_level_label() {
        assert_eq!(top_level_label("sub.example.xyz"), "xyz");
        assert_eq!(top_level_label("localhost"), "localhost");
        assert_eq!(top_level_label(""), "");
    }

    #[test]
    fn test_subdomain_depth() {
        assert_eq!(subdomain_depth("example.com"), 0);
        assert_eq!(subdomain_depth("a.b.example.com"), 2);
        assert_eq!(subdomain_depth(""), 0);
    }

    #[test]
    fn test_is_external() {
        assert!(!is_external("https://example.com", "https://example.com/about"));
        assert!(!is_external("https://example.com/page", "/relative/path"));
        assert!(is_external("https://example.com", "https://evil.example.net"));
        // Unparsable page URL fails toward suspicion
        assert!(is_external("", "https://example.com"));
        assert!(is_external("not a url", "https://example.com"));
    }

    #[test]
    fn test_is_punycode() {
        assert!(is_punycode("xn--e1awd7f.com"));
        assert!(is_punycode("XN--e1awd7f.com"));
        assert!(!is_punycode("example.com"));
    }
}
