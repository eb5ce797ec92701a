//! Integration Tests for Feature Extraction
//!
//! Exercises the extractor end to end against the layout contract and
//! the degradation rules for hostile input.

use super::extract::extract;
use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT, layout_hash};

/// Every extracted vector must carry the current layout identity.
#[test]
fn test_extracted_vectors_are_layout_compatible() {
    for url in [
        "https://example.com",
        "http://192.168.0.1/admin",
        "bank-login.xyz/verify?user=1",
        "",
        "javascript:alert(1)",
        "https://example.com/a?b=c&d=e#frag",
    ] {
        let v = extract(url);
        assert!(v.is_compatible(), "incompatible vector for {:?}", url);
        assert_eq!(v.values.len(), FEATURE_COUNT);
    }
}

/// The layout names resolve to the values the extractor populates.
#[test]
fn test_named_access_covers_full_layout() {
    let v = extract("http://login.pay-verify.ru/account?id=42&t=9");
    for name in FEATURE_LAYOUT {
        assert!(v.get_by_name(name).is_some(), "missing feature {}", name);
    }
}

/// Binary features stay in {0, 1}; counts stay non-negative.
#[test]
fn test_feature_value_ranges() {
    for url in [
        "https://example.com/about",
        "http://203.0.113.7/x?a=1",
        "ftp://files.example.org/pub",
        "a-b-c.top/update",
    ] {
        let v = extract(url);
        for name in ["host_is_ip", "host_punycode", "scheme_http", "suspicious_tld"] {
            let x = v.get_by_name(name).unwrap();
            assert!(x == 0.0 || x == 1.0, "{} out of range for {:?}", name, url);
        }
        for (i, &x) in v.values.iter().enumerate() {
            assert!(x >= 0.0, "feature {} negative for {:?}", i, url);
        }
    }
}

/// Structurally equivalent casing of scheme and host must not change
/// the host/scheme features.
#[test]
fn test_case_insensitive_scheme_and_host() {
    let lower = extract("http://example.com/path");
    let upper = extract("HTTP://EXAMPLE.COM/path");

    for name in ["host_length", "scheme_http", "host_is_ip", "suspicious_tld", "subdomain_depth"] {
        assert_eq!(lower.get_by_name(name), upper.get_by_name(name), "{}", name);
    }
}

/// Hash is stable against the values; only layout changes move it.
#[test]
fn test_layout_hash_independent_of_input() {
    let a = extract("https://example.com");
    let b = extract("http://totally.different.ru/login");
    assert_eq!(a.layout_hash, b.layout_hash);
    assert_eq!(a.layout_hash, layout_hash());
}
