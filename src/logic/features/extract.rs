//! URL Feature Extraction
//!
//! Maps a raw URL string to the fixed-order feature vector defined in
//! `layout.rs`. Total function: any input produces a vector. Inputs
//! without a scheme are prefixed with `http://` before parsing, and an
//! input that still fails to parse degrades to a string-only vector
//! (host/path features stay 0, "no signal").

use crate::logic::urlinfo;

use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;

/// Suspicious keywords checked as substrings of the lower-cased URL.
/// This list belongs to the trained model; the heuristic scorer keeps
/// its own, shorter list.
pub const ML_SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "secure", "account", "verify", "update", "bank",
    "confirm", "password", "signin", "pay", "credit", "card",
];

/// TLD labels the model treats as suspicious
pub const ML_SUSPICIOUS_TLDS: &[&str] = &[
    "cn", "ru", "xyz", "club", "top", "info", "pw", "icu", "zip", "loan",
];

/// Extract the feature vector for a raw URL string. Never fails.
pub fn extract(raw_url: &str) -> FeatureVector {
    // Feature values are measured on the prefixed string, matching the
    // model's training-time extractor.
    let raw = urlinfo::ensure_scheme(raw_url);

    let mut values = [0.0f32; FEATURE_COUNT];
    values[0] = raw.chars().count() as f32;
    values[9] = raw.chars().filter(|c| c.is_ascii_digit()).count() as f32;
    values[11] = keyword_hits(&raw) as f32;

    let Some(url) = urlinfo::parse(&raw) else {
        // Unparsable even with a scheme: string-level features only
        return FeatureVector::from_values(values);
    };

    let host = url.host_str().unwrap_or("");
    let path = url.path();
    let query = url.query().unwrap_or("");

    values[1] = host.chars().count() as f32;
    values[2] = urlinfo::subdomain_depth(host) as f32;
    values[3] = if urlinfo::is_ipv4(host) { 1.0 } else { 0.0 };
    values[4] = if urlinfo::is_punycode(host) { 1.0 } else { 0.0 };
    values[5] = if url.scheme() == "http" { 1.0 } else { 0.0 };
    values[6] = query.chars().count() as f32;
    values[7] = url
        .query_pairs()
        .filter(|(k, v)| !(k.is_empty() && v.is_empty()))
        .count() as f32;
    values[8] = path.chars().count() as f32;
    values[10] = host.matches('-').count() as f32;
    values[12] = shannon_entropy(path);
    values[13] = if ML_SUSPICIOUS_TLDS.contains(&urlinfo::top_level_label(host).as_str()) {
        1.0
    } else {
        0.0
    };

    FeatureVector::from_values(values)
}

/// Count of list keywords found anywhere in the lower-cased URL
fn keyword_hits(raw: &str) -> usize {
    let lower = raw.to_lowercase();
    ML_SUSPICIOUS_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count()
}

/// Shannon entropy (base 2) over character frequency; 0 for ""
pub fn shannon_entropy(s: &str) -> f32 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq = std::collections::HashMap::new();
    let mut len = 0usize;
    for c in s.chars() {
        *freq.entry(c).or_insert(0usize) += 1;
        len += 1;
    }

    let len = len as f32;
    freq.values()
        .map(|&n| {
            let p = n as f32 / len;
            -p * p.log2()
        })
        .sum()
}

// ============================================================================
// TESTS
// ============================================================================
