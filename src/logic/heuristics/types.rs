//! Heuristic Types
//!
//! Data structures only; the evaluation logic lives in `scorer.rs` and
//! the penalty constants in `rules.rs`.

use serde::{Deserialize, Serialize};

// ============================================================================
// CHECK RESULT
// ============================================================================

/// Outcome of the independent rule checks for one URL, plus the
/// derived additive-penalty score (100 = best, clamped to [0, 100]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Hostname is a syntactically valid IPv4 dotted quad
    pub is_ip: bool,
    /// Hostname begins with the punycode prefix `xn--`
    pub punycode: bool,
    /// Raw URL contains `@` (userinfo-obfuscation pattern)
    pub has_at: bool,
    /// Raw URL longer than the length threshold
    pub suspicious_length: bool,
    /// Scheme is exactly `http`
    pub http: bool,
    /// Link hostname differs from the page hostname (or either side
    /// failed to parse - fail toward suspicion)
    pub external: bool,
    /// Keywords from the heuristic list found in the URL
    pub susp_keywords: Vec<String>,
    /// Top-level label is on the suspicious-TLD list
    pub susp_tld: bool,
    /// Derived penalty score
    pub score: u8,
}

impl Default for CheckResult {
    fn default() -> Self {
        Self {
            is_ip: false,
            punycode: false,
            has_at: false,
            suspicious_length: false,
            http: false,
            external: false,
            susp_keywords: vec![],
            susp_tld: false,
            score: 100,
        }
    }
}

impl CheckResult {
    /// Any positive flag at all?
    pub fn any_flag(&self) -> bool {
        self.is_ip
            || self.punycode
            || self.has_at
            || self.suspicious_length
            || self.http
            || self.external
            || !self.susp_keywords.is_empty()
            || self.susp_tld
    }
}
