//! Heuristic Rules & Penalties
//!
//! Constants only; no evaluation logic here. The penalties were
//! hand-tuned and are not mutually exclusive - multiple triggers stack
//! and can drive the score to 0 before clamping.

// ============================================================================
// PENALTIES (subtracted from a starting score of 100)
// ============================================================================

pub const PENALTY_IP_HOST: i32 = 40;
pub const PENALTY_PUNYCODE: i32 = 30;
pub const PENALTY_AT_SIGN: i32 = 30;
pub const PENALTY_HTTP: i32 = 30;
pub const PENALTY_LONG_URL: i32 = 15;
pub const PENALTY_EXTERNAL: i32 = 10;
pub const PENALTY_SUSP_TLD: i32 = 15;

/// Per matched keyword, capped
pub const PENALTY_PER_KEYWORD: i32 = 5;
pub const KEYWORD_PENALTY_CAP: i32 = 25;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// URLs longer than this are flagged
pub const SUSPICIOUS_URL_LENGTH: usize = 75;

/// Below this score the verdict level is `dangerous`
pub const DANGEROUS_BELOW: u8 = 40;

/// Below this score (and at or above DANGEROUS_BELOW) it is `suspicious`
pub const SUSPICIOUS_BELOW: u8 = 70;

// ============================================================================
// WORD LISTS
// ============================================================================

/// Keywords checked as case-insensitive substrings of the URL.
/// Shorter than the model's list; overlapping in intent.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "secure", "account", "verify", "update",
    "bank", "confirm", "password", "signin", "pay",
];

/// Suspicious top-level labels
pub const SUSPICIOUS_TLDS: &[&str] = &["cn", "ru", "xyz", "club", "top", "info"];
