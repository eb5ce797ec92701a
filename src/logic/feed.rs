//! Offline Feed - Known-bad URL snapshot
//!
//! Loads a bundled, read-only list of known-bad URL substrings and
//! answers membership queries. The snapshot is loaded once at startup
//! and never mutated; a fresh snapshot requires a process restart.
//!
//! Matching is a case-insensitive substring containment test over
//! every entry. The feed is small and bounded, so the linear scan is
//! fine; an automaton index would not change observable behavior.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Attribution reported on feed hits
pub const FEED_SOURCE: &str = "offline feed";

// ============================================================================
// FEED SNAPSHOT
// ============================================================================

/// Immutable set of lower-cased known-bad URL substrings
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    entries: HashSet<String>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl FeedSnapshot {
    /// Empty snapshot (matches nothing)
    pub fn empty() -> Self {
        Self {
            entries: HashSet::new(),
            source: "<none>".to_string(),
            loaded_at: Utc::now(),
        }
    }

    /// Build a snapshot from raw entries (lower-cases, drops blanks)
    pub fn from_entries<I, S>(entries: I, source: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: HashSet<String> = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            entries,
            source: source.to_string(),
            loaded_at: Utc::now(),
        }
    }

    /// Load a snapshot from a JSON array of strings.
    /// A missing or corrupt file degrades to the empty snapshot; the
    /// engine keeps starting either way.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Feed snapshot not loaded from {}: {}", path.display(), e);
                return Self::empty();
            }
        };

        let urls: Vec<String> = match serde_json::from_str(&raw) {
            Ok(urls) => urls,
            Err(e) => {
                log::warn!("Feed snapshot corrupt at {}: {}", path.display(), e);
                return Self::empty();
            }
        };

        let snapshot = Self::from_entries(urls, &path.display().to_string());
        log::info!("Offline feed loaded: {} entries", snapshot.len());
        snapshot
    }

    /// Case-insensitive substring containment against every entry.
    /// Any matching entry is a hit; all matches are equivalent.
    pub fn matches(&self, url: &str) -> FeedMatch {
        let normalized = url.to_lowercase();
        for bad in &self.entries {
            if normalized.contains(bad.as_str()) {
                return FeedMatch {
                    matched: true,
                    source: FEED_SOURCE,
                };
            }
        }
        FeedMatch {
            matched: false,
            source: FEED_SOURCE,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get stats
    pub fn stats(&self) -> FeedStats {
        FeedStats {
            total_entries: self.entries.len(),
            source: self.source.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Outcome of one membership query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedMatch {
    pub matched: bool,
    pub source: &'static str,
}

/// Snapshot stats for the status report
#[derive(Debug, Clone, Serialize)]
pub struct FeedStats {
    pub total_entries: usize,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_substring_match_case_insensitive() {
        let feed = FeedSnapshot::from_entries(["evil.example.net/login"], "test");

        assert!(feed.matches("https://evil.example.net/login?x=1").matched);
        assert!(feed.matches("HTTPS://EVIL.EXAMPLE.NET/LOGIN").matched);
        assert!(!feed.matches("https://example.net/login").matched);
        assert_eq!(feed.matches("anything").source, FEED_SOURCE);
    }

    #[test]
    fn test_empty_feed_matches_nothing() {
        let feed = FeedSnapshot::empty();
        assert!(!feed.matches("https://evil.example.net").matched);
        assert!(feed.is_empty());
    }

    #[test]
    fn test_entries_are_normalized() {
        let feed = FeedSnapshot::from_entries(["  BAD.Site/Path  ", "", "  "], "test");
        assert_eq!(feed.len(), 1);
        assert!(feed.matches("http://bad.site/path").matched);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["phish.example.org", "login-verify.ru/acct"]"#).unwrap();

        let feed = FeedSnapshot::load(file.path());
        assert_eq!(feed.len(), 2);
        assert!(feed.matches("http://phish.example.org/a/b").matched);
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let feed = FeedSnapshot::load(Path::new("/nonexistent/feed.json"));
        assert!(feed.is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let feed = FeedSnapshot::load(file.path());
        assert!(feed.is_empty());
    }
}
