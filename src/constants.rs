//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change snapshot locations or the assessment deadline, only edit
//! this file (or set the corresponding environment variable).

use std::path::PathBuf;
use std::time::Duration;

/// App name
pub const APP_NAME: &str = "LinkShield";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default offline feed snapshot file name
pub const DEFAULT_FEED_FILE: &str = "offline_feed.json";

/// Default model snapshot file name
pub const DEFAULT_MODEL_FILE: &str = "url_model.json";

/// Bundled snapshots shipped with the binary (fallback when no
/// user-local snapshot exists)
pub const BUNDLED_FEED_PATH: &str = "assets/feeds/offline_feed.json";
pub const BUNDLED_MODEL_PATH: &str = "assets/url_model.json";

/// Deadline for one cross-boundary assessment request (milliseconds).
/// Expiry triggers the gate's fail-open transition.
pub const DEFAULT_ASSESS_TIMEOUT_MS: u64 = 1000;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Snapshot data directory: env override, then the platform-local data
/// dir, then the bundled assets.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LINKSHIELD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .map(|d| d.join("linkshield"))
        .unwrap_or_else(|| PathBuf::from("assets"))
}

/// Resolve the feed snapshot path
pub fn feed_path() -> PathBuf {
    resolve_snapshot("LINKSHIELD_FEED_PATH", DEFAULT_FEED_FILE, BUNDLED_FEED_PATH)
}

/// Resolve the model snapshot path
pub fn model_path() -> PathBuf {
    resolve_snapshot("LINKSHIELD_MODEL_PATH", DEFAULT_MODEL_FILE, BUNDLED_MODEL_PATH)
}

/// Get assessment deadline from environment or use default
pub fn assess_timeout() -> Duration {
    let ms = std::env::var("LINKSHIELD_ASSESS_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ASSESS_TIMEOUT_MS);
    Duration::from_millis(ms)
}

/// Explicit env path wins; otherwise prefer a user-local snapshot if
/// one exists, else fall back to the bundled copy.
fn resolve_snapshot(env_key: &str, file_name: &str, bundled: &str) -> PathBuf {
    if let Ok(path) = std::env::var(env_key) {
        return PathBuf::from(path);
    }
    let local = data_dir().join(file_name);
    if local.exists() {
        return local;
    }
    PathBuf::from(bundled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        std::env::remove_var("LINKSHIELD_ASSESS_TIMEOUT_MS");
        assert_eq!(assess_timeout(), Duration::from_millis(DEFAULT_ASSESS_TIMEOUT_MS));
    }

    #[test]
    fn test_env_path_override() {
        std::env::set_var("LINKSHIELD_FEED_PATH", "/tmp/custom_feed.json");
        assert_eq!(feed_path(), PathBuf::from("/tmp/custom_feed.json"));
        std::env::remove_var("LINKSHIELD_FEED_PATH");
    }
}
