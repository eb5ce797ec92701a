//! Heuristics Module
//!
//! Rule-based URL checks with an additive-penalty score.
//!
//! ## Structure
//! - `types`: CheckResult (data only)
//! - `rules`: penalties, thresholds, word lists
//! - `scorer`: evaluation logic and reason sentences

pub mod types;
pub mod rules;
pub mod scorer;

pub use types::CheckResult;
pub use scorer::{evaluate, level_for_score, reasons, score_from_checks};
