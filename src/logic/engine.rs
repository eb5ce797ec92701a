//! Risk Assessment Engine
//!
//! The single entry point that turns a URL into a Verdict, in fixed
//! precedence order:
//!
//! 1. Feed check - authoritative short-circuit
//! 2. Heuristic scoring - penalty score and level thresholds
//! 3. ML override - ratchet toward `dangerous` only
//!
//! The engine owns the immutable snapshots (no globals): it is
//! constructed once at startup and every `assess` call is independent
//! and side-effect-free apart from the stats counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::feed::{FeedSnapshot, FeedStats};
use super::features::{self, LayoutInfo};
use super::heuristics;
use super::model::LoadedModel;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Verdict classification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No signal worth blocking over
    Safe,
    /// Worth a second look before following
    Suspicious,
    /// Strong signal; expected to be blocked
    Dangerous,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Suspicious => "suspicious",
            RiskLevel::Dangerous => "dangerous",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Safe => 0,
            RiskLevel::Suspicious => 1,
            RiskLevel::Dangerous => 2,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "#00ff00",       // Green
            RiskLevel::Suspicious => "#ffaa00", // Orange
            RiskLevel::Dangerous => "#ff4444",  // Red
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// The engine's output for one URL. Created fresh per call and owned
/// by the caller; no shared state between concurrent assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub level: RiskLevel,
    /// Penalty score in [0, 100]; 100 = best
    pub score: u8,
    pub reasons: Vec<String>,
    /// Phishing probability; omitted when no model is loaded, so a
    /// genuine low probability is distinguishable from "no opinion"
    #[serde(rename = "mlProb", skip_serializing_if = "Option::is_none", default)]
    pub ml_prob: Option<f32>,
    /// Explicit model-availability flag for consumers
    #[serde(rename = "modelAvailable", default)]
    pub model_available: bool,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Probability at or above which the ML override fires
pub const ML_OVERRIDE_THRESHOLD: f32 = 0.80;

/// Score ceiling forced by the ML override
pub const ML_OVERRIDE_SCORE_CAP: u8 = 20;

/// Score reported on feed hits
pub const FEED_HIT_SCORE: u8 = 5;

pub struct RiskEngine {
    feed: FeedSnapshot,
    model: Option<LoadedModel>,

    // Stats for the status report
    assessments: AtomicU64,
    latency_sum_us: AtomicU64,
}

impl RiskEngine {
    pub fn new(feed: FeedSnapshot, model: Option<LoadedModel>) -> Self {
        Self {
            feed,
            model,
            assessments: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
        }
    }

    /// Assess one candidate link against the page it appears on.
    /// Always produces a Verdict; never an error.
    pub fn assess(&self, url: &str, page_url: &str) -> Verdict {
        let start = std::time::Instant::now();
        let verdict = self.assess_inner(url, page_url);

        self.assessments.fetch_add(1, Ordering::Relaxed);
        self.latency_sum_us
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);

        log::debug!(
            "assessed {:?}: level={} score={} ml={:?}",
            url,
            verdict.level,
            verdict.score,
            verdict.ml_prob
        );

        verdict
    }

    fn assess_inner(&self, url: &str, page_url: &str) -> Verdict {
        let model_available = self.model.is_some();

        // 1. Feed check: authoritative, skips heuristics and ML
        let feed_check = self.feed.matches(url);
        if feed_check.matched {
            return Verdict {
                level: RiskLevel::Dangerous,
                score: FEED_HIT_SCORE,
                reasons: vec![format!("URL appears in {}.", feed_check.source)],
                ml_prob: None,
                model_available,
            };
        }

        // 2. Heuristic scoring
        let checks = heuristics::evaluate(url, page_url);
        let mut score = checks.score;
        let mut level = heuristics::level_for_score(score);
        let mut reasons = heuristics::reasons(&checks);

        // 3. ML override: ratchet toward danger only. A low probability
        //    never raises a suspicious/dangerous heuristic verdict.
        let ml_prob = self.model.as_ref().map(|loaded| {
            let features = features::extract(url);
            loaded.model.predict(&features)
        });

        if let Some(p) = ml_prob {
            if p >= ML_OVERRIDE_THRESHOLD {
                reasons.push(format!("ML model flags this URL (p={:.2})", p));
                score = score.min(ML_OVERRIDE_SCORE_CAP);
                level = RiskLevel::Dangerous;
            }
        }

        // A safe verdict is never reason-less
        if level == RiskLevel::Safe {
            reasons.insert(0, "Looks safe by heuristics.".to_string());
        }

        Verdict {
            level,
            score,
            reasons,
            ml_prob,
            model_available,
        }
    }

    /// Engine status for the UI / status request
    pub fn status(&self) -> EngineStatusReport {
        let count = self.assessments.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { sum as f32 / count as f32 } else { 0.0 };

        EngineStatusReport {
            layout: LayoutInfo::current(),
            feed: self.feed.stats(),
            model: ModelStatus {
                loaded: self.model.is_some(),
                source: self.model.as_ref().map(|m| m.source.clone()),
                checksum: self.model.as_ref().map(|m| m.checksum.clone()),
                loaded_at: self.model.as_ref().map(|m| m.loaded_at.to_rfc3339()),
            },
            assessments: count,
            avg_latency_us: avg,
        }
    }
}

// ============================================================================
// STATUS REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EngineStatusReport {
    pub layout: LayoutInfo,
    pub feed: FeedStats,
    pub model: ModelStatus,
    pub assessments: u64,
    pub avg_latency_us: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub source: Option<String>,
    pub checksum: Option<String>,
    pub loaded_at: Option<String>,
}

// ============================================================================
// TESTS
// ============================================================================
