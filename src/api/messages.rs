//! Wire contract for the assessment surface.
//!
//! Requests are tagged JSON objects; responses mirror the engine's
//! serializable types. The shape is stable so embedding surfaces can
//! talk to the engine without linking against it.

use serde::{Deserialize, Serialize};

use crate::logic::engine::{EngineStatusReport, Verdict};

// ============================================================================
// REQUESTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Assess one link in the context of the page it appears on
    #[serde(rename = "assessLink")]
    AssessLink {
        url: String,
        #[serde(rename = "pageUrl", default)]
        page_url: String,
    },
    /// Forward a user report of a link
    #[serde(rename = "reportLink")]
    ReportLink { url: String },
    /// Snapshot of the engine's loaded state and counters
    #[serde(rename = "engineStatus")]
    EngineStatus,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Response {
    #[serde(rename = "verdict")]
    Verdict {
        id: String,
        #[serde(flatten)]
        verdict: Verdict,
    },
    #[serde(rename = "status")]
    Status {
        id: String,
        #[serde(flatten)]
        report: EngineStatusReport,
    },
    #[serde(rename = "ack")]
    Ack { id: String },
    #[serde(rename = "error")]
    Error { id: String, message: String },
}

// ============================================================================
// TESTS
// ============================================================================
