// ============================================================================
// API - External surface of the engine
// ============================================================================

pub mod messages;
pub mod service;

pub use messages::{Request, Response};
pub use service::{AssessOutcome, EngineHandle, EngineService};
