// ============================================================================
// LOGIC - Link risk assessment core
// ============================================================================

pub mod engine;
pub mod features;
pub mod feed;
pub mod gate;
pub mod heuristics;
pub mod model;
pub mod urlinfo;
