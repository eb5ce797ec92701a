//! Features Module - URL Feature Extraction Engine
//!
//! Maps raw URL strings to the fixed-order numeric vector consumed by
//! the linear classifier. The layout is versioned; see `layout.rs`.

pub mod layout;
pub mod vector;
pub mod extract;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_VERSION, layout_hash, feature_name, LayoutInfo};
pub use vector::FeatureVector;
pub use extract::{extract, shannon_entropy};
