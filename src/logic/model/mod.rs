//! Model Module - Linear URL Classifier
//!
//! Trained logistic-regression snapshot: standardization parameters,
//! coefficient vector, intercept. Loaded once at startup, read-only.

pub mod linear;

pub use linear::{LinearModel, LoadedModel, ScalerParams, ModelError, load_model};
