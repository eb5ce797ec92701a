//! Linear Model - Standardize + logistic sigmoid
//!
//! The snapshot format mirrors the training exporter:
//! `{intercept, coef[14], scaler: {means[14], stds[14]}}`.
//! Loading validates vector lengths against the feature layout and,
//! when a `.sha256` sidecar exists, the file checksum. Any failure
//! degrades to "no model" rather than aborting startup.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Standardization parameters from training
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub means: Vec<f32>,
    pub stds: Vec<f32>,
}

/// Trained linear model snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f32,
    pub coef: Vec<f32>,
    pub scaler: ScalerParams,
}

/// A validated model plus load metadata for the status report
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: LinearModel,
    pub source: String,
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct ModelError(pub String);

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelError: {}", self.0)
    }
}

impl std::error::Error for ModelError {}

// ============================================================================
// PREDICTION
// ============================================================================

impl LinearModel {
    /// Check the snapshot against the feature layout
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coef.len() != FEATURE_COUNT {
            return Err(ModelError(format!(
                "coefficient length {} != feature count {}",
                self.coef.len(),
                FEATURE_COUNT
            )));
        }
        if self.scaler.means.len() != FEATURE_COUNT || self.scaler.stds.len() != FEATURE_COUNT {
            return Err(ModelError(format!(
                "scaler lengths {}/{} != feature count {}",
                self.scaler.means.len(),
                self.scaler.stds.len(),
                FEATURE_COUNT
            )));
        }
        Ok(())
    }

    /// Phishing probability in [0, 1] for one feature vector.
    ///
    /// Per-feature standardization, then linear combination, then the
    /// logistic sigmoid. A zero-variance feature carries no signal, so
    /// a zero std contributes 0 instead of dividing by zero.
    pub fn predict(&self, features: &FeatureVector) -> f32 {
        let mut logit = self.intercept;

        for (i, &x) in features.as_slice().iter().enumerate() {
            let mean = self.scaler.means.get(i).copied().unwrap_or(0.0);
            let std = self.scaler.stds.get(i).copied().unwrap_or(1.0);
            let coef = self.coef.get(i).copied().unwrap_or(0.0);

            let scaled = if std == 0.0 { 0.0 } else { (x - mean) / std };
            logit += coef * scaled;
        }

        sigmoid(logit)
    }
}

/// Standard logistic sigmoid
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

// ============================================================================
// LOADING
// ============================================================================

/// Load and validate a model snapshot.
/// `None` means the classifier runs with no opinion; never an error at
/// the engine boundary.
pub fn load_model(path: &Path) -> Option<LoadedModel> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Model snapshot not loaded from {}: {}", path.display(), e);
            return None;
        }
    };

    let checksum = hex::encode(Sha256::digest(&bytes));

    // Optional integrity sidecar: "<file>.sha256" with the hex digest
    if let Some(expected) = read_sidecar_checksum(path) {
        if !expected.eq_ignore_ascii_case(&checksum) {
            log::warn!(
                "Model checksum mismatch at {}: expected {}, got {} - model disabled",
                path.display(),
                expected,
                checksum
            );
            return None;
        }
    }

    let model: LinearModel = match serde_json::from_slice(&bytes) {
        Ok(model) => model,
        Err(e) => {
            log::warn!("Model snapshot corrupt at {}: {}", path.display(), e);
            return None;
        }
    };

    if let Err(e) = model.validate() {
        log::warn!("Model snapshot rejected at {}: {}", path.display(), e);
        return None;
    }

    log::info!("ML model loaded (sha256 {})", &checksum[..12]);

    Some(LoadedModel {
        model,
        source: path.display().to_string(),
        checksum,
        loaded_at: Utc::now(),
    })
}

fn read_sidecar_checksum(path: &Path) -> Option<String> {
    let mut sidecar = path.as_os_str().to_owned();
    sidecar.push(".sha256");
    let raw = std::fs::read_to_string(Path::new(&sidecar)).ok()?;
    let value = raw.split_whitespace().next()?.to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
