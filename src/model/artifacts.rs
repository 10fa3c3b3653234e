//! Trained Artifacts - Scaler & Label Encoder
//!
//! Normalization parameters and the label set are produced by the same
//! training run as the classifier they accompany and exported as JSON
//! sidecar files. They are immutable after load; recomputing them at
//! inference time would silently break the trained contract.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelLoadError;

// ============================================================================
// SCALER
// ============================================================================

/// StandardScaler parameters: `x' = (x - mean) / scale`, per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl ScalerParams {
    /// Load scaler parameters from a JSON sidecar file and validate them
    /// against the feature count the model expects.
    pub fn load(path: &Path, expected_features: usize) -> Result<Self, ModelLoadError> {
        let raw = fs::read_to_string(path).map_err(|e| ModelLoadError::Artifact {
            kind: "scaler",
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let params: ScalerParams =
            serde_json::from_str(&raw).map_err(|e| ModelLoadError::Artifact {
                kind: "scaler",
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        params.validate(expected_features)?;

        log::info!(
            "Loaded scaler from {} ({} features)",
            path.display(),
            params.mean.len()
        );

        Ok(params)
    }

    pub fn validate(&self, expected_features: usize) -> Result<(), ModelLoadError> {
        if self.mean.len() != expected_features || self.scale.len() != expected_features {
            return Err(ModelLoadError::Incompatible(format!(
                "scaler has {}/{} mean/scale entries, model expects {} features",
                self.mean.len(),
                self.scale.len(),
                expected_features
            )));
        }

        for (i, (&m, &s)) in self.mean.iter().zip(self.scale.iter()).enumerate() {
            if !m.is_finite() || !s.is_finite() {
                return Err(ModelLoadError::Incompatible(format!(
                    "scaler parameter {} is not finite",
                    i
                )));
            }
            if s <= 0.0 {
                return Err(ModelLoadError::Incompatible(format!(
                    "scaler scale[{}] = {} must be positive",
                    i, s
                )));
            }
        }

        Ok(())
    }

    /// Normalize one feature vector. Caller guarantees matching length.
    pub fn transform(&self, features: &[f32]) -> Vec<f32> {
        features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| (x - mean) / scale)
            .collect()
    }
}

// ============================================================================
// LABEL ENCODER
// ============================================================================

/// Ordered class list with a stable index <-> label mapping.
///
/// Class order is training-run-dependent: never assume "Normal" sits at
/// index 0, always decode through this mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let raw = fs::read_to_string(path).map_err(|e| ModelLoadError::Artifact {
            kind: "label encoder",
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let encoder: LabelEncoder =
            serde_json::from_str(&raw).map_err(|e| ModelLoadError::Artifact {
                kind: "label encoder",
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        if encoder.classes.len() < 2 {
            return Err(ModelLoadError::Incompatible(format!(
                "label encoder has {} classes, classifier needs at least 2",
                encoder.classes.len()
            )));
        }

        log::info!(
            "Loaded label encoder from {} ({:?})",
            path.display(),
            encoder.classes
        );

        Ok(encoder)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Decode a class index to its label.
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    /// Look up a class index by label name.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }
}
