//! Error Types
//!
//! Two failure domains, kept strictly apart:
//! - `ModelLoadError`: fatal at facade construction, the process must not
//!   start serving predictions with half-loaded models.
//! - `ShapeError` / `PredictError`: per-call rejections, the facade stays
//!   usable for subsequent calls.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// LOAD-TIME ERRORS (fatal)
// ============================================================================

/// Failure to load a model, scaler or encoder artifact at construction.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load onnx model {}: {detail}", .path.display())]
    Session { path: PathBuf, detail: String },

    #[error("failed to read {kind} artifact {}: {detail}", .path.display())]
    Artifact {
        kind: &'static str,
        path: PathBuf,
        detail: String,
    },

    /// Scaler/encoder parameters that cannot belong to the model they
    /// accompany. Mismatched artifacts are a silent-correctness hazard,
    /// so they are rejected at load, not papered over.
    #[error("incompatible model artifacts: {0}")]
    Incompatible(String),
}

// ============================================================================
// PER-CALL ERRORS
// ============================================================================

/// Malformed input for a single prediction call.
#[derive(Debug, Clone, Error)]
#[error("invalid input for `{field}`: {detail}")]
pub struct ShapeError {
    /// The offending input field (e.g. "heart_rate", "acc_z").
    pub field: &'static str,
    pub detail: String,
}

impl ShapeError {
    pub fn new(field: &'static str, detail: impl Into<String>) -> Self {
        Self {
            field,
            detail: detail.into(),
        }
    }
}

/// A single prediction call failed. The facade is unaffected.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Inference backend failure (session error, tensor conversion, ...).
    #[error("inference backend failure: {0}")]
    Backend(String),

    /// The model ran but produced output this pipeline cannot interpret.
    #[error("model produced unusable output: {0}")]
    Output(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_names_field() {
        let err = ShapeError::new("acc_y", "empty channel");
        let msg = err.to_string();
        assert!(msg.contains("acc_y"));
        assert!(msg.contains("empty channel"));
    }

    #[test]
    fn test_shape_error_converts_to_predict_error() {
        let err: PredictError = ShapeError::new("spo2", "not finite").into();
        assert!(matches!(err, PredictError::Shape(_)));
    }
}
