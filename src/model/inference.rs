//! Inference Engine - ONNX Runtime Integration
//!
//! `SequenceModel` is the seam between the classifier adapters and the
//! backend: adapters hand over a `[steps, features]` tensor and get back
//! the flattened output vector. `OnnxModel` is the production
//! implementation; tests plug in stubs.

use std::path::{Path, PathBuf};

use ndarray::{Array2, Axis};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::error::{ModelLoadError, PredictError};

// ============================================================================
// SEQUENCE MODEL TRAIT
// ============================================================================

/// A loaded sequence classifier.
///
/// Implementations must be deterministic (same input, same output for the
/// life of the loaded model) and safe for concurrent use.
pub trait SequenceModel: Send + Sync {
    /// Run a forward pass over a single `[steps, features]` sequence and
    /// return the model output flattened to a vector.
    fn run(&self, input: Array2<f32>) -> Result<Vec<f32>, PredictError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// An ONNX Runtime session wrapping one trained sequence classifier.
///
/// `Session::run` needs `&mut self`, so the session sits behind a mutex;
/// everything else about the model is immutable after load.
pub struct OnnxModel {
    session: Mutex<Session>,
    path: PathBuf,
}

impl OnnxModel {
    /// Load an ONNX model from file. Fails fast: a missing or broken
    /// artifact must abort facade construction, not degrade per-request.
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        if !path.exists() {
            return Err(ModelLoadError::NotFound(path.to_path_buf()));
        }

        log::info!("Loading ONNX model from: {}", path.display());

        let session = Session::builder()
            .map_err(|e| ModelLoadError::Session {
                path: path.to_path_buf(),
                detail: format!("failed to create session builder: {}", e),
            })?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelLoadError::Session {
                path: path.to_path_buf(),
                detail: format!("failed to set optimization: {}", e),
            })?
            .commit_from_file(path)
            .map_err(|e| ModelLoadError::Session {
                path: path.to_path_buf(),
                detail: format!("failed to load model: {}", e),
            })?;

        log::info!("ONNX model loaded: {}", path.display());

        Ok(Self {
            session: Mutex::new(session),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel").field("path", &self.path).finish_non_exhaustive()
    }
}

impl SequenceModel for OnnxModel {
    fn run(&self, input: Array2<f32>) -> Result<Vec<f32>, PredictError> {
        // Models are exported with a leading batch dimension.
        let batched = input.insert_axis(Axis(0));

        let mut session = self.session.lock();

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PredictError::Backend("model defines no output".to_string()))?;

        let input_tensor = Value::from_array(batched)
            .map_err(|e| PredictError::Backend(format!("tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictError::Backend(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| PredictError::Backend("no output produced".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictError::Backend(format!("extract error: {}", e)))?;

        Ok(output_tensor.1.to_vec())
    }
}
