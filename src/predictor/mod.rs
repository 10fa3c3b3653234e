//! Predictor Module - Classifier Adapters & Facade
//!
//! `HealthPredictor` loads both adapters once at construction and exposes
//! the two prediction entry points the rest of the system uses. If either
//! adapter fails to load, construction fails entirely; callers never see a
//! facade that can only do half its job.

pub mod fall;
pub mod vitals;

pub use fall::FallClassifier;
pub use vitals::VitalsClassifier;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelLoadError, PredictError};
use crate::features::{FALL_WINDOW, VITALS_TIME_STEPS};
use crate::types::{FallAssessment, MotionWindow, RiskAssessment};

// ============================================================================
// CONFIG
// ============================================================================

/// Default fall decision threshold.
pub const DEFAULT_FALL_THRESHOLD: f32 = 0.5;

/// Paths and tunables for facade construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub vitals_model: PathBuf,
    pub vitals_scaler: PathBuf,
    pub vitals_encoder: PathBuf,
    pub fall_model: PathBuf,

    pub vitals_time_steps: usize,
    pub fall_window: usize,
    pub fall_threshold: f32,
}

impl PredictorConfig {
    /// Conventional artifact filenames inside one model directory.
    pub fn new(model_dir: impl AsRef<Path>) -> Self {
        let dir = model_dir.as_ref();
        Self {
            vitals_model: dir.join("vitals_model.onnx"),
            vitals_scaler: dir.join("vitals_scaler.json"),
            vitals_encoder: dir.join("vitals_encoder.json"),
            fall_model: dir.join("fall_model.onnx"),
            vitals_time_steps: VITALS_TIME_STEPS,
            fall_window: FALL_WINDOW,
            fall_threshold: DEFAULT_FALL_THRESHOLD,
        }
    }

    pub fn with_fall_threshold(mut self, threshold: f32) -> Self {
        self.fall_threshold = threshold;
        self
    }
}

// ============================================================================
// FACADE
// ============================================================================

/// Load-once facade over the two classifier adapters.
///
/// Immutable after construction; share one instance across request tasks
/// (`Arc<HealthPredictor>`), no external locking required.
pub struct HealthPredictor {
    vitals: VitalsClassifier,
    fall: FallClassifier,
}

impl std::fmt::Debug for HealthPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthPredictor")
            .field("vitals", &self.vitals)
            .field("fall", &self.fall)
            .finish()
    }
}

impl HealthPredictor {
    /// Load both adapters' model and preprocessing artifacts.
    pub fn load(config: &PredictorConfig) -> Result<Self, ModelLoadError> {
        log::info!("Loading health predictor models...");

        let vitals = VitalsClassifier::load(
            &config.vitals_model,
            &config.vitals_scaler,
            &config.vitals_encoder,
            config.vitals_time_steps,
        )?;

        let fall = FallClassifier::load(
            &config.fall_model,
            config.fall_window,
            config.fall_threshold,
        )?;

        log::info!("Health predictor ready");

        Ok(Self { vitals, fall })
    }

    /// Assemble a facade from pre-built adapters (embedding, tests).
    pub fn from_parts(vitals: VitalsClassifier, fall: FallClassifier) -> Self {
        Self { vitals, fall }
    }

    /// Assess one vitals sample.
    pub fn assess_vitals(&self, heart_rate: f32, spo2: f32) -> Result<RiskAssessment, PredictError> {
        self.vitals.predict(heart_rate, spo2)
    }

    /// Assess one motion window.
    pub fn assess_motion(&self, window: &MotionWindow) -> Result<FallAssessment, PredictError> {
        self.fall.predict(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_conventional_paths() {
        let config = PredictorConfig::new("/opt/models");
        assert_eq!(config.vitals_model, PathBuf::from("/opt/models/vitals_model.onnx"));
        assert_eq!(config.fall_model, PathBuf::from("/opt/models/fall_model.onnx"));
        assert_eq!(config.vitals_time_steps, VITALS_TIME_STEPS);
        assert_eq!(config.fall_threshold, DEFAULT_FALL_THRESHOLD);
    }

    #[test]
    fn test_load_fails_entirely_when_artifacts_missing() {
        let config = PredictorConfig::new("/nonexistent/models");
        let err = HealthPredictor::load(&config).unwrap_err();
        assert!(matches!(err, ModelLoadError::NotFound(_)));
    }
}
