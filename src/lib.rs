//! Health Monitor Core - Real-time Inference & Risk Classification
//!
//! The inference pipeline behind the health-monitoring backend: takes
//! physiological and motion samples for a patient, runs two pretrained
//! classifiers (vital-sign risk level, fall detection) and turns their
//! outputs into a deterministic alerting decision.
//!
//! Pipeline: caller -> [`HealthPredictor`] -> feature preprocessing ->
//! classifier adapter -> raw class/probability -> [`alert::fuse`] ->
//! alert events consumed by the persistence/notification collaborators.
//!
//! Model, scaler and encoder artifacts are loaded once at facade
//! construction and are immutable afterwards; the facade is `Send + Sync`
//! and can be shared across request tasks.

pub mod alert;
pub mod error;
pub mod features;
pub mod model;
pub mod monitor;
pub mod predictor;
pub mod types;

// Re-export the main entry points
pub use alert::{fuse, fuse_with_thresholds, AlertEvent, AlertSeverity, AlertType, FusionThresholds};
pub use error::{ModelLoadError, PredictError, ShapeError};
pub use model::{LabelEncoder, OnnxModel, ScalerParams, SequenceModel};
pub use monitor::{Evaluation, HealthDataRecord, HealthMonitor};
pub use predictor::{FallClassifier, HealthPredictor, PredictorConfig, VitalsClassifier};
pub use types::{FallAssessment, MotionWindow, RiskAssessment, RiskLevel, VitalsSample};
