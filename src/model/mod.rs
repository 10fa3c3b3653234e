//! Model Module - Inference Backend & Trained Artifacts
//!
//! Separates ONNX session handling from the classifier adapters so the
//! backend can be swapped (or stubbed in tests) behind `SequenceModel`.

pub mod artifacts;
pub mod inference;

pub use artifacts::{LabelEncoder, ScalerParams};
pub use inference::{OnnxModel, SequenceModel};
