//! Vitals Risk Classifier Adapter
//!
//! Wraps the trained vitals sequence classifier: (heart_rate, spo2) ->
//! categorical risk level + probability. Scaler and label encoder come
//! from the same training run as the model.

use std::path::Path;

use crate::error::{ModelLoadError, PredictError};
use crate::features::{prepare_vitals, VITALS_FEATURES};
use crate::model::{LabelEncoder, OnnxModel, ScalerParams, SequenceModel};
use crate::types::{RiskAssessment, RiskLevel};

/// Vitals risk classifier with its trained preprocessing artifacts.
pub struct VitalsClassifier {
    model: Box<dyn SequenceModel>,
    scaler: ScalerParams,
    encoder: LabelEncoder,
    time_steps: usize,
    /// Index of the trained "Normal" class, resolved by name at load.
    normal_index: usize,
}

impl std::fmt::Debug for VitalsClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VitalsClassifier")
            .field("time_steps", &self.time_steps)
            .field("normal_index", &self.normal_index)
            .finish_non_exhaustive()
    }
}

impl VitalsClassifier {
    /// Assemble an adapter from a loaded model and artifacts, validating
    /// that they can belong together.
    pub fn new(
        model: Box<dyn SequenceModel>,
        scaler: ScalerParams,
        encoder: LabelEncoder,
        time_steps: usize,
    ) -> Result<Self, ModelLoadError> {
        scaler.validate(VITALS_FEATURES)?;

        let normal_index = encoder.index_of(RiskLevel::NORMAL_LABEL).ok_or_else(|| {
            ModelLoadError::Incompatible(format!(
                "label encoder {:?} has no \"{}\" class",
                encoder.classes,
                RiskLevel::NORMAL_LABEL
            ))
        })?;

        for label in &encoder.classes {
            if RiskLevel::from_label(label).is_none() {
                return Err(ModelLoadError::Incompatible(format!(
                    "unknown risk label \"{}\" in encoder",
                    label
                )));
            }
        }

        Ok(Self {
            model,
            scaler,
            encoder,
            time_steps,
            normal_index,
        })
    }

    /// Load model + scaler + encoder from disk.
    pub fn load(
        model_path: &Path,
        scaler_path: &Path,
        encoder_path: &Path,
        time_steps: usize,
    ) -> Result<Self, ModelLoadError> {
        let model = OnnxModel::load(model_path)?;
        let scaler = ScalerParams::load(scaler_path, VITALS_FEATURES)?;
        let encoder = LabelEncoder::load(encoder_path)?;

        Self::new(Box::new(model), scaler, encoder, time_steps)
    }

    /// Classify one vitals sample.
    pub fn predict(&self, heart_rate: f32, spo2: f32) -> Result<RiskAssessment, PredictError> {
        let tensor = prepare_vitals(heart_rate, spo2, &self.scaler, self.time_steps)?;

        let probs = self.model.run(tensor)?;

        if probs.len() != self.encoder.len() {
            return Err(PredictError::Output(format!(
                "expected {} class probabilities, got {}",
                self.encoder.len(),
                probs.len()
            )));
        }

        // Argmax over the softmax output.
        let (index, &probability) = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| PredictError::Output("empty probability vector".to_string()))?;

        let label = self
            .encoder
            .decode(index)
            .ok_or_else(|| PredictError::Output(format!("no label for class index {}", index)))?;

        // Encoder labels were validated at load, this cannot miss.
        let risk_level = RiskLevel::from_label(label)
            .ok_or_else(|| PredictError::Output(format!("unknown risk label \"{}\"", label)))?;

        let assessment = RiskAssessment {
            risk_level,
            risk_probability: probability.clamp(0.0, 1.0),
            is_anomaly: index != self.normal_index,
        };

        log::debug!(
            "Vitals hr={} spo2={} -> {} ({:.1}%)",
            heart_rate,
            spo2,
            assessment.risk_level,
            assessment.risk_probability * 100.0
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    struct FixedModel(Vec<f32>);

    impl SequenceModel for FixedModel {
        fn run(&self, _input: Array2<f32>) -> Result<Vec<f32>, PredictError> {
            Ok(self.0.clone())
        }
    }

    fn scaler() -> ScalerParams {
        ScalerParams {
            mean: vec![79.1, 96.8],
            scale: vec![14.9, 3.2],
        }
    }

    // sklearn sorts classes alphabetically: High=0, Moderate=1, Normal=2.
    fn encoder() -> LabelEncoder {
        LabelEncoder {
            classes: vec!["High".into(), "Moderate".into(), "Normal".into()],
        }
    }

    fn classifier(output: Vec<f32>) -> VitalsClassifier {
        VitalsClassifier::new(Box::new(FixedModel(output)), scaler(), encoder(), 10).unwrap()
    }

    #[test]
    fn test_normal_decoded_by_name_not_index() {
        // "Normal" sits at index 2 here, not 0.
        let result = classifier(vec![0.05, 0.10, 0.85]).predict(75.0, 98.0).unwrap();

        assert_eq!(result.risk_level, RiskLevel::Normal);
        assert!(!result.is_anomaly);
        assert!((result.risk_probability - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_high_risk_is_anomaly() {
        let result = classifier(vec![0.90, 0.07, 0.03]).predict(125.0, 87.0).unwrap();

        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result.is_anomaly);
    }

    #[test]
    fn test_moderate_risk_is_anomaly() {
        let result = classifier(vec![0.15, 0.70, 0.15]).predict(95.0, 93.0).unwrap();

        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert!(result.is_anomaly);
    }

    #[test]
    fn test_probability_clamped() {
        // Exported softmax can drift slightly past 1.0.
        let result = classifier(vec![1.0000002, 0.0, 0.0]).predict(40.0, 80.0).unwrap();
        assert!(result.risk_probability <= 1.0);
    }

    #[test]
    fn test_wrong_output_length_is_per_call_error() {
        let err = classifier(vec![0.5, 0.5]).predict(75.0, 98.0).unwrap_err();
        assert!(matches!(err, PredictError::Output(_)));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let err = classifier(vec![0.1, 0.1, 0.8])
            .predict(f32::NAN, 98.0)
            .unwrap_err();
        assert!(matches!(err, PredictError::Shape(_)));
    }

    #[test]
    fn test_encoder_without_normal_rejected_at_construction() {
        let bad = LabelEncoder {
            classes: vec!["High".into(), "Moderate".into()],
        };
        let err =
            VitalsClassifier::new(Box::new(FixedModel(vec![])), scaler(), bad, 10).unwrap_err();
        assert!(matches!(err, ModelLoadError::Incompatible(_)));
    }

    #[test]
    fn test_unknown_label_rejected_at_construction() {
        let bad = LabelEncoder {
            classes: vec!["Normal".into(), "Severe".into()],
        };
        let err =
            VitalsClassifier::new(Box::new(FixedModel(vec![])), scaler(), bad, 10).unwrap_err();
        assert!(matches!(err, ModelLoadError::Incompatible(_)));
    }

    #[test]
    fn test_determinism() {
        let clf = classifier(vec![0.05, 0.10, 0.85]);
        let a = clf.predict(75.0, 98.0).unwrap();
        let b = clf.predict(75.0, 98.0).unwrap();
        assert_eq!(a, b);
    }
}
