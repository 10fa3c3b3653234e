//! Fall Risk Classifier Adapter
//!
//! Wraps the trained fall sequence classifier over a 6-channel motion
//! window: accelerometer + gyroscope -> fall / no-fall + probability.

use std::path::Path;

use crate::error::{ModelLoadError, PredictError};
use crate::features::prepare_motion;
use crate::model::{OnnxModel, SequenceModel};
use crate::types::{FallAssessment, MotionWindow};

/// Fall classifier with its decision threshold.
pub struct FallClassifier {
    model: Box<dyn SequenceModel>,
    window_len: usize,
    /// P(fall) at or above this means fall_detected. Tunable via
    /// [`crate::predictor::PredictorConfig`], never inlined per call site.
    threshold: f32,
}

impl std::fmt::Debug for FallClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallClassifier")
            .field("window_len", &self.window_len)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl FallClassifier {
    pub fn new(model: Box<dyn SequenceModel>, window_len: usize, threshold: f32) -> Self {
        Self {
            model,
            window_len,
            threshold,
        }
    }

    pub fn load(
        model_path: &Path,
        window_len: usize,
        threshold: f32,
    ) -> Result<Self, ModelLoadError> {
        let model = OnnxModel::load(model_path)?;
        Ok(Self::new(Box::new(model), window_len, threshold))
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Classify one motion window.
    pub fn predict(&self, window: &MotionWindow) -> Result<FallAssessment, PredictError> {
        let tensor = prepare_motion(window, self.window_len)?;

        let output = self.model.run(tensor)?;

        // Binary models come out of export either as a single sigmoid
        // [P(fall)] or as a softmax [P(no fall), P(fall)]; the final
        // element is P(fall) in both layouts.
        let probability = output
            .last()
            .copied()
            .ok_or_else(|| PredictError::Output("empty model output".to_string()))?;

        if !probability.is_finite() {
            return Err(PredictError::Output(format!(
                "fall probability is not finite: {}",
                probability
            )));
        }

        let assessment = FallAssessment {
            fall_probability: probability.clamp(0.0, 1.0),
            fall_detected: probability >= self.threshold,
        };

        log::debug!(
            "Motion window ({} samples) -> fall={} ({:.1}%)",
            window.len(),
            assessment.fall_detected,
            assessment.fall_probability * 100.0
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

    fn window() -> MotionWindow {
        MotionWindow::new(
            vec![0.1, 0.2, 0.1],
            vec![0.2, 0.3, 0.2],
            vec![9.8, 9.7, 9.8],
            vec![0.1, 0.2, 0.1],
            vec![0.1, 0.2, 0.1],
            vec![0.1, 0.2, 0.1],
        )
    }

    #[test]
    fn test_sigmoid_output_layout() {
        let clf = FallClassifier::new(Box::new(FixedModel(vec![0.92])), 10, 0.5);
        let result = clf.predict(&window()).unwrap();

        assert!(result.fall_detected);
        assert!((result.fall_probability - 0.92).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_output_layout() {
        let clf = FallClassifier::new(Box::new(FixedModel(vec![0.97, 0.03])), 10, 0.5);
        let result = clf.predict(&window()).unwrap();

        assert!(!result.fall_detected);
        assert!((result.fall_probability - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        let clf = FallClassifier::new(Box::new(FixedModel(vec![0.5])), 10, 0.5);
        assert!(clf.predict(&window()).unwrap().fall_detected);

        let clf = FallClassifier::new(Box::new(FixedModel(vec![0.4999])), 10, 0.5);
        assert!(!clf.predict(&window()).unwrap().fall_detected);
    }

    #[test]
    fn test_custom_threshold() {
        let clf = FallClassifier::new(Box::new(FixedModel(vec![0.6])), 10, 0.75);
        assert!(!clf.predict(&window()).unwrap().fall_detected);
    }

    #[test]
    fn test_mismatched_channels_rejected() {
        let clf = FallClassifier::new(Box::new(FixedModel(vec![0.1])), 10, 0.5);
        let mut bad = window();
        bad.gyr_z.pop();

        let err = clf.predict(&bad).unwrap_err();
        assert!(matches!(err, PredictError::Shape(_)));
    }

    #[test]
    fn test_empty_output_is_per_call_error() {
        let clf = FallClassifier::new(Box::new(FixedModel(vec![])), 10, 0.5);
        let err = clf.predict(&window()).unwrap_err();
        assert!(matches!(err, PredictError::Output(_)));
    }
}
