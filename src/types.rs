//! Core Types
//!
//! Data structures shared across the pipeline. No logic beyond
//! construction and label mapping.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Categorical vitals risk produced by the vitals classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Vitals within the trained normal envelope, no action.
    Normal,
    /// Concerning vitals, guardians should be notified.
    Moderate,
    /// Dangerous vitals, immediate attention needed.
    High,
}

impl RiskLevel {
    /// The class name the label encoder was trained with for "no anomaly".
    pub const NORMAL_LABEL: &'static str = "Normal";

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "Normal",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    /// Map a decoded encoder label to a risk level. Class order is
    /// training-run-dependent, so lookup is always by name.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Normal" => Some(RiskLevel::Normal),
            "Moderate" => Some(RiskLevel::Moderate),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SAMPLES
// ============================================================================

/// A single vitals reading.
///
/// No range check on purpose: out-of-range values are exactly the
/// anomalies being detected. Only non-finite values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    /// Heart rate in bpm.
    pub heart_rate: f32,
    /// Blood oxygen saturation in percent.
    pub spo2: f32,
}

impl VitalsSample {
    pub fn new(heart_rate: f32, spo2: f32) -> Result<Self, ShapeError> {
        if !heart_rate.is_finite() {
            return Err(ShapeError::new("heart_rate", "value must be finite"));
        }
        if !spo2.is_finite() {
            return Err(ShapeError::new("spo2", "value must be finite"));
        }
        Ok(Self { heart_rate, spo2 })
    }
}

/// An ordered window of accelerometer/gyroscope readings.
///
/// Index i refers to the same timestamp across all six channels; channels
/// must therefore have equal length. Validation happens when the window is
/// turned into a tensor, see [`crate::features::prepare_motion`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionWindow {
    /// Accelerometer, m/s^2.
    pub acc_x: Vec<f32>,
    pub acc_y: Vec<f32>,
    pub acc_z: Vec<f32>,
    /// Gyroscope, deg/s.
    pub gyr_x: Vec<f32>,
    pub gyr_y: Vec<f32>,
    pub gyr_z: Vec<f32>,
}

impl MotionWindow {
    pub fn new(
        acc_x: Vec<f32>,
        acc_y: Vec<f32>,
        acc_z: Vec<f32>,
        gyr_x: Vec<f32>,
        gyr_y: Vec<f32>,
        gyr_z: Vec<f32>,
    ) -> Self {
        Self {
            acc_x,
            acc_y,
            acc_z,
            gyr_x,
            gyr_y,
            gyr_z,
        }
    }

    /// Number of samples in the window (length of the first channel).
    pub fn len(&self) -> usize {
        self.acc_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acc_x.is_empty()
    }

    /// Channels in fixed classifier order, paired with their names.
    pub fn channels(&self) -> [(&'static str, &[f32]); 6] {
        [
            ("acc_x", &self.acc_x),
            ("acc_y", &self.acc_y),
            ("acc_z", &self.acc_z),
            ("gyr_x", &self.gyr_x),
            ("gyr_y", &self.gyr_y),
            ("gyr_z", &self.gyr_z),
        ]
    }

    /// Append one sample to the end of the window.
    pub fn push(&mut self, acc: [f32; 3], gyr: [f32; 3]) {
        self.acc_x.push(acc[0]);
        self.acc_y.push(acc[1]);
        self.acc_z.push(acc[2]);
        self.gyr_x.push(gyr[0]);
        self.gyr_y.push(gyr[1]);
        self.gyr_z.push(gyr[2]);
    }
}

// ============================================================================
// ASSESSMENTS
// ============================================================================

/// Output of the vitals risk classifier for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Probability of the selected class, 0.0 - 1.0.
    pub risk_probability: f32,
    /// True iff the selected class is not the trained "Normal" class.
    pub is_anomaly: bool,
}

/// Output of the fall classifier for one motion window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallAssessment {
    pub fall_detected: bool,
    /// P(fall), 0.0 - 1.0.
    pub fall_probability: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_label_roundtrip() {
        for level in [RiskLevel::Normal, RiskLevel::Moderate, RiskLevel::High] {
            assert_eq!(RiskLevel::from_label(level.as_str()), Some(level));
        }
        assert_eq!(RiskLevel::from_label("Critical"), None);
    }

    #[test]
    fn test_vitals_sample_rejects_non_finite() {
        assert!(VitalsSample::new(75.0, 98.0).is_ok());

        let err = VitalsSample::new(f32::NAN, 98.0).unwrap_err();
        assert_eq!(err.field, "heart_rate");

        let err = VitalsSample::new(75.0, f32::INFINITY).unwrap_err();
        assert_eq!(err.field, "spo2");
    }

    #[test]
    fn test_motion_window_push() {
        let mut window = MotionWindow::default();
        window.push([0.1, 0.2, 9.8], [0.1, 0.1, 0.2]);
        window.push([0.2, 0.3, 9.7], [0.2, 0.1, 0.1]);

        assert_eq!(window.len(), 2);
        assert_eq!(window.acc_z, vec![9.8, 9.7]);
        assert_eq!(window.gyr_z, vec![0.2, 0.1]);
    }
}
