//! Health Monitor - Per-Patient Buffering & End-to-End Evaluation
//!
//! The originating API receives one motion sample per request, while the
//! fall classifier expects a window. This module carries that collaborator
//! duty: it keeps the last N motion samples per patient and runs the whole
//! pipeline (vitals assessment, fall assessment, decision fusion) for each
//! incoming health-data record.
//!
//! The fusion engine itself stays stateless; the only state here is the
//! per-patient ring of recent motion samples.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alert::{fuse_with_thresholds, AlertEvent, FusionThresholds};
use crate::error::PredictError;
use crate::features::FALL_WINDOW;
use crate::predictor::HealthPredictor;
use crate::types::{FallAssessment, MotionWindow, RiskAssessment};

// ============================================================================
// RECORDS
// ============================================================================

/// One incoming sample at the core-to-collaborator boundary: vitals plus
/// a single motion reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDataRecord {
    pub patient_id: Uuid,
    pub heart_rate: f32,
    pub spo2: f32,
    pub acc_x: f32,
    pub acc_y: f32,
    pub acc_z: f32,
    pub gyr_x: f32,
    pub gyr_y: f32,
    pub gyr_z: f32,
}

/// Everything the persistence/notification collaborators consume for one
/// evaluated record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub patient_id: Uuid,
    pub risk: RiskAssessment,
    pub fall: FallAssessment,
    pub alerts: Vec<AlertEvent>,
}

// ============================================================================
// MONITOR
// ============================================================================

/// Pipeline front door: buffers motion samples per patient and evaluates
/// each incoming record against both classifiers.
pub struct HealthMonitor {
    predictor: HealthPredictor,
    thresholds: FusionThresholds,
    window_capacity: usize,
    windows: Mutex<HashMap<Uuid, MotionWindow>>,
}

impl HealthMonitor {
    pub fn new(predictor: HealthPredictor) -> Self {
        Self::with_thresholds(predictor, FusionThresholds::default())
    }

    pub fn with_thresholds(predictor: HealthPredictor, thresholds: FusionThresholds) -> Self {
        Self {
            predictor,
            thresholds,
            window_capacity: FALL_WINDOW,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Number of motion samples currently buffered for a patient.
    pub fn buffered_samples(&self, patient_id: Uuid) -> usize {
        self.windows
            .lock()
            .get(&patient_id)
            .map(MotionWindow::len)
            .unwrap_or(0)
    }

    /// Drop a patient's buffered motion history.
    pub fn clear_patient(&self, patient_id: Uuid) {
        self.windows.lock().remove(&patient_id);
    }

    /// Evaluate one incoming record: buffer its motion sample, assess
    /// vitals and motion, fuse alerts.
    ///
    /// A per-call failure leaves the monitor usable for subsequent calls.
    pub fn evaluate(&self, record: &HealthDataRecord) -> Result<Evaluation, PredictError> {
        // Reject malformed motion values before they enter the buffer,
        // otherwise one bad sample poisons the next N evaluations.
        validate_motion_sample(record)?;

        let window = self.push_motion_sample(record);

        let risk = self.predictor.assess_vitals(record.heart_rate, record.spo2)?;
        let fall = self.predictor.assess_motion(&window)?;

        let alerts = fuse_with_thresholds(&risk, &fall, &self.thresholds);

        if !alerts.is_empty() {
            log::info!(
                "Patient {}: {} alert(s) raised (risk={}, fall={})",
                record.patient_id,
                alerts.len(),
                risk.risk_level,
                fall.fall_detected
            );
        }

        Ok(Evaluation {
            patient_id: record.patient_id,
            risk,
            fall,
            alerts,
        })
    }

    /// Append the record's motion sample to the patient's window and
    /// return a snapshot of it. Windows never mix across patients.
    fn push_motion_sample(&self, record: &HealthDataRecord) -> MotionWindow {
        let mut windows = self.windows.lock();
        let window = windows.entry(record.patient_id).or_default();

        window.push(
            [record.acc_x, record.acc_y, record.acc_z],
            [record.gyr_x, record.gyr_y, record.gyr_z],
        );

        while window.len() > self.window_capacity {
            window.acc_x.remove(0);
            window.acc_y.remove(0);
            window.acc_z.remove(0);
            window.gyr_x.remove(0);
            window.gyr_y.remove(0);
            window.gyr_z.remove(0);
        }

        window.clone()
    }
}

fn validate_motion_sample(record: &HealthDataRecord) -> Result<(), PredictError> {
    let fields: [(&'static str, f32); 6] = [
        ("acc_x", record.acc_x),
        ("acc_y", record.acc_y),
        ("acc_z", record.acc_z),
        ("gyr_x", record.gyr_x),
        ("gyr_y", record.gyr_y),
        ("gyr_z", record.gyr_z),
    ];

    for (name, value) in fields {
        if !value.is_finite() {
            log::warn!("Rejected motion sample: {} is not finite", name);
            return Err(crate::error::ShapeError::new(name, "value must be finite").into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelEncoder, ScalerParams, SequenceModel};
    use crate::predictor::{FallClassifier, VitalsClassifier};
    use ndarray::Array2;

    struct FixedModel(Vec<f32>);

    impl SequenceModel for FixedModel {
        fn run(&self, _input: Array2<f32>) -> Result<Vec<f32>, PredictError> {
            Ok(self.0.clone())
        }
    }

    fn monitor(vitals_out: Vec<f32>, fall_out: Vec<f32>) -> HealthMonitor {
        let vitals = VitalsClassifier::new(
            Box::new(FixedModel(vitals_out)),
            ScalerParams {
                mean: vec![79.1, 96.8],
                scale: vec![14.9, 3.2],
            },
            LabelEncoder {
                classes: vec!["High".into(), "Moderate".into(), "Normal".into()],
            },
            10,
        )
        .unwrap();
        let fall = FallClassifier::new(Box::new(FixedModel(fall_out)), FALL_WINDOW, 0.5);

        HealthMonitor::new(HealthPredictor::from_parts(vitals, fall))
    }

    fn record(patient_id: Uuid) -> HealthDataRecord {
        HealthDataRecord {
            patient_id,
            heart_rate: 75.0,
            spo2: 98.0,
            acc_x: 0.1,
            acc_y: 0.2,
            acc_z: 9.8,
            gyr_x: 0.1,
            gyr_y: 0.1,
            gyr_z: 0.2,
        }
    }

    #[test]
    fn test_window_capped_per_patient() {
        let monitor = monitor(vec![0.05, 0.10, 0.85], vec![0.1]);
        let patient = Uuid::new_v4();

        for _ in 0..25 {
            monitor.evaluate(&record(patient)).unwrap();
        }

        assert_eq!(monitor.buffered_samples(patient), FALL_WINDOW);
    }

    #[test]
    fn test_windows_isolated_between_patients() {
        let monitor = monitor(vec![0.05, 0.10, 0.85], vec![0.1]);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        monitor.evaluate(&record(a)).unwrap();
        monitor.evaluate(&record(a)).unwrap();
        monitor.evaluate(&record(b)).unwrap();

        assert_eq!(monitor.buffered_samples(a), 2);
        assert_eq!(monitor.buffered_samples(b), 1);
    }

    #[test]
    fn test_clear_patient() {
        let monitor = monitor(vec![0.05, 0.10, 0.85], vec![0.1]);
        let patient = Uuid::new_v4();

        monitor.evaluate(&record(patient)).unwrap();
        monitor.clear_patient(patient);

        assert_eq!(monitor.buffered_samples(patient), 0);
    }

    #[test]
    fn test_quiet_record_raises_no_alerts() {
        let monitor = monitor(vec![0.05, 0.10, 0.85], vec![0.1]);
        let result = monitor.evaluate(&record(Uuid::new_v4())).unwrap();

        assert!(!result.risk.is_anomaly);
        assert!(!result.fall.fall_detected);
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn test_bad_motion_sample_never_enters_buffer() {
        let monitor = monitor(vec![0.05, 0.10, 0.85], vec![0.1]);
        let patient = Uuid::new_v4();

        let mut bad = record(patient);
        bad.gyr_y = f32::INFINITY;

        assert!(monitor.evaluate(&bad).is_err());
        assert_eq!(monitor.buffered_samples(patient), 0);
    }

    #[test]
    fn test_monitor_usable_after_per_call_failure() {
        let monitor = monitor(vec![0.05, 0.10, 0.85], vec![0.1]);
        let patient = Uuid::new_v4();

        let mut bad = record(patient);
        bad.heart_rate = f32::NAN;
        assert!(monitor.evaluate(&bad).is_err());

        assert!(monitor.evaluate(&record(patient)).is_ok());
    }
}
