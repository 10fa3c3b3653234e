//! Feature Preprocessor
//!
//! Two preparation paths:
//! - vitals: normalize with the trained scaler, replicate across a fixed
//!   number of time steps. The replication encodes "no temporal vitals
//!   history at inference time" while still satisfying the sequence input
//!   shape the model was trained on. Do not "fix" this without retraining.
//! - motion: stack the six raw channels column-wise, pad short windows by
//!   repeating the last sample, truncate long ones to the most recent
//!   samples.

use ndarray::Array2;

use super::{MOTION_CHANNELS, VITALS_FEATURES};
use crate::error::ShapeError;
use crate::model::ScalerParams;
use crate::types::{MotionWindow, VitalsSample};

// ============================================================================
// VITALS
// ============================================================================

/// Build the `[time_steps, 2]` input tensor for the vitals classifier.
pub fn prepare_vitals(
    heart_rate: f32,
    spo2: f32,
    scaler: &ScalerParams,
    time_steps: usize,
) -> Result<Array2<f32>, ShapeError> {
    let sample = VitalsSample::new(heart_rate, spo2)?;

    let normalized = scaler.transform(&[sample.heart_rate, sample.spo2]);

    let mut tensor = Array2::<f32>::zeros((time_steps, VITALS_FEATURES));
    for mut row in tensor.rows_mut() {
        row[0] = normalized[0];
        row[1] = normalized[1];
    }

    Ok(tensor)
}

// ============================================================================
// MOTION
// ============================================================================

/// Build the `[window_len, 6]` input tensor for the fall classifier.
///
/// Index i refers to the same timestamp across all six channels, so every
/// channel must be non-empty and of equal length.
pub fn prepare_motion(window: &MotionWindow, window_len: usize) -> Result<Array2<f32>, ShapeError> {
    let channels = window.channels();

    let len = channels[0].1.len();
    for (name, values) in channels {
        if values.is_empty() {
            return Err(ShapeError::new(name, "empty channel"));
        }
        if values.len() != len {
            return Err(ShapeError::new(
                name,
                format!("channel length {} != {} (acc_x)", values.len(), len),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ShapeError::new(
                name,
                format!("non-finite value at index {}", pos),
            ));
        }
    }

    let mut tensor = Array2::<f32>::zeros((window_len, MOTION_CHANNELS));
    for step in 0..window_len {
        // Pad by repeating the last sample; truncate keeps the most recent.
        let src = if len >= window_len {
            len - window_len + step
        } else {
            step.min(len - 1)
        };

        for (col, (_, values)) in channels.iter().enumerate() {
            tensor[[step, col]] = values[src];
        }
    }

    Ok(tensor)
}
