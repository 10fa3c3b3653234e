//! Features Module - Feature Preprocessing
//!
//! Converts raw scalar/sequence inputs into the exact tensor shape and
//! scale each classifier was trained on. Feature engineering here must
//! stay identical to training-time construction or predictions silently
//! degrade.

pub mod preprocess;

pub use preprocess::{prepare_motion, prepare_vitals};

/// Vitals features in scaler order: [heart_rate, spo2].
pub const VITALS_FEATURES: usize = 2;

/// Time steps the vitals sequence model expects. The trained contract
/// replicates a single normalized sample across this many steps.
pub const VITALS_TIME_STEPS: usize = 10;

/// Motion channels in fixed classifier order:
/// acc_x, acc_y, acc_z, gyr_x, gyr_y, gyr_z.
pub const MOTION_CHANNELS: usize = 6;

/// Default motion window length for the fall classifier.
pub const FALL_WINDOW: usize = 10;
