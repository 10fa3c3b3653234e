//! Alert Module - Decision Fusion & Alert Events
//!
//! Combines the two classifier outputs into zero or more alert events.
//!
//! ## Structure
//! - `types`: AlertEvent, AlertType, AlertSeverity
//! - `rules`: thresholds and constants
//! - `engine`: the fusion logic

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{fuse, fuse_with_thresholds};
pub use rules::{FusionThresholds, SEVERE_FALL_THRESHOLD};
pub use types::{AlertEvent, AlertSeverity, AlertType};
