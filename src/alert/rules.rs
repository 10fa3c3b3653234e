//! Alert Fusion Thresholds
//!
//! Constants and tunable config only, no fusion logic.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Fall probability at or above this raises the fall alert to high
/// severity instead of moderate.
pub const SEVERE_FALL_THRESHOLD: f32 = 0.8;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Tunable knobs for decision fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionThresholds {
    /// Fall probability at or above this = high-severity fall alert.
    pub severe_fall_min: f32,
}

impl Default for FusionThresholds {
    fn default() -> Self {
        Self {
            severe_fall_min: SEVERE_FALL_THRESHOLD,
        }
    }
}

impl FusionThresholds {
    /// More falls escalated to high severity.
    pub fn high_sensitivity() -> Self {
        Self {
            severe_fall_min: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = FusionThresholds::default();
        assert_eq!(t.severe_fall_min, SEVERE_FALL_THRESHOLD);
    }
}
