//! Alert Types
//!
//! Data structures only, no rule logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{FallAssessment, RiskAssessment};

// ============================================================================
// ALERT TYPE & SEVERITY
// ============================================================================

/// What triggered the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    /// Abnormal vital signs.
    Vitals,
    /// Fall detected from motion data.
    Fall,
    /// Vitals anomaly and fall in the same evaluation, compounded risk.
    Critical,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Vitals => "VITALS",
            AlertType::Fall => "FALL",
            AlertType::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alert severity, ordered lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Moderate,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Moderate => "moderate",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ALERT EVENT
// ============================================================================

/// One alert raised by decision fusion.
///
/// The core does not own alert storage: the persistence collaborator
/// stores these with a foreign key to the triggering sample and its own
/// status field; the notification collaborator routes type + message to
/// guardians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: Uuid,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// The assessment(s) this alert was derived from.
    pub risk: Option<RiskAssessment>,
    pub fall: Option<FallAssessment>,
}

impl AlertEvent {
    pub fn new(alert_type: AlertType, severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            alert_type,
            severity,
            message: message.into(),
            created_at: Utc::now(),
            risk: None,
            fall: None,
        }
    }

    pub fn with_risk(mut self, risk: RiskAssessment) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_fall(mut self, fall: FallAssessment) -> Self {
        self.fall = Some(fall);
        self
    }
}
