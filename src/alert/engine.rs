//! Decision Fusion - Alert Rule Engine
//!
//! Pure and stateless: derives alerts solely from the two assessments
//! passed in. Deduplication, rate-limiting and history belong to the
//! persistence/alerting collaborator above this engine, not here.
//!
//! Rules:
//! - V1: risk High     -> VITALS alert, high severity
//! - V2: risk Moderate -> VITALS alert, moderate severity
//! - F1: fall detected -> FALL alert, severity from fall probability
//! - C1: vitals anomaly AND fall in the same evaluation -> one extra
//!   CRITICAL alert on top of V*/F1, reflecting compounded risk

use super::rules::FusionThresholds;
use super::types::{AlertEvent, AlertSeverity, AlertType};
use crate::types::{FallAssessment, RiskAssessment, RiskLevel};

/// Fuse the two assessments into zero or more alerts, default thresholds.
///
/// Total over its input domain: every risk_level x fall_detected
/// combination yields a defined (possibly empty) list, never an error.
pub fn fuse(risk: &RiskAssessment, fall: &FallAssessment) -> Vec<AlertEvent> {
    fuse_with_thresholds(risk, fall, &FusionThresholds::default())
}

/// Fusion with custom thresholds. Alerts come out in rule order:
/// VITALS, FALL, CRITICAL.
pub fn fuse_with_thresholds(
    risk: &RiskAssessment,
    fall: &FallAssessment,
    thresholds: &FusionThresholds,
) -> Vec<AlertEvent> {
    let mut alerts = Vec::new();

    // V1/V2 are mutually exclusive, risk_level is categorical.
    match risk.risk_level {
        RiskLevel::High => {
            alerts.push(
                AlertEvent::new(
                    AlertType::Vitals,
                    AlertSeverity::High,
                    format!(
                        "High vitals risk detected ({:.1}% probability)",
                        risk.risk_probability * 100.0
                    ),
                )
                .with_risk(risk.clone()),
            );
        }
        RiskLevel::Moderate => {
            alerts.push(
                AlertEvent::new(
                    AlertType::Vitals,
                    AlertSeverity::Moderate,
                    format!(
                        "Moderate vitals risk detected ({:.1}% probability)",
                        risk.risk_probability * 100.0
                    ),
                )
                .with_risk(risk.clone()),
            );
        }
        RiskLevel::Normal => {}
    }

    // F1: severity proportional to fall probability.
    if fall.fall_detected {
        let severity = if fall.fall_probability >= thresholds.severe_fall_min {
            AlertSeverity::High
        } else {
            AlertSeverity::Moderate
        };

        alerts.push(
            AlertEvent::new(
                AlertType::Fall,
                severity,
                format!(
                    "Fall detected ({:.1}% probability)",
                    fall.fall_probability * 100.0
                ),
            )
            .with_fall(fall.clone()),
        );
    }

    // C1: compounded risk, emitted in addition to the individual alerts.
    if risk.is_anomaly && fall.fall_detected {
        alerts.push(
            AlertEvent::new(
                AlertType::Critical,
                AlertSeverity::Critical,
                format!(
                    "Critical: {} vitals risk combined with a detected fall",
                    risk.risk_level
                ),
            )
            .with_risk(risk.clone())
            .with_fall(fall.clone()),
        );
    }

    if !alerts.is_empty() {
        log::info!(
            "Fusion raised {} alert(s): {}",
            alerts.len(),
            alerts
                .iter()
                .map(|a| a.alert_type.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    alerts
}
