#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::simulator::MetricSnapshot;

/// Qualitative summary of how many metrics have breached safety thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HealthStatus {
    Excellent,
    Good,
    Critical,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "excellent",
            HealthStatus::Good => "good",
            HealthStatus::Critical => "critical",
        }
    }
}

/// Evaluator output: status plus the issues that produced it, in the fixed
/// order the thresholds are tested.
///
/// Serialize-only: the labels are borrowed `&'static str`, and nothing
/// deserializes a report (the daemon re-encodes issues as owned strings on
/// the wire).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HealthReport {
    pub status: HealthStatus,
    pub issues: Vec<&'static str>,
}

// Breach thresholds and their issue labels. All strict `>`.
const HIGH_TEMPERATURE: f64 = 80.0;
const CPU_OVERLOAD: f64 = 95.0;
const MEMORY_PRESSURE: f64 = 90.0;
const HIGH_POWER_DRAW: f64 = 380.0;

/// Scan a snapshot for threshold breaches.
///
/// Unlike the classifier this is not first-match-wins: all four tests run
/// unconditionally and every applicable issue is collected.
pub fn evaluate(snapshot: &MetricSnapshot) -> HealthReport {
    let mut issues = Vec::new();

    if snapshot.temperature > HIGH_TEMPERATURE {
        issues.push("High temperature");
    }
    if snapshot.cpu_usage > CPU_OVERLOAD {
        issues.push("CPU overload");
    }
    if snapshot.memory_usage > MEMORY_PRESSURE {
        issues.push("Memory pressure");
    }
    if snapshot.power_draw > HIGH_POWER_DRAW {
        issues.push("High power consumption");
    }

    let status = match issues.len() {
        0 => HealthStatus::Excellent,
        1 | 2 => HealthStatus::Good,
        _ => HealthStatus::Critical,
    };

    HealthReport { status, issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm_snapshot() -> MetricSnapshot {
        MetricSnapshot {
            token_rate: 45.0,
            cpu_usage: 60.0,
            gpu_usage: 55.0,
            memory_usage: 65.0,
            storage_usage: 62.0,
            temperature: 72.0,
            power_draw: 320.0,
            network_io: 30.0,
            disk_io: 18.0,
        }
    }

    #[test]
    fn no_breaches_is_excellent() {
        let report = evaluate(&calm_snapshot());
        assert_eq!(report.status, HealthStatus::Excellent);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn single_breach_is_good() {
        let mut s = calm_snapshot();
        s.power_draw = 385.0;
        let report = evaluate(&s);
        assert_eq!(report.status, HealthStatus::Good);
        assert_eq!(report.issues, vec!["High power consumption"]);
    }

    #[test]
    fn two_breaches_are_still_good() {
        let mut s = calm_snapshot();
        s.temperature = 82.0;
        s.memory_usage = 91.0;
        let report = evaluate(&s);
        assert_eq!(report.status, HealthStatus::Good);
        assert_eq!(report.issues, vec!["High temperature", "Memory pressure"]);
    }

    #[test]
    fn all_breaches_are_collected_and_critical() {
        let mut s = calm_snapshot();
        s.temperature = 85.0;
        s.cpu_usage = 96.0;
        s.memory_usage = 91.0;
        s.power_draw = 390.0;
        let report = evaluate(&s);
        assert_eq!(report.status, HealthStatus::Critical);
        assert_eq!(
            report.issues,
            vec![
                "High temperature",
                "CPU overload",
                "Memory pressure",
                "High power consumption",
            ]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn report_serializes_with_borrowed_labels() {
        // The issue labels are &'static str; the report must stay
        // serialize-only so the borrowed labels never meet a deserializer
        // lifetime.
        let mut s = calm_snapshot();
        s.power_draw = 385.0;
        let json = serde_json::to_string(&evaluate(&s)).unwrap();
        assert!(json.contains("High power consumption"));
        assert!(json.contains("Good"));
    }

    #[test]
    fn exact_thresholds_do_not_breach() {
        let mut s = calm_snapshot();
        s.temperature = 80.0;
        s.cpu_usage = 95.0;
        s.memory_usage = 90.0;
        s.power_draw = 380.0;
        let report = evaluate(&s);
        assert_eq!(report.status, HealthStatus::Excellent);
        assert!(report.issues.is_empty());
    }
}
