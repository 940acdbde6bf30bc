//! Wire types for the vitalsd IPC protocol.
//!
//! One JSON object per line in each direction; requests and responses are
//! tagged enums so clients can mirror them with plain serde structs.

use serde::{Deserialize, Serialize};

use vitals::simulator::MetricSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Resume ticking. A fresh tick period starts now; missed ticks are not
    /// replayed.
    Start,
    /// Stop ticking and freeze the snapshot.
    Pause,
    /// Full display state: metrics, derived labels, knobs.
    GetState,
    /// Just the health evaluator output.
    GetHealth,
    CfgGet,
    CfgSet {
        #[serde(default)]
        tick_period_ms: Option<u32>,
        #[serde(default)]
        metabolic_rate: Option<f32>,
        #[serde(default)]
        workload: Option<f32>,
        #[serde(default)]
        efficiency: Option<f32>,
    },
    /// Replace the simulator with a fresh seeded session.
    Reseed {
        seed: u64,
    },
    Shutdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    State(Box<StateSnapshot>),
    Health {
        status: String,
        issues: Vec<String>,
    },
    Config {
        tick_period_ms: u32,
        knobs: OrganismKnobs,
    },
    Success {
        message: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub running: bool,
    pub ticks: u64,
    pub tick_period_ms: u32,
    pub state: String,
    pub health: String,
    #[serde(default)]
    pub issues: Vec<String>,
    pub metrics: MetricSnapshot,
    #[serde(default)]
    pub readings: Vec<MetricReading>,
    #[serde(default)]
    pub knobs: OrganismKnobs,
}

/// One channel expanded for display: value plus its static bounds and unit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MetricReading {
    pub channel: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    pub min: f64,
    pub max: f64,
}

/// The three auxiliary organism controls shown next to the metabolism panel.
///
/// Decorative: the daemon stores, clamps, and echoes them for UI clients, but
/// nothing feeds them into the random walk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrganismKnobs {
    pub metabolic_rate: f32,
    pub workload: f32,
    pub efficiency: f32,
}

impl Default for OrganismKnobs {
    fn default() -> Self {
        Self {
            metabolic_rate: 0.5,
            workload: 0.5,
            efficiency: 0.7,
        }
    }
}

impl OrganismKnobs {
    pub fn apply(
        &mut self,
        metabolic_rate: Option<f32>,
        workload: Option<f32>,
        efficiency: Option<f32>,
    ) {
        if let Some(v) = metabolic_rate {
            self.metabolic_rate = v.clamp(0.0, 1.0);
        }
        if let Some(v) = workload {
            self.workload = v.clamp(0.0, 1.0);
        }
        if let Some(v) = efficiency {
            self.efficiency = v.clamp(0.0, 1.0);
        }
    }
}

/// Bounds for the configurable tick period.
pub fn clamp_tick_period_ms(ms: u32) -> u32 {
    ms.clamp(100, 60_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_type_tags() {
        let line = serde_json::to_string(&Request::Start).unwrap();
        assert_eq!(line, r#"{"type":"Start"}"#);

        let parsed: Request = serde_json::from_str(r#"{"type":"GetHealth"}"#).unwrap();
        assert!(matches!(parsed, Request::GetHealth));
    }

    #[test]
    fn cfg_set_fields_default_to_none() {
        let parsed: Request =
            serde_json::from_str(r#"{"type":"CfgSet","tick_period_ms":2000}"#).unwrap();
        match parsed {
            Request::CfgSet {
                tick_period_ms,
                metabolic_rate,
                workload,
                efficiency,
            } => {
                assert_eq!(tick_period_ms, Some(2000));
                assert!(metabolic_rate.is_none());
                assert!(workload.is_none());
                assert!(efficiency.is_none());
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn knob_updates_are_clamped() {
        let mut knobs = OrganismKnobs::default();
        knobs.apply(Some(7.5), None, Some(-1.0));
        assert_eq!(knobs.metabolic_rate, 1.0);
        assert_eq!(knobs.workload, 0.5);
        assert_eq!(knobs.efficiency, 0.0);
    }

    #[test]
    fn tick_period_is_clamped() {
        assert_eq!(clamp_tick_period_ms(5), 100);
        assert_eq!(clamp_tick_period_ms(1500), 1500);
        assert_eq!(clamp_tick_period_ms(10_000_000), 60_000);
    }

    #[test]
    fn state_snapshot_round_trips() {
        let snap = StateSnapshot {
            running: true,
            ticks: 12,
            tick_period_ms: 1500,
            state: "active".to_string(),
            health: "excellent".to_string(),
            issues: Vec::new(),
            metrics: MetricSnapshot {
                token_rate: 45.0,
                cpu_usage: 60.0,
                gpu_usage: 55.0,
                memory_usage: 65.0,
                storage_usage: 62.0,
                temperature: 72.0,
                power_draw: 320.0,
                network_io: 30.0,
                disk_io: 18.0,
            },
            readings: vec![MetricReading {
                channel: "cpu_usage".to_string(),
                value: 60.0,
                unit: "%".to_string(),
                min: 30.0,
                max: 95.0,
            }],
            knobs: OrganismKnobs::default(),
        };

        let line = serde_json::to_string(&Response::State(Box::new(snap))).unwrap();
        let parsed: Response = serde_json::from_str(&line).unwrap();
        match parsed {
            Response::State(s) => {
                assert!(s.running);
                assert_eq!(s.ticks, 12);
                assert_eq!(s.metrics.cpu_usage, 60.0);
                assert_eq!(s.readings.len(), 1);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
