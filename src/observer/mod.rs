use crate::classify::OperatingState;
use crate::health::HealthReport;
use crate::prng::NoiseSource;
use crate::simulator::{MetricSnapshot, Simulator};

/// A read-only snapshot of what the organism looks like right now.
///
/// Design intent:
/// - Observers cannot mutate or steer the simulator.
/// - Snapshotting is *on-demand* and can allocate; the tick path stays
///   untouched.
/// - State and health are recomputed from the live metrics at snapshot time;
///   they own no state of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsSnapshot {
    pub ticks: u64,
    pub running: bool,
    pub metrics: MetricSnapshot,
    pub state: OperatingState,
    pub health: HealthReport,
}

pub struct VitalsAdapter<'a, N: NoiseSource> {
    sim: &'a Simulator<N>,
}

impl<'a, N: NoiseSource> VitalsAdapter<'a, N> {
    pub fn new(sim: &'a Simulator<N>) -> Self {
        Self { sim }
    }

    pub fn snapshot(&self) -> VitalsSnapshot {
        VitalsSnapshot {
            ticks: self.sim.ticks(),
            running: self.sim.is_running(),
            metrics: self.sim.snapshot().clone(),
            state: self.sim.state(),
            health: self.sim.health(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthStatus;

    #[test]
    fn snapshot_reflects_live_simulator() {
        let mut sim = Simulator::seeded(42);
        sim.start();
        for _ in 0..25 {
            sim.tick();
        }

        let snap = VitalsAdapter::new(&sim).snapshot();
        assert_eq!(snap.ticks, 25);
        assert!(snap.running);
        assert_eq!(snap.metrics, *sim.snapshot());
        assert_eq!(snap.state, sim.state());
        assert_eq!(snap.health.status, sim.health().status);
    }

    #[test]
    fn redundant_reads_agree() {
        // Classifier and evaluator are pure; two snapshots of an unticked
        // simulator are identical.
        let sim = Simulator::seeded(7);
        let a = VitalsAdapter::new(&sim).snapshot();
        let b = VitalsAdapter::new(&sim).snapshot();
        assert_eq!(a, b);
        assert_eq!(a.health.status, HealthStatus::Excellent);
    }
}
