#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ChannelConfigError, ChannelSpec};
use crate::classify::{self, OperatingState};
use crate::health::{self, HealthReport};
use crate::prng::{NoiseSource, Prng};

/// Tick cadence the composing layer should drive the simulator at.
///
/// The simulator itself never touches timers; whoever owns it is expected to
/// call [`Simulator::tick`] once per period while it is running.
pub const TICK_PERIOD_MS: u64 = 1500;

/// Current value of every channel.
///
/// Created once at simulator start and mutated in place on every tick.
/// Invariant: each field stays inside its channel's `[min, max]` clamp range
/// for the lifetime of the session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricSnapshot {
    pub token_rate: f64,
    pub cpu_usage: f64,
    pub gpu_usage: f64,
    pub memory_usage: f64,
    pub storage_usage: f64,
    pub temperature: f64,
    pub power_draw: f64,
    pub network_io: f64,
    pub disk_io: f64,
}

impl MetricSnapshot {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::TokenRate => self.token_rate,
            Channel::CpuUsage => self.cpu_usage,
            Channel::GpuUsage => self.gpu_usage,
            Channel::MemoryUsage => self.memory_usage,
            Channel::StorageUsage => self.storage_usage,
            Channel::Temperature => self.temperature,
            Channel::PowerDraw => self.power_draw,
            Channel::NetworkIo => self.network_io,
            Channel::DiskIo => self.disk_io,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::TokenRate => self.token_rate = value,
            Channel::CpuUsage => self.cpu_usage = value,
            Channel::GpuUsage => self.gpu_usage = value,
            Channel::MemoryUsage => self.memory_usage = value,
            Channel::StorageUsage => self.storage_usage = value,
            Channel::Temperature => self.temperature = value,
            Channel::PowerDraw => self.power_draw = value,
            Channel::NetworkIo => self.network_io = value,
            Channel::DiskIo => self.disk_io = value,
        }
    }
}

/// Full per-channel configuration for one simulator instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulatorConfig {
    specs: [ChannelSpec; Channel::COUNT],
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        let mut specs = [ChannelSpec::default_for(Channel::TokenRate); Channel::COUNT];
        for c in Channel::ALL {
            specs[c as usize] = ChannelSpec::default_for(c);
        }
        Self { specs }
    }
}

impl SimulatorConfig {
    pub fn spec(&self, channel: Channel) -> ChannelSpec {
        self.specs[channel as usize]
    }

    pub fn set_spec(&mut self, channel: Channel, spec: ChannelSpec) {
        self.specs[channel as usize] = spec;
    }

    /// Configuration-load-time check. The walk has no other failure path.
    pub fn validate(&self) -> Result<(), ChannelConfigError> {
        for c in Channel::ALL {
            self.spec(c).validate(c)?;
        }
        Ok(())
    }

    fn initial_snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            token_rate: self.spec(Channel::TokenRate).initial,
            cpu_usage: self.spec(Channel::CpuUsage).initial,
            gpu_usage: self.spec(Channel::GpuUsage).initial,
            memory_usage: self.spec(Channel::MemoryUsage).initial,
            storage_usage: self.spec(Channel::StorageUsage).initial,
            temperature: self.spec(Channel::Temperature).initial,
            power_draw: self.spec(Channel::PowerDraw).initial,
            network_io: self.spec(Channel::NetworkIo).initial,
            disk_io: self.spec(Channel::DiskIo).initial,
        }
    }
}

/// Bounded random-walk engine over the nine metric channels.
///
/// Owns the live snapshot; classifier and health outputs are derived views
/// recomputed on every read. The noise source is injected so evaluation can
/// be made exactly reproducible.
#[derive(Debug, Clone)]
pub struct Simulator<N: NoiseSource> {
    config: SimulatorConfig,
    snapshot: MetricSnapshot,
    noise: N,
    running: bool,
    ticks: u64,
}

impl Simulator<Prng> {
    /// Simulator over the built-in channel table, seeded for reproducibility.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Prng::new(seed))
    }
}

impl<N: NoiseSource> Simulator<N> {
    /// Simulator over the built-in channel table.
    pub fn new(noise: N) -> Self {
        let config = SimulatorConfig::default();
        let snapshot = config.initial_snapshot();
        Self {
            config,
            snapshot,
            noise,
            running: false,
            ticks: 0,
        }
    }

    /// Simulator over a caller-supplied channel table.
    pub fn with_config(config: SimulatorConfig, noise: N) -> Result<Self, ChannelConfigError> {
        config.validate()?;
        let snapshot = config.initial_snapshot();
        Ok(Self {
            config,
            snapshot,
            noise,
            running: false,
            ticks: 0,
        })
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Freeze the snapshot. Subsequent [`tick`](Self::tick) calls are no-ops
    /// until [`start`](Self::start); nothing is drawn from the noise source
    /// while paused, so no missed ticks exist to catch up on.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed ticks since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &MetricSnapshot {
        &self.snapshot
    }

    /// Classifier output for the live snapshot.
    pub fn state(&self) -> OperatingState {
        classify::classify(&self.snapshot)
    }

    /// Health evaluator output for the live snapshot.
    pub fn health(&self) -> HealthReport {
        health::evaluate(&self.snapshot)
    }

    /// Advance every channel one step.
    ///
    /// Channels update independently, in [`Channel::ALL`] order, one uniform
    /// draw each: `delta = (r - 0.5) * step_scale`, then clamp to the channel
    /// range. Total over its domain; clamping makes out-of-range deltas
    /// harmless.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        for c in Channel::ALL {
            let spec = self.config.spec(c);
            let r = self.noise.next_unit();
            let delta = (r - 0.5) * spec.step_scale;
            let next = (self.snapshot.get(c) + delta).clamp(spec.min, spec.max);
            self.snapshot.set(c, next);
        }

        self.ticks += 1;
    }
}
