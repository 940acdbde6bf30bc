#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One named numeric metric tracked by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    TokenRate,
    CpuUsage,
    GpuUsage,
    MemoryUsage,
    StorageUsage,
    Temperature,
    PowerDraw,
    NetworkIo,
    DiskIo,
}

impl Channel {
    pub const COUNT: usize = 9;

    /// All channels, in the order the walk advances them each tick.
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::TokenRate,
        Channel::CpuUsage,
        Channel::GpuUsage,
        Channel::MemoryUsage,
        Channel::StorageUsage,
        Channel::Temperature,
        Channel::PowerDraw,
        Channel::NetworkIo,
        Channel::DiskIo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::TokenRate => "token_rate",
            Channel::CpuUsage => "cpu_usage",
            Channel::GpuUsage => "gpu_usage",
            Channel::MemoryUsage => "memory_usage",
            Channel::StorageUsage => "storage_usage",
            Channel::Temperature => "temperature",
            Channel::PowerDraw => "power_draw",
            Channel::NetworkIo => "network_io",
            Channel::DiskIo => "disk_io",
        }
    }

    /// Display unit for dashboards.
    pub fn unit(self) -> &'static str {
        match self {
            Channel::TokenRate => "tok/s",
            Channel::CpuUsage | Channel::GpuUsage => "%",
            Channel::MemoryUsage | Channel::StorageUsage => "%",
            Channel::Temperature => "°C",
            Channel::PowerDraw => "W",
            Channel::NetworkIo | Channel::DiskIo => "MB/s",
        }
    }
}

/// Static walk configuration for one channel.
///
/// The clamp bounds are fixed configuration, not derived from anything the
/// simulator computes. `step_scale` is the full width of one tick's delta:
/// a uniform draw `r` moves the value by `(r - 0.5) * step_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelSpec {
    pub min: f64,
    pub max: f64,
    pub step_scale: f64,
    pub initial: f64,
}

impl ChannelSpec {
    /// Built-in configuration table.
    ///
    /// cpu_usage and temperature bounds match the dashboard's documented
    /// ranges; the rest start mid-range with steps small enough that a
    /// single tick reads as drift, not a jump.
    pub fn default_for(channel: Channel) -> Self {
        match channel {
            Channel::TokenRate => ChannelSpec {
                min: 10.0,
                max: 100.0,
                step_scale: 8.0,
                initial: 45.0,
            },
            Channel::CpuUsage => ChannelSpec {
                min: 30.0,
                max: 95.0,
                step_scale: 6.0,
                initial: 60.0,
            },
            Channel::GpuUsage => ChannelSpec {
                min: 20.0,
                max: 98.0,
                step_scale: 7.0,
                initial: 55.0,
            },
            Channel::MemoryUsage => ChannelSpec {
                min: 40.0,
                max: 92.0,
                step_scale: 3.0,
                initial: 65.0,
            },
            Channel::StorageUsage => ChannelSpec {
                min: 50.0,
                max: 85.0,
                step_scale: 0.5,
                initial: 62.0,
            },
            Channel::Temperature => ChannelSpec {
                min: 65.0,
                max: 85.0,
                step_scale: 2.0,
                initial: 72.0,
            },
            Channel::PowerDraw => ChannelSpec {
                min: 250.0,
                max: 400.0,
                step_scale: 12.0,
                initial: 320.0,
            },
            Channel::NetworkIo => ChannelSpec {
                min: 5.0,
                max: 80.0,
                step_scale: 6.0,
                initial: 30.0,
            },
            Channel::DiskIo => ChannelSpec {
                min: 2.0,
                max: 60.0,
                step_scale: 4.0,
                initial: 18.0,
            },
        }
    }

    /// Reject malformed configuration before the walk ever runs.
    /// The walk itself is total; this is the only failure point.
    pub fn validate(&self, channel: Channel) -> Result<(), ChannelConfigError> {
        for (field, value) in [
            ("min", self.min),
            ("max", self.max),
            ("step_scale", self.step_scale),
            ("initial", self.initial),
        ] {
            if !value.is_finite() {
                return Err(ChannelConfigError::NonFinite {
                    channel,
                    field,
                    value,
                });
            }
        }
        if self.min > self.max {
            return Err(ChannelConfigError::InvertedRange {
                channel,
                min: self.min,
                max: self.max,
            });
        }
        if self.step_scale < 0.0 {
            return Err(ChannelConfigError::NegativeStep {
                channel,
                step_scale: self.step_scale,
            });
        }
        if self.initial < self.min || self.initial > self.max {
            return Err(ChannelConfigError::InitialOutOfRange {
                channel,
                initial: self.initial,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelConfigError {
    InvertedRange {
        channel: Channel,
        min: f64,
        max: f64,
    },
    NonFinite {
        channel: Channel,
        field: &'static str,
        value: f64,
    },
    NegativeStep {
        channel: Channel,
        step_scale: f64,
    },
    InitialOutOfRange {
        channel: Channel,
        initial: f64,
        min: f64,
        max: f64,
    },
}

impl core::fmt::Display for ChannelConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelConfigError::InvertedRange { channel, min, max } => write!(
                f,
                "{}: min {} exceeds max {}",
                channel.name(),
                min,
                max
            ),
            ChannelConfigError::NonFinite {
                channel,
                field,
                value,
            } => write!(f, "{}: {} is not finite ({})", channel.name(), field, value),
            ChannelConfigError::NegativeStep {
                channel,
                step_scale,
            } => write!(f, "{}: negative step_scale {}", channel.name(), step_scale),
            ChannelConfigError::InitialOutOfRange {
                channel,
                initial,
                min,
                max,
            } => write!(
                f,
                "{}: initial {} outside [{}, {}]",
                channel.name(),
                initial,
                min,
                max
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        for c in Channel::ALL {
            ChannelSpec::default_for(c).validate(c).unwrap();
        }
    }

    #[test]
    fn channel_names_are_unique() {
        for (i, a) in Channel::ALL.iter().enumerate() {
            for b in Channel::ALL.iter().skip(i + 1) {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn inverted_range_rejected() {
        let spec = ChannelSpec {
            min: 95.0,
            max: 30.0,
            step_scale: 6.0,
            initial: 60.0,
        };
        assert!(matches!(
            spec.validate(Channel::CpuUsage),
            Err(ChannelConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn non_finite_bound_rejected() {
        let spec = ChannelSpec {
            min: f64::NAN,
            max: 95.0,
            step_scale: 6.0,
            initial: 60.0,
        };
        assert!(matches!(
            spec.validate(Channel::CpuUsage),
            Err(ChannelConfigError::NonFinite { field: "min", .. })
        ));
    }

    #[test]
    fn negative_step_rejected() {
        let spec = ChannelSpec {
            min: 30.0,
            max: 95.0,
            step_scale: -1.0,
            initial: 60.0,
        };
        assert!(matches!(
            spec.validate(Channel::CpuUsage),
            Err(ChannelConfigError::NegativeStep { .. })
        ));
    }

    #[test]
    fn initial_outside_bounds_rejected() {
        let spec = ChannelSpec {
            min: 30.0,
            max: 95.0,
            step_scale: 6.0,
            initial: 20.0,
        };
        assert!(matches!(
            spec.validate(Channel::CpuUsage),
            Err(ChannelConfigError::InitialOutOfRange { .. })
        ));
    }

    #[test]
    fn zero_step_is_allowed() {
        // A frozen channel is odd but well-formed; the walk degenerates to a constant.
        let spec = ChannelSpec {
            min: 30.0,
            max: 95.0,
            step_scale: 0.0,
            initial: 60.0,
        };
        spec.validate(Channel::CpuUsage).unwrap();
    }
}
