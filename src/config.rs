// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tunables for simulated resource access and for the demonstration drivers.
//!
//! The lock itself has nothing to configure. [`AccessTiming`] only controls how
//! long [`read_resource`](crate::ReadersWriters::read_resource) and
//! [`write_resource`](crate::ReadersWriters::write_resource) hold the lock.

use crate::error::ConfigError;
use std::time::Duration;

/// How long the simulated accesses hold the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessTiming {
    /// Hold time of [`read_resource`](crate::ReadersWriters::read_resource).
    pub read_hold: Duration,
    /// Hold time of [`write_resource`](crate::ReadersWriters::write_resource).
    pub write_hold: Duration,
}

impl AccessTiming {
    /// Read hold of [`AccessTiming::default`].
    pub const DEFAULT_READ_HOLD: Duration = Duration::from_millis(100);
    /// Write hold of [`AccessTiming::default`].
    pub const DEFAULT_WRITE_HOLD: Duration = Duration::from_millis(200);

    /// No hold at all; accesses release as soon as they have logged.
    pub const fn immediate() -> Self {
        AccessTiming {
            read_hold: Duration::ZERO,
            write_hold: Duration::ZERO,
        }
    }

    /// Explicit hold times for reads and writes.
    pub const fn new(read_hold: Duration, write_hold: Duration) -> Self {
        AccessTiming {
            read_hold,
            write_hold,
        }
    }
}

impl Default for AccessTiming {
    fn default() -> Self {
        AccessTiming::new(Self::DEFAULT_READ_HOLD, Self::DEFAULT_WRITE_HOLD)
    }
}

/// Settings for [`run_classic`](crate::demo::run_classic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub readers: usize,
    pub writers: usize,
    /// Inclusive bounds on how many operations each thread performs.
    pub min_operations: u64,
    pub max_operations: u64,
    /// Pause between two reads of the same reader.
    pub read_pause: Duration,
    /// Pause between two writes of the same writer.
    pub write_pause: Duration,
    pub timing: AccessTiming,
}

impl DemoConfig {
    /// Checks that the run has threads and a non-empty operation range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.readers == 0 && self.writers == 0 {
            return Err(ConfigError::NoThreads);
        }
        check_range(self.min_operations, self.max_operations)
    }

    /// The larger run: two readers against five writers, 3..=15 operations each.
    pub fn contended() -> Self {
        DemoConfig {
            readers: 2,
            writers: 5,
            min_operations: 3,
            max_operations: 15,
            ..DemoConfig::default()
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            readers: 3,
            writers: 2,
            min_operations: 2,
            max_operations: 5,
            read_pause: Duration::from_millis(50),
            write_pause: Duration::from_millis(100),
            timing: AccessTiming::default(),
        }
    }
}

/// Settings for [`run_database_demo`](crate::demo::run_database_demo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseDemoConfig {
    pub readers: usize,
    pub writers: usize,
    pub initial_records: usize,
    pub min_operations: u64,
    pub max_operations: u64,
    /// Time given to the workers to come up before the start signal.
    pub settle: Duration,
    /// Time between the start and the finish signal.
    pub run_time: Duration,
    /// A worker sleeps `random / divisor` seconds between operations.
    pub writer_pause_divisor: u32,
    pub reader_pause_divisor: u32,
    pub timing: AccessTiming,
}

impl DatabaseDemoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.readers == 0 && self.writers == 0 {
            return Err(ConfigError::NoThreads);
        }
        check_range(self.min_operations, self.max_operations)
    }
}

impl Default for DatabaseDemoConfig {
    fn default() -> Self {
        DatabaseDemoConfig {
            readers: 8,
            writers: 3,
            initial_records: 5,
            min_operations: 3,
            max_operations: 10,
            settle: Duration::from_millis(500),
            run_time: Duration::from_secs(3),
            writer_pause_divisor: 20,
            reader_pause_divisor: 30,
            timing: AccessTiming::default(),
        }
    }
}

pub(crate) fn check_range(min: u64, max: u64) -> Result<(), ConfigError> {
    if min > max {
        Err(ConfigError::EmptyRange { min, max })
    } else {
        Ok(())
    }
}
