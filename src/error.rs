// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types.
//!
//! The blocking operations of this crate never fail: they wait until they
//! succeed. Errors only come from the non-blocking `try_*` variants and from
//! validating demo configuration.

use thiserror::Error;

/// Error returned when a lock cannot be acquired without waiting.
///
/// Returned by [`Mutex::try_lock`](crate::Mutex::try_lock),
/// [`ReadersWriters::try_read`](crate::ReadersWriters::try_read) and
/// [`ReadersWriters::try_write`](crate::ReadersWriters::try_write).
///
/// # Examples
///
/// ```
/// use readers_writers::{NotAvailable, ReadersWriters};
///
/// let rw = ReadersWriters::new();
/// let _writer = rw.write();
/// assert!(matches!(rw.try_read(), Err(NotAvailable)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("lock not available")]
pub struct NotAvailable;

/// Invalid configuration for a demonstration run or a random generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The inclusive range `[min, max]` contains no values.
    #[error("empty range: min {min} is greater than max {max}")]
    EmptyRange { min: u64, max: u64 },
    /// A demo was configured without any reader or writer threads.
    #[error("at least one reader or writer thread is required")]
    NoThreads,
}
