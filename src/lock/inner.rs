// SPDX-License-Identifier: MIT OR Apache-2.0
use super::LockState;
use crate::Mutex;
use crate::condvar::Condvar;
use crate::config::AccessTiming;
use std::cell::UnsafeCell;
use std::fmt;

/// A writer-preferring readers-writers lock around a resource of type `T`.
///
/// See the [module documentation](crate::lock) for the admission policy.
///
/// | Operation | Blocks while | Then |
/// |---|---|---|
/// | [`start_read`](Self::start_read) | a writer is active or waiting | `active_readers += 1` |
/// | [`end_read`](Self::end_read) | never | last reader wakes one writer |
/// | [`start_write`](Self::start_write) | a writer or any reader is active | `is_writing = true` |
/// | [`end_write`](Self::end_write) | never | wakes a writer, else all readers |
///
/// The resource defaults to an `i64` starting at zero.
pub struct ReadersWriters<T = i64> {
    pub(crate) state: Mutex<LockState>,
    pub(crate) read_ready: Condvar,
    pub(crate) write_ready: Condvar,
    pub(crate) resource: UnsafeCell<T>,
    pub(crate) timing: AccessTiming,
}

// The resource is only reached through guards, and the counters guarantee a
// write guard never coexists with another guard.
unsafe impl<T: Send> Send for ReadersWriters<T> {}
unsafe impl<T: Send + Sync> Sync for ReadersWriters<T> {}

impl ReadersWriters {
    /// Creates an unlocked instance guarding the integer `0`.
    ///
    /// ```
    /// use readers_writers::ReadersWriters;
    ///
    /// let rw = ReadersWriters::new();
    /// assert!(rw.state().is_idle());
    /// assert_eq!(*rw.read(), 0);
    /// ```
    pub fn new() -> Self {
        ReadersWriters::with_resource(0)
    }
}

impl<T> ReadersWriters<T> {
    /// Creates an unlocked instance guarding `resource`, with the default
    /// [`AccessTiming`].
    pub fn with_resource(resource: T) -> Self {
        ReadersWriters::with_timing(resource, AccessTiming::default())
    }

    /// Creates an unlocked instance whose simulated accesses hold the lock
    /// for the given times.
    pub fn with_timing(resource: T, timing: AccessTiming) -> Self {
        ReadersWriters {
            state: Mutex::new(LockState::default()),
            read_ready: Condvar::new(),
            write_ready: Condvar::new(),
            resource: UnsafeCell::new(resource),
            timing,
        }
    }

    /// A snapshot of the counters.
    pub fn state(&self) -> LockState {
        *self.state.lock_sync()
    }

    /// How long [`read_resource`](Self::read_resource) and
    /// [`write_resource`](Self::write_resource) hold the lock.
    ///
    /// ```
    /// use readers_writers::{AccessTiming, ReadersWriters};
    ///
    /// assert_eq!(ReadersWriters::new().timing(), AccessTiming::default());
    /// let rw = ReadersWriters::with_timing(0, AccessTiming::immediate());
    /// assert!(rw.timing().write_hold.is_zero());
    /// ```
    pub fn timing(&self) -> AccessTiming {
        self.timing
    }

    /// Direct access to the resource; `&mut self` proves nobody holds the lock.
    pub fn get_mut(&mut self) -> &mut T {
        self.resource.get_mut()
    }

    /// Consumes the lock and returns the resource.
    ///
    /// ```
    /// use readers_writers::ReadersWriters;
    ///
    /// let rw = ReadersWriters::with_resource(vec![1]);
    /// rw.write().push(2);
    /// assert_eq!(rw.into_inner(), [1, 2]);
    /// ```
    pub fn into_inner(self) -> T {
        self.resource.into_inner()
    }
}

impl<T: Default> Default for ReadersWriters<T> {
    fn default() -> Self {
        ReadersWriters::with_resource(T::default())
    }
}

impl<T> From<T> for ReadersWriters<T> {
    fn from(resource: T) -> Self {
        ReadersWriters::with_resource(resource)
    }
}

impl<T> fmt::Debug for ReadersWriters<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadersWriters")
            .field("state", &self.state())
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}
