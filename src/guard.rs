// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scoped-acquisition guards.
//!
//! Every guard releases what it holds in `Drop`, so a lock is given back on
//! every exit path of the owning scope: normal return, early return, `?`
//! propagation and unwinding alike.

use crate::Mutex;
use crate::lock::ReadersWriters;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::Ordering;

/// Exclusive access to the data of a [`Mutex`].
///
/// ```
/// use readers_writers::Mutex;
///
/// let mutex = Mutex::new(String::from("readers"));
/// let mut guard = mutex.lock_sync();
/// guard.push_str("-writers");
/// assert_eq!(&*guard, "readers-writers");
/// ```
pub struct MutexGuard<'a, T> {
    pub(crate) mutex: &'a Mutex<T>,
    pub(crate) data: &'a mut T,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.data
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.data
    }
}

impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        self.mutex.data_lock.store(false, Ordering::Release);
        self.mutex.did_unlock();
    }
}

impl<T: fmt::Debug> fmt::Debug for MutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexGuard")
            .field("data", &**self)
            .finish_non_exhaustive()
    }
}

// ================================================================================================
// ReadersWriters guards
// ================================================================================================

/// Shared access to the resource of a [`ReadersWriters`] lock.
///
/// Created by [`ReadersWriters::read`] and [`ReadersWriters::try_read`].
/// Dropping it performs `end_read`: when the last reader leaves, one waiting
/// writer is woken.
///
/// ```
/// use readers_writers::ReadersWriters;
///
/// let rw = ReadersWriters::with_resource(vec![1, 2, 3]);
/// {
///     let first = rw.read();
///     let second = rw.read();
///     assert_eq!(first.len(), second.len());
///     assert_eq!(rw.state().active_readers, 2);
/// }
/// assert_eq!(rw.state().active_readers, 0);
/// ```
#[must_use = "dropping the guard immediately releases the read lock"]
pub struct ReadGuard<'a, T> {
    pub(crate) lock: &'a ReadersWriters<T>,
}

/// Exclusive access to the resource of a [`ReadersWriters`] lock.
///
/// Created by [`ReadersWriters::write`] and [`ReadersWriters::try_write`].
/// Dropping it performs `end_write`: a waiting writer is preferred, otherwise
/// all waiting readers are released together.
///
/// ```
/// use readers_writers::ReadersWriters;
///
/// let rw = ReadersWriters::new();
/// {
///     let mut value = rw.write();
///     *value = 7;
///     assert!(rw.state().is_writing);
/// }
/// assert_eq!(*rw.read(), 7);
/// ```
#[must_use = "dropping the guard immediately releases the write lock"]
pub struct WriteGuard<'a, T> {
    pub(crate) lock: &'a ReadersWriters<T>,
}

impl<T> Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: a live read guard keeps `is_writing` false, so nobody mutates.
        unsafe { &*self.lock.resource.get() }
    }
}

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: a live write guard is the only accessor.
        unsafe { &*self.lock.resource.get() }
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: a live write guard is the only accessor.
        unsafe { &mut *self.lock.resource.get() }
    }
}

impl<T> Drop for ReadGuard<'_, T> {
    fn drop(&mut self) {
        // SAFETY: this guard was produced by exactly one successful read acquisition.
        unsafe { self.lock.end_read() }
    }
}

impl<T> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        // SAFETY: this guard was produced by exactly one successful write acquisition.
        unsafe { self.lock.end_write() }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadGuard").field("resource", &**self).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for WriteGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteGuard").field("resource", &**self).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ReadGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: fmt::Display> fmt::Display for WriteGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T> AsRef<T> for ReadGuard<'_, T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> AsRef<T> for WriteGuard<'_, T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> AsMut<T> for WriteGuard<'_, T> {
    fn as_mut(&mut self) -> &mut T {
        self
    }
}
