// SPDX-License-Identifier: MIT OR Apache-2.0
//! The mutex guarding a [`ReadersWriters`](crate::ReadersWriters) lock state.

use crate::error::NotAvailable;
use crate::guard::MutexGuard;
use crate::spinlock::Spinlock;
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

mod block;
mod spin;

/// A mutual exclusion primitive with a selectable waiting strategy.
///
/// - **`try_lock`**: one attempt, never waits
/// - **`lock_spin`**: busy-waits until the lock is free
/// - **`lock_block`**: parks the thread until the holder releases
/// - **`lock_sync`**: parks where the platform allows it, otherwise spins
///
/// # Examples
///
/// ```
/// use readers_writers::Mutex;
///
/// let mutex = Mutex::new(0u32);
/// {
///     let mut guard = mutex.lock_sync();
///     *guard += 1;
/// }
/// assert_eq!(mutex.with_sync(|n| *n), 1);
/// ```
#[derive(Debug, Default)]
pub struct Mutex<T> {
    pub(crate) inner: UnsafeCell<T>,
    pub(crate) data_lock: AtomicBool,
    pub(crate) parked_lockers: Spinlock<Vec<thread::Thread>>,
}

unsafe impl<T: Send> Send for Mutex<T> {}
unsafe impl<T: Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
    /// Creates an unlocked mutex holding `value`.
    pub const fn new(value: T) -> Mutex<T> {
        Mutex {
            inner: UnsafeCell::new(value),
            data_lock: AtomicBool::new(false),
            parked_lockers: Spinlock::new(Vec::new()),
        }
    }

    /// Attempts to acquire the lock without waiting.
    ///
    /// ```
    /// use readers_writers::{Mutex, NotAvailable};
    ///
    /// let mutex = Mutex::new("state");
    /// let _held = mutex.lock_sync();
    /// assert!(matches!(mutex.try_lock(), Err(NotAvailable)));
    /// ```
    pub fn try_lock(&self) -> Result<MutexGuard<'_, T>, NotAvailable> {
        if self
            .data_lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            // SAFETY: the flag grants exclusive access until the guard drops.
            let data = unsafe { &mut *self.inner.get() };
            Ok(MutexGuard { mutex: self, data })
        } else {
            Err(NotAvailable)
        }
    }

    /// Acquires the lock by spinning.
    pub fn lock_spin(&self) -> MutexGuard<'_, T> {
        spin::lock_spin(self)
    }

    /// Acquires the lock by parking the current thread while it is held.
    ///
    /// On `wasm32` this requires `Atomics.wait`; prefer [`lock_sync`](Self::lock_sync).
    pub fn lock_block(&self) -> MutexGuard<'_, T> {
        block::lock_block(self)
    }

    /// Acquires the lock with the best strategy the platform allows.
    pub fn lock_sync(&self) -> MutexGuard<'_, T> {
        if crate::platform::can_block() {
            self.lock_block()
        } else {
            self.lock_spin()
        }
    }

    /// Runs `f` with shared access to the data under the lock.
    pub fn with_sync<R, F: FnOnce(&T) -> R>(&self, f: F) -> R {
        let guard = self.lock_sync();
        f(&guard)
    }

    /// Runs `f` with exclusive access to the data under the lock.
    pub fn with_mut_sync<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let mut guard = self.lock_sync();
        f(&mut guard)
    }

    /// Consumes the mutex and returns the data.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }

    /// Wakes every thread parked in [`lock_block`](Self::lock_block); they race to retry.
    pub(crate) fn did_unlock(&self) {
        let parked = self.parked_lockers.with_mut(std::mem::take);
        for thread in parked {
            thread.unpark();
        }
    }
}

impl<T> From<T> for Mutex<T> {
    fn from(value: T) -> Self {
        Mutex::new(value)
    }
}
