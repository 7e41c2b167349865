// SPDX-License-Identifier: MIT OR Apache-2.0
use super::{Condvar, Waiter};
use crate::guard::MutexGuard;
use std::thread;

impl Condvar {
    /// Releases the mutex, parks until notified, then re-acquires the mutex.
    ///
    /// On `wasm32` this requires `Atomics.wait`; prefer [`wait_sync`](Self::wait_sync).
    pub fn wait_block<'a, T>(&self, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        let mutex = guard.mutex;
        let waiter = Waiter::parking();
        self.enqueue(&waiter);
        drop(guard);

        // park() may return early; only our own notification ends the wait
        while !waiter.is_notified() {
            thread::park();
        }
        mutex.lock_sync()
    }

    /// Releases the mutex, spins until notified, then re-acquires the mutex.
    pub fn wait_spin<'a, T>(&self, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        let mutex = guard.mutex;
        let waiter = Waiter::spinning();
        self.enqueue(&waiter);
        drop(guard);

        while !waiter.is_notified() {
            std::hint::spin_loop();
        }
        mutex.lock_sync()
    }

    /// Waits once for a notification using the best strategy the platform allows.
    ///
    /// The state may have changed again by the time this returns; call it in a
    /// loop over the condition, or use [`wait_sync_while`](Self::wait_sync_while).
    pub fn wait_sync<'a, T>(&self, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        if crate::platform::can_block() {
            self.wait_block(guard)
        } else {
            self.wait_spin(guard)
        }
    }

    /// Waits as long as `condition` returns `true`.
    ///
    /// The condition is checked before the first wait and again after every
    /// wake, always with the mutex held.
    pub fn wait_sync_while<'a, T, F>(
        &self,
        mut guard: MutexGuard<'a, T>,
        mut condition: F,
    ) -> MutexGuard<'a, T>
    where
        F: FnMut(&mut T) -> bool,
    {
        while condition(&mut guard) {
            guard = self.wait_sync(guard);
        }
        guard
    }
}
