// SPDX-License-Identifier: MIT OR Apache-2.0
use super::inner::ReadersWriters;
use crate::error::NotAvailable;
use crate::guard::ReadGuard;
use crate::logger::{LogLevel, Logger, thread_label};
use crate::platform::pause;
use std::fmt::Display;

impl<T> ReadersWriters<T> {
    /// Enters the read side, blocking while a writer is active or waiting.
    ///
    /// Every successful call must be matched by exactly one
    /// [`end_read`](Self::end_read). Prefer [`read`](Self::read), which
    /// returns a guard that does the matching for you.
    pub fn start_read(&self) {
        let mut state = self.state.lock_sync();
        state.waiting_readers += 1;
        if state.reader_must_wait() {
            tracing::debug!(
                is_writing = state.is_writing,
                waiting_writers = state.waiting_writers,
                "reader parked behind writer"
            );
        }
        let mut state = self
            .read_ready
            .wait_sync_while(state, |state| state.reader_must_wait());
        state.waiting_readers -= 1;
        state.active_readers += 1;
        state.debug_check();
    }

    /// Leaves the read side. The last reader out wakes one waiting writer.
    ///
    /// # Safety
    ///
    /// Must pair with an earlier [`start_read`](Self::start_read) that has not
    /// been released yet. An unmatched release corrupts the counters and can
    /// admit a writer while a [`ReadGuard`] is still alive.
    pub unsafe fn end_read(&self) {
        let mut state = self.state.lock_sync();
        debug_assert!(
            state.active_readers > 0,
            "end_read without a matching start_read"
        );
        state.active_readers -= 1;
        if state.active_readers == 0 {
            self.write_ready.notify_one();
        }
    }

    /// Acquires shared access, blocking like [`start_read`](Self::start_read).
    ///
    /// ```
    /// use readers_writers::ReadersWriters;
    ///
    /// let rw = ReadersWriters::with_resource(String::from("shared"));
    /// let a = rw.read();
    /// let b = rw.read();
    /// assert_eq!(*a, *b);
    /// ```
    pub fn read(&self) -> ReadGuard<'_, T> {
        self.start_read();
        ReadGuard { lock: self }
    }

    /// Acquires shared access only if that needs no waiting.
    ///
    /// Fails while a writer is active *or queued*, matching the admission rule
    /// of [`start_read`](Self::start_read).
    pub fn try_read(&self) -> Result<ReadGuard<'_, T>, NotAvailable> {
        let mut state = self.state.lock_sync();
        if state.reader_must_wait() {
            return Err(NotAvailable);
        }
        state.active_readers += 1;
        Ok(ReadGuard { lock: self })
    }

    /// Runs `f` with shared access to the resource.
    pub fn with_read<R, F: FnOnce(&T) -> R>(&self, f: F) -> R {
        let guard = self.read();
        f(&guard)
    }

    /// Reads the resource under a scoped read lock.
    ///
    /// Logs the current value at INFO, then keeps the lock for
    /// [`AccessTiming::read_hold`](crate::AccessTiming::read_hold) to stand in
    /// for a slow read. The lock is released when this returns or unwinds.
    pub fn read_resource<L>(&self, logger: &L)
    where
        T: Display,
        L: Logger + ?Sized,
    {
        let resource = self.read();
        logger.log(
            LogLevel::Info,
            &format!("Thread {} reading resource: {}", thread_label(), *resource),
        );
        pause(self.timing.read_hold);
    }
}
