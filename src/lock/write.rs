// SPDX-License-Identifier: MIT OR Apache-2.0
use super::inner::ReadersWriters;
use crate::error::NotAvailable;
use crate::guard::WriteGuard;
use crate::logger::{LogLevel, Logger, thread_label};
use crate::platform::pause;
use std::fmt::Display;

impl<T> ReadersWriters<T> {
    /// Enters the write side, blocking while a writer or any reader is active.
    ///
    /// From the moment this is called, newly arriving readers queue behind it.
    /// Every successful call must be matched by exactly one
    /// [`end_write`](Self::end_write); prefer [`write`](Self::write).
    pub fn start_write(&self) {
        let mut state = self.state.lock_sync();
        state.waiting_writers += 1;
        if state.writer_must_wait() {
            tracing::debug!(
                is_writing = state.is_writing,
                active_readers = state.active_readers,
                "writer parked"
            );
        }
        let mut state = self
            .write_ready
            .wait_sync_while(state, |state| state.writer_must_wait());
        state.waiting_writers -= 1;
        state.is_writing = true;
        state.debug_check();
    }

    /// Leaves the write side.
    ///
    /// Hands over to one waiting writer if there is any; otherwise releases
    /// all waiting readers together.
    ///
    /// # Safety
    ///
    /// Must pair with an earlier [`start_write`](Self::start_write) that has
    /// not been released yet. An unmatched release can admit readers or a
    /// second writer while a [`WriteGuard`] is still alive.
    pub unsafe fn end_write(&self) {
        let mut state = self.state.lock_sync();
        debug_assert!(state.is_writing, "end_write without a matching start_write");
        state.is_writing = false;
        if state.waiting_writers > 0 {
            self.write_ready.notify_one();
        } else {
            self.read_ready.notify_all();
        }
    }

    /// Acquires exclusive access, blocking like [`start_write`](Self::start_write).
    pub fn write(&self) -> WriteGuard<'_, T> {
        self.start_write();
        WriteGuard { lock: self }
    }

    /// Acquires exclusive access only if nobody holds the lock right now.
    ///
    /// ```
    /// use readers_writers::{NotAvailable, ReadersWriters};
    ///
    /// let rw = ReadersWriters::new();
    /// let reader = rw.read();
    /// assert_eq!(rw.try_write().err(), Some(NotAvailable));
    /// drop(reader);
    /// assert!(rw.try_write().is_ok());
    /// ```
    pub fn try_write(&self) -> Result<WriteGuard<'_, T>, NotAvailable> {
        let mut state = self.state.lock_sync();
        if state.writer_must_wait() {
            return Err(NotAvailable);
        }
        state.is_writing = true;
        Ok(WriteGuard { lock: self })
    }

    /// Runs `f` with exclusive access to the resource.
    pub fn with_write<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let mut guard = self.write();
        f(&mut guard)
    }

    /// Replaces the resource under a scoped write lock.
    ///
    /// Stores `value`, logs it at INFO, then keeps the lock for
    /// [`AccessTiming::write_hold`](crate::AccessTiming::write_hold) to stand
    /// in for a slow write. The lock is released when this returns or unwinds.
    ///
    /// ```
    /// use readers_writers::{AccessTiming, ReadersWriters};
    /// use readers_writers::logger::MemoryLogger;
    ///
    /// let rw = ReadersWriters::with_timing(0, AccessTiming::immediate());
    /// let logger = MemoryLogger::new();
    /// rw.write_resource(42, &logger);
    /// assert_eq!(*rw.read(), 42);
    /// assert!(logger.contains("wrote resource: 42"));
    /// ```
    pub fn write_resource<L>(&self, value: T, logger: &L)
    where
        T: Display,
        L: Logger + ?Sized,
    {
        let mut resource = self.write();
        *resource = value;
        logger.log(
            LogLevel::Info,
            &format!("Thread {} wrote resource: {}", thread_label(), *resource),
        );
        pause(self.timing.write_hold);
    }
}
