// SPDX-License-Identifier: MIT OR Apache-2.0
/// The bookkeeping of a [`ReadersWriters`](crate::ReadersWriters) lock.
///
/// Only ever mutated with the lock's internal mutex held. A value obtained
/// from [`ReadersWriters::state`](crate::ReadersWriters::state) is a snapshot
/// and may be stale as soon as it is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LockState {
    /// Readers inside a read critical section.
    pub active_readers: usize,
    /// Readers blocked in `start_read`.
    pub waiting_readers: usize,
    /// Whether a writer holds exclusive access.
    pub is_writing: bool,
    /// Writers blocked in `start_write`.
    pub waiting_writers: usize,
}

impl LockState {
    /// A reader must wait while a writer is active or queued.
    ///
    /// Checking `waiting_writers` is what gives writers preference: a reader
    /// arriving behind a queued writer does not overtake it.
    pub(crate) fn reader_must_wait(&self) -> bool {
        self.is_writing || self.waiting_writers > 0
    }

    /// A writer must wait while anyone holds the lock.
    pub(crate) fn writer_must_wait(&self) -> bool {
        self.is_writing || self.active_readers > 0
    }

    /// No holder and no waiter.
    pub fn is_idle(&self) -> bool {
        *self == LockState::default()
    }

    pub(crate) fn debug_check(&self) {
        debug_assert!(
            !(self.is_writing && self.active_readers > 0),
            "writer active alongside {} readers",
            self.active_readers
        );
    }
}
