// SPDX-License-Identifier: MIT OR Apache-2.0
//! A condition variable paired with this crate's [`Mutex`](crate::Mutex).
//!
//! Each wait enqueues its own one-shot waiter entry *before* the mutex is
//! released. A notification always consumes an entry, and a wait only returns
//! once its entry has been consumed, so no notification is lost between
//! "decide to wait" and "start waiting", and stale entries never pile up.
//!
//! Callers must still loop on their predicate: by the time a woken thread has
//! re-acquired the mutex, another thread may already have changed the state.
//!
//! ```
//! # if cfg!(target_arch = "wasm32") { return; }
//! use readers_writers::{Mutex, condvar::Condvar};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let pair = Arc::new((Mutex::new(false), Condvar::new()));
//! let signaller = Arc::clone(&pair);
//! thread::spawn(move || {
//!     let (ready, cv) = &*signaller;
//!     *ready.lock_sync() = true;
//!     cv.notify_all();
//! });
//!
//! let (ready, cv) = &*pair;
//! let guard = cv.wait_sync_while(ready.lock_sync(), |ready| !*ready);
//! assert!(*guard);
//! ```

use crate::spinlock::Spinlock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

mod notify;
mod wait;

#[cfg(test)]
mod tests;

/// One registered wait.
#[derive(Debug)]
struct Waiter {
    notified: AtomicBool,
    /// `None` for spinning waiters, which poll `notified` instead of parking.
    thread: Option<thread::Thread>,
}

impl Waiter {
    fn parking() -> Arc<Waiter> {
        Arc::new(Waiter {
            notified: AtomicBool::new(false),
            thread: Some(thread::current()),
        })
    }

    fn spinning() -> Arc<Waiter> {
        Arc::new(Waiter {
            notified: AtomicBool::new(false),
            thread: None,
        })
    }

    fn is_notified(&self) -> bool {
        self.notified.load(Ordering::Acquire)
    }

    fn wake(&self) {
        self.notified.store(true, Ordering::Release);
        if let Some(thread) = &self.thread {
            thread.unpark();
        }
    }
}

/// A condition variable whose waits park or spin depending on the platform.
#[derive(Debug, Default)]
pub struct Condvar {
    waiters: Spinlock<Vec<Arc<Waiter>>>,
}

impl Condvar {
    /// Creates a condition variable with no waiters.
    pub const fn new() -> Self {
        Condvar {
            waiters: Spinlock::new(Vec::new()),
        }
    }

    /// Number of threads currently registered as waiting.
    pub fn waiter_count(&self) -> usize {
        self.waiters.with_mut(|waiters| waiters.len())
    }

    fn enqueue(&self, waiter: &Arc<Waiter>) {
        self.waiters.with_mut(|waiters| waiters.push(Arc::clone(waiter)));
    }
}
