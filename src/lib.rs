// SPDX-License-Identifier: MIT OR Apache-2.0
//! A writer-preferring readers-writers lock.
//!
//! [`ReadersWriters`] lets any number of readers share a resource, or one
//! writer own it, and never both. A writer that is waiting keeps newly
//! arriving readers out, so a steady stream of reads cannot starve writes.
//!
//! ```
//! use readers_writers::ReadersWriters;
//!
//! let rw = ReadersWriters::new();
//! *rw.write() = 42;
//!
//! let a = rw.read();
//! let b = rw.read();
//! assert_eq!((*a, *b), (42, 42));
//! ```
//!
//! The lock is assembled from smaller primitives that are public in their own
//! right:
//!
//! - [`Mutex`]: protects the lock's counters
//! - [`condvar::Condvar`]: parks readers and writers until they may enter
//! - [`spinlock::Spinlock`]: guards the waiter lists of the two above
//!
//! Each of them picks a waiting strategy for the platform: thread parking on
//! native targets; on `wasm32`, parking where `Atomics.wait` is available and
//! spinning elsewhere (such as the browser main thread).
//!
//! Collaborators are passed in explicitly: a [`logger::Logger`] for the
//! traced accesses and, off `wasm32`, a `random::RandomGenerator` for the
//! threaded drivers in `demo`.

pub mod condvar;
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod demo;
mod error;
mod guard;
pub mod lock;
pub mod logger;
mod mutex;
mod platform;
#[cfg(not(target_arch = "wasm32"))]
pub mod random;
pub mod spinlock;

#[cfg(test)]
mod sync_tests;

pub use config::AccessTiming;
pub use error::{ConfigError, NotAvailable};
pub use guard::{MutexGuard, ReadGuard, WriteGuard};
pub use lock::{LockState, ReadersWriters};
pub use mutex::Mutex;
pub use platform::pause;
