// SPDX-License-Identifier: MIT OR Apache-2.0
//! A readers-writers lock that prefers writers.
//!
//! # The problem
//!
//! Plenty of shared data is read far more often than it is written. A plain
//! mutex serializes the readers for no reason; a naive readers-writers lock
//! lets them overlap but can starve writers: as long as at least one reader is
//! inside, new readers keep getting in and a writer waits forever.
//!
//! # The policy
//!
//! [`ReadersWriters`] admits any number of readers or exactly one writer, and
//! a writer that has started waiting closes the door to *newly arriving*
//! readers. Readers already inside finish normally; the last one to leave
//! hands the lock to a waiting writer. When a writer finishes it hands the
//! lock to the next waiting writer if there is one, and otherwise releases
//! every waiting reader at once.
//!
//! Within a class there is no ordering: which of several waiting writers goes
//! next is unspecified, and released readers enter together.
//!
//! # Structure
//!
//! One [`Mutex`](crate::Mutex) protects a [`LockState`] of four counters. Two
//! [`Condvar`](crate::condvar::Condvar)s share that mutex: `read_ready` is
//! broadcast, `write_ready` is signalled one waiter at a time. Every wait
//! re-checks its predicate after waking.
//!
//! # Examples
//!
//! ```
//! # if cfg!(target_arch = "wasm32") { return; }
//! use readers_writers::ReadersWriters;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let rw = Arc::new(ReadersWriters::with_resource(Vec::<u32>::new()));
//!
//! let writers: Vec<_> = (0..4)
//!     .map(|id| {
//!         let rw = Arc::clone(&rw);
//!         thread::spawn(move || rw.write().push(id))
//!     })
//!     .collect();
//! for writer in writers {
//!     writer.join().unwrap();
//! }
//!
//! let mut seen = rw.read().clone();
//! seen.sort();
//! assert_eq!(seen, vec![0, 1, 2, 3]);
//! assert!(rw.state().is_idle());
//! ```
//!
//! ## Manual acquisition
//!
//! The guard-returning methods are the normal interface. The raw operations
//! exist for callers that need to split acquisition and release across
//! scopes; the release half is `unsafe` because a release without a matching
//! acquisition would admit a writer next to a live reader.
//!
//! ```
//! use readers_writers::ReadersWriters;
//!
//! let rw = ReadersWriters::new();
//! rw.start_write();
//! assert!(rw.state().is_writing);
//! // SAFETY: paired with the start_write above.
//! unsafe { rw.end_write() };
//! assert!(rw.state().is_idle());
//! ```

mod inner;
mod read;
mod state;
mod write;


pub use inner::ReadersWriters;
pub use state::LockState;
