// SPDX-License-Identifier: MIT OR Apache-2.0
//! A tiny spinlock for the waiter lists of [`Mutex`](crate::Mutex) and
//! [`Condvar`](crate::condvar::Condvar).
//!
//! Waiter lists are touched for a handful of instructions at a time (push a
//! handle, pop a handle, take the whole list), which is far shorter than the
//! cost of parking a thread. The spinlock only hands out scoped access through
//! [`Spinlock::with_mut`], so a caller cannot hold it across a blocking call.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};

/// A spinlock protecting a short-lived critical section.
///
/// # Examples
///
/// ```
/// use readers_writers::spinlock::Spinlock;
///
/// let waiters = Spinlock::new(Vec::new());
/// waiters.with_mut(|w| w.push("reader-1"));
/// let popped = waiters.with_mut(|w| w.pop());
/// assert_eq!(popped, Some("reader-1"));
/// ```
#[derive(Debug)]
pub struct Spinlock<T> {
    data: UnsafeCell<T>,
    locked: AtomicBool,
}

/// Clears the lock flag when dropped, including during unwinding.
struct Release<'a>(&'a AtomicBool);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T> Spinlock<T> {
    /// Creates a new unlocked spinlock.
    pub const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            locked: AtomicBool::new(false),
        }
    }

    /// Runs `f` with exclusive access to the protected data.
    ///
    /// The lock is released when `f` returns or unwinds.
    ///
    /// ```
    /// # if cfg!(target_arch = "wasm32") { return; }
    /// use readers_writers::spinlock::Spinlock;
    /// use std::sync::Arc;
    /// use std::thread;
    ///
    /// let counter = Arc::new(Spinlock::new(0));
    /// let handles: Vec<_> = (0..4)
    ///     .map(|_| {
    ///         let counter = Arc::clone(&counter);
    ///         thread::spawn(move || {
    ///             for _ in 0..25 {
    ///                 counter.with_mut(|n| *n += 1);
    ///             }
    ///         })
    ///     })
    ///     .collect();
    /// for handle in handles {
    ///     handle.join().unwrap();
    /// }
    /// assert_eq!(counter.with_mut(|n| *n), 100);
    /// ```
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
        let _release = Release(&self.locked);
        // SAFETY: the flag is ours until `_release` drops.
        unsafe { f(&mut *self.data.get()) }
    }

    /// Consumes the spinlock and returns the protected data.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send> Sync for Spinlock<T> {}

impl<T: Default> Default for Spinlock<T> {
    fn default() -> Self {
        Spinlock::new(T::default())
    }
}

impl<T> From<T> for Spinlock<T> {
    fn from(value: T) -> Self {
        Spinlock::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Spinlock;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    #[test]
    fn with_mut_returns_closure_result() {
        let lock = Spinlock::new(vec![1, 2, 3]);
        let sum = lock.with_mut(|v| {
            v.push(4);
            v.iter().sum::<i32>()
        });
        assert_eq!(sum, 10);
        assert_eq!(lock.into_inner(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn released_after_panic() {
        let lock = Spinlock::new(0);
        let result = catch_unwind(AssertUnwindSafe(|| {
            lock.with_mut(|_| panic!("boom"));
        }));
        assert!(result.is_err());
        // would spin forever if the flag leaked
        assert_eq!(lock.with_mut(|n| *n), 0);
    }
}
