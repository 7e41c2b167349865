// SPDX-License-Identifier: MIT OR Apache-2.0
use super::Condvar;

impl Condvar {
    /// Wakes one waiting thread, if any.
    ///
    /// Which waiter is woken is unspecified; currently it is the most recently
    /// registered one.
    pub fn notify_one(&self) {
        let waiter = self.waiters.with_mut(|waiters| waiters.pop());
        if let Some(waiter) = waiter {
            waiter.wake();
        }
    }

    /// Wakes every waiting thread.
    pub fn notify_all(&self) {
        let waiters = self.waiters.with_mut(std::mem::take);
        for waiter in waiters {
            waiter.wake();
        }
    }
}
