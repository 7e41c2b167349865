// SPDX-License-Identifier: MIT OR Apache-2.0
use super::Mutex;
use crate::error::NotAvailable;
use crate::guard::MutexGuard;
use std::thread;

pub(crate) fn lock_block<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    loop {
        // Register under the list lock so a release between our failed attempt
        // and the push still finds us in the list.
        let attempt = mutex
            .parked_lockers
            .with_mut(|parked| match mutex.try_lock() {
                Ok(guard) => Ok(guard),
                Err(NotAvailable) => {
                    parked.push(thread::current());
                    Err(NotAvailable)
                }
            });
        match attempt {
            Ok(guard) => return guard,
            Err(NotAvailable) => thread::park(),
        }
    }
}
