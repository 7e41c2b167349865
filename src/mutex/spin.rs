// SPDX-License-Identifier: MIT OR Apache-2.0
use super::Mutex;
use crate::guard::MutexGuard;

pub(crate) fn lock_spin<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    loop {
        if let Ok(guard) = mutex.try_lock() {
            return guard;
        }
        std::hint::spin_loop();
    }
}
