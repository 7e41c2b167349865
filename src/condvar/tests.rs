// SPDX-License-Identifier: MIT OR Apache-2.0
use super::*;
use crate::Mutex;
use std::sync::mpsc;
use std::time::Duration;

fn wait_for_waiters(condvar: &Condvar, count: usize) {
    while condvar.waiter_count() < count {
        thread::yield_now();
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[test]
fn notify_without_waiters_is_noop() {
    let condvar = Condvar::new();
    condvar.notify_one();
    condvar.notify_all();
    assert_eq!(condvar.waiter_count(), 0);
}

#[test]
fn wait_block_wakes_on_notify_one() {
    let pair = Arc::new((Mutex::new(false), Condvar::new()));
    let waiter_pair = Arc::clone(&pair);

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mutex, condvar) = &*waiter_pair;
        let mut ready = mutex.lock_sync();
        while !*ready {
            ready = condvar.wait_block(ready);
        }
        tx.send(()).unwrap();
    });

    let (mutex, condvar) = &*pair;
    wait_for_waiters(condvar, 1);
    assert!(rx.recv_timeout(Duration::from_millis(20)).is_err());
    *mutex.lock_sync() = true;
    condvar.notify_one();
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
}

#[test]
fn wait_spin_wakes_on_notify_one() {
    let pair = Arc::new((Mutex::new(0u32), Condvar::new()));
    let waiter_pair = Arc::clone(&pair);

    let handle = thread::spawn(move || {
        let (mutex, condvar) = &*waiter_pair;
        let mut value = mutex.lock_sync();
        while *value == 0 {
            value = condvar.wait_spin(value);
        }
        *value
    });

    let (mutex, condvar) = &*pair;
    wait_for_waiters(condvar, 1);
    *mutex.lock_sync() = 9;
    condvar.notify_one();
    assert_eq!(handle.join().unwrap(), 9);
}

#[test]
fn notify_one_wakes_exactly_one() {
    let pair = Arc::new((Mutex::new(0u32), Condvar::new()));
    let (tx, rx) = mpsc::channel();

    for _ in 0..3 {
        let pair = Arc::clone(&pair);
        let tx = tx.clone();
        thread::spawn(move || {
            let (mutex, condvar) = &*pair;
            let mut tickets = mutex.lock_sync();
            while *tickets == 0 {
                tickets = condvar.wait_sync(tickets);
            }
            *tickets -= 1;
            drop(tickets);
            tx.send(()).unwrap();
        });
    }

    let (mutex, condvar) = &*pair;
    wait_for_waiters(condvar, 3);
    *mutex.lock_sync() = 1;
    condvar.notify_one();
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    assert_eq!(condvar.waiter_count(), 2);

    *mutex.lock_sync() = 2;
    condvar.notify_all();
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
}

#[test]
fn wait_sync_while_rechecks_after_wake() {
    let pair = Arc::new((Mutex::new(0u32), Condvar::new()));
    let waiter_pair = Arc::clone(&pair);

    let handle = thread::spawn(move || {
        let (mutex, condvar) = &*waiter_pair;
        let value = condvar.wait_sync_while(mutex.lock_sync(), |v| *v < 3);
        *value
    });

    let (mutex, condvar) = &*pair;
    for step in 1..=3 {
        wait_for_waiters(condvar, 1);
        *mutex.lock_sync() = step;
        // the first two wakes leave the predicate true, so the waiter re-parks
        condvar.notify_all();
    }
    assert_eq!(handle.join().unwrap(), 3);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[test]
fn wait_sync_while_skips_wait_when_condition_false() {
    let mutex = Mutex::new(5u32);
    let condvar = Condvar::new();
    let guard = condvar.wait_sync_while(mutex.lock_sync(), |v| *v < 3);
    assert_eq!(*guard, 5);
    assert_eq!(condvar.waiter_count(), 0);
}
