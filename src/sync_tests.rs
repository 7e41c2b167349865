// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tests for the mutex the lock is built on.

use crate::{Mutex, NotAvailable};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[test]
fn try_lock_fails_while_held() {
    let mutex = Mutex::new(42);
    let guard = mutex.try_lock().unwrap();
    assert_eq!(*guard, 42);
    assert!(matches!(mutex.try_lock(), Err(NotAvailable)));
    drop(guard);
    assert!(mutex.try_lock().is_ok());
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[test]
fn lock_spin_and_closures() {
    let mutex = Mutex::new(0);
    *mutex.lock_spin() = 5;
    mutex.with_mut_sync(|n| *n *= 2);
    assert_eq!(mutex.with_sync(|n| *n), 10);
    assert_eq!(mutex.into_inner(), 10);
}

#[test]
fn lock_block_waits_for_release() {
    let mutex = Arc::new(Mutex::new(0));
    let held = mutex.lock_block();

    let (tx, rx) = mpsc::channel();
    let contender = Arc::clone(&mutex);
    let handle = thread::spawn(move || {
        tx.send(()).unwrap();
        let mut guard = contender.lock_block();
        *guard += 1;
        tx.send(()).unwrap();
    });

    rx.recv().unwrap();
    assert!(rx.recv_timeout(Duration::from_millis(30)).is_err());
    drop(held);
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    handle.join().unwrap();
    assert_eq!(*mutex.lock_sync(), 1);
}

#[test]
fn lock_sync_counts_under_contention() {
    let mutex = Arc::new(Mutex::new(0u32));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let mutex = Arc::clone(&mutex);
            thread::spawn(move || {
                for _ in 0..500 {
                    *mutex.lock_sync() += 1;
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(mutex.with_sync(|n| *n), 4000);
}
