// SPDX-License-Identifier: MIT OR Apache-2.0
//! Choosing between blocking and spinning.
//!
//! Native targets can always park a thread. On `wasm32` a thread may only
//! block when the host exposes `Atomics.wait` (workers, usually); the
//! browser main thread does not, and must spin instead.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(inline_js = "
export function _rw_atomicsWaitUsable() {
    if (typeof SharedArrayBuffer === 'undefined') return false;
    if (typeof Atomics === 'undefined' || typeof Atomics.wait !== 'function') return false;
    try {
        const cell = new Int32Array(new SharedArrayBuffer(4));
        const outcome = Atomics.wait(cell, 0, 0, 0);
        return outcome === 'timed-out' || outcome === 'not-equal';
    } catch (_) {
        return false;
    }
}
")]
extern "C" {
    fn _rw_atomicsWaitUsable() -> bool;
}

/// Whether the current thread may park.
#[cfg(target_arch = "wasm32")]
pub(crate) fn can_block() -> bool {
    _rw_atomicsWaitUsable()
}

/// Whether the current thread may park.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) const fn can_block() -> bool {
    true
}

/// Holds the calling thread for at least `dur`.
///
/// Sleeps where blocking is allowed, otherwise spins until the deadline.
pub fn pause(dur: Duration) {
    if dur.is_zero() {
        return;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::thread::sleep(dur);
    }
    #[cfg(target_arch = "wasm32")]
    {
        if can_block() {
            std::thread::sleep(dur);
        } else {
            let deadline = web_time::Instant::now() + dur;
            while web_time::Instant::now() < deadline {
                std::hint::spin_loop();
            }
        }
    }
}
