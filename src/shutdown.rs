//! Process-wide cancellation flag.
//! Set by the ctrlc handler; the sync engine checks it between entries and aborts
//! with `SyncError::Interrupted`.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::SyncError;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Early-exit check threaded through every traversal step.
#[inline]
pub(crate) fn check() -> Result<(), SyncError> {
    if is_requested() {
        Err(SyncError::Interrupted)
    } else {
        Ok(())
    }
}

/// Clear the flag. Only meant for tests that share one process.
#[doc(hidden)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
