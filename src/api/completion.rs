//! One-shot completion latch for callback delivery.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::Reply;

/// Delivers a [`Reply`] to a callback at most once.
///
/// The first terminal event (response, error or timeout) sets the flag and
/// fires the callback. Every later terminal event for the same request is
/// dropped. Safe to share between the tasks that race to finish a request.
///
/// Dropping a latch that never completed counts as a transport failure: the
/// callback receives [`Reply::failed`]. A cancelled task or a runtime shutdown
/// therefore still reports exactly once.
pub struct Completion<F: FnOnce(Reply)> {
    fired: AtomicBool,
    callback: Mutex<Option<F>>,
}

impl<F> Completion<F>
where
    F: FnOnce(Reply),
{
    /// Wraps a callback in a fresh, uncompleted latch.
    #[must_use]
    pub const fn new(callback: F) -> Self {
        Self {
            fired: AtomicBool::new(false),
            callback: Mutex::new(Some(callback)),
        }
    }

    /// Delivers `reply` if this is the first terminal event.
    ///
    /// Returns `true` if the callback fired, `false` if it was suppressed.
    pub fn complete(&self, reply: Reply) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            tracing::debug!(status = reply.status, "Suppressed duplicate completion");
            return false;
        }

        let callback = self
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match callback {
            Some(callback) => {
                callback(reply);
                true
            }
            None => false,
        }
    }

    /// Returns true once a terminal event has been delivered.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl<F: FnOnce(Reply)> Drop for Completion<F> {
    fn drop(&mut self) {
        if *self.fired.get_mut() {
            return;
        }
        *self.fired.get_mut() = true;

        let callback = self
            .callback
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(callback) = callback {
            tracing::debug!("Request dropped before completing");
            callback(Reply::failed());
        }
    }
}

impl<F: FnOnce(Reply)> fmt::Debug for Completion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("fired", &self.fired.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}
