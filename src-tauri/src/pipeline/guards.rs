//! Scoped flags for one pipeline run.

use crate::overlay::{self, SharedOverlay};
use std::sync::atomic::{AtomicBool, Ordering};

/// Held for the duration of one run; a second trigger fails to acquire it.
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    pub fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Turns the overlay's loading indicator on when engaged and off when
/// dropped, whichever way the run exits.
pub struct LoadingGuard<'a> {
    overlay: &'a SharedOverlay,
}

impl<'a> LoadingGuard<'a> {
    pub fn engage(overlay: &'a SharedOverlay) -> Self {
        overlay::lock(overlay).set_loading(true);
        Self { overlay }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        overlay::lock(self.overlay).set_loading(false);
    }
}
