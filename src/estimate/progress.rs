//! Progress reporting and cooperative cancellation for the texel loops.

use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives `(done, total)` sample counts from a running loop.
///
/// Called synchronously on the calling thread once per sample.
pub trait Progress {
    fn report(&mut self, done: u64, total: u64);

    /// Checked once per sample; returning `true` aborts with `ShError::Cancelled`.
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> Progress for F
where
    F: FnMut(u64, u64),
{
    fn report(&mut self, done: u64, total: u64) {
        self(done, total)
    }
}

/// Reporter that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _done: u64, _total: u64) {}
}

/// Wraps a reporter with a shared cancellation flag.
#[derive(Clone, Debug)]
pub struct Cancellable<P> {
    inner: P,
    flag: Arc<AtomicBool>,
}

impl<P: Progress> Cancellable<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that can be cloned to another thread to request cancellation.
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl<P: Progress> Progress for Cancellable<P> {
    fn report(&mut self, done: u64, total: u64) {
        self.inner.report(done, total)
    }

    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.inner.is_cancelled()
    }
}

/// Logs progress at `steps` evenly spaced points (plus completion).
#[derive(Clone, Debug)]
pub struct LogProgress {
    label: &'static str,
    steps: u64,
}

impl LogProgress {
    pub fn new(label: &'static str, steps: u32) -> Self {
        Self {
            label,
            steps: steps.max(1) as u64,
        }
    }
}

impl Progress for LogProgress {
    fn report(&mut self, done: u64, total: u64) {
        let stride = (total / self.steps).max(1);
        if done % stride == 0 || done + 1 == total {
            info!("{}  {} / {}", self.label, done + 1, total);
        }
    }
}
