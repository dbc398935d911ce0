use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation scope tied to the lifetime of whatever started an operation,
/// typically a mounted view. Cancelling does not abort the request in
/// flight; it marks the scope so the settling operation drops its result
/// instead of applying it to the store.
#[derive(Debug, Clone, Default)]
pub struct CancelScope {
    cancelled: Arc<AtomicBool>,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
