//! Cooperative cancellation token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation.
///
/// Ingestion, scoring workers and the output stage check this between
/// candidates and on every poll timeout.
pub trait Cancellable: Send + Sync {
    /// Check if cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Request cancellation.
    fn cancel(&self);
}

/// Default implementation of a cancellation token.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token (not cancelled).
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The shared flag, for registration with OS signal handlers.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shareable<T: Send + Sync + ?Sized>() {}

    #[test]
    fn trait_objects_cross_threads() {
        assert_shareable::<dyn Cancellable>();
        let token = CancellationToken::new();
        let shared: &dyn Cancellable = &token;
        std::thread::scope(|scope| {
            scope.spawn(|| shared.cancel());
        });
        assert!(token.is_cancelled());
    }

    #[test]
    fn flag_is_shared_with_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        token.flag().store(true, Ordering::SeqCst);
        assert!(clone.is_cancelled());
    }
}
