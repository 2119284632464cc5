//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::MiningEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn MiningEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn MiningEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop the others.
    fn emit<F: Fn(&dyn MiningEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Load phase ----
    pub fn emit_load_complete(&self, event: &LoadCompleteEvent) {
        self.emit(|h| h.on_load_complete(event));
    }

    pub fn emit_redirect_cycle(&self, event: &RedirectCycleEvent) {
        self.emit(|h| h.on_redirect_cycle(event));
    }

    pub fn emit_closure_complete(&self, event: &ClosureCompleteEvent) {
        self.emit(|h| h.on_closure_complete(event));
    }

    // ---- Scoring ----
    pub fn emit_candidate_scored(&self, event: &CandidateScoredEvent) {
        self.emit(|h| h.on_candidate_scored(event));
    }

    pub fn emit_progress(&self, event: &ProgressEvent) {
        self.emit(|h| h.on_progress(event));
    }

    pub fn emit_run_complete(&self, event: &RunCompleteEvent) {
        self.emit(|h| h.on_run_complete(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
