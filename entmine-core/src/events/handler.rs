//! MiningEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling mining events.
///
/// Handlers only override the events they care about. The trait requires
/// `Send + Sync` because workers emit from their own threads.
pub trait MiningEventHandler: Send + Sync {
    // ---- Load phase ----
    fn on_load_complete(&self, _event: &LoadCompleteEvent) {}
    fn on_redirect_cycle(&self, _event: &RedirectCycleEvent) {}
    fn on_closure_complete(&self, _event: &ClosureCompleteEvent) {}

    // ---- Scoring ----
    fn on_candidate_scored(&self, _event: &CandidateScoredEvent) {}
    fn on_progress(&self, _event: &ProgressEvent) {}
    fn on_run_complete(&self, _event: &RunCompleteEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
