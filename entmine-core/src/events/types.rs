//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_load_complete`.
#[derive(Debug, Clone)]
pub struct LoadCompleteEvent {
    pub source: PathBuf,
    pub records: usize,
    pub skipped: usize,
}

/// Payload for `on_redirect_cycle`. `members` lists the titles of the
/// cycle in walk order; `terminal` is the title that keeps no edge.
#[derive(Debug, Clone)]
pub struct RedirectCycleEvent {
    pub members: Vec<String>,
    pub terminal: String,
}

/// Payload for `on_closure_complete`.
#[derive(Debug, Clone)]
pub struct ClosureCompleteEvent {
    pub edges: usize,
    pub cycles: usize,
    pub entities_propagated: usize,
}

/// Payload for `on_candidate_scored`.
#[derive(Debug, Clone)]
pub struct CandidateScoredEvent {
    pub phrase: String,
    pub accepted: bool,
    pub total_hits: u64,
}

/// Payload for `on_progress`.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub processed: usize,
    pub average_per_second: f64,
    pub current_per_second: f64,
}

/// Payload for `on_run_complete`.
#[derive(Debug, Clone)]
pub struct RunCompleteEvent {
    pub read: u64,
    pub emitted: u64,
    pub failed: u64,
    pub duration_ms: u64,
    pub cancelled: bool,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
