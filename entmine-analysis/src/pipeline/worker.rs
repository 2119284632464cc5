//! Scoring worker loop.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use entmine_core::events::types::CandidateScoredEvent;
use entmine_core::events::EventDispatcher;
use entmine_core::traits::Cancellable;

use super::progress::ProgressLog;
use super::signal::CompletionSignal;
use crate::scoring::{Candidate, Outcome, Scorer};

/// State shared by the workers and the output stage of one run.
pub struct SharedState<'a> {
    pub signal: CompletionSignal,
    pub input_done: AtomicBool,
    pub workers_alive: AtomicUsize,
    pub read: AtomicU64,
    pub accepted: AtomicU64,
    pub failed: AtomicU64,
    pub emitted: AtomicU64,
    pub poll: Duration,
    pub cancel: &'a dyn Cancellable,
    pub events: &'a EventDispatcher,
    pub progress: ProgressLog<'a>,
}

/// Decrements the live-worker count when a worker exits, panics included.
struct AliveGuard<'a>(&'a AtomicUsize);

impl Drop for AliveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Pull candidates until the queue is drained and input is done, or the
/// run is cancelled.
pub fn run_worker(
    worker_id: usize,
    mut scorer: Scorer<'_>,
    queue: Receiver<Arc<Candidate>>,
    shared: &SharedState<'_>,
) {
    let _alive = AliveGuard(&shared.workers_alive);
    tracing::debug!(worker_id, "scoring worker started");

    loop {
        if shared.cancel.is_cancelled() {
            tracing::debug!(worker_id, "scoring worker cancelled");
            break;
        }
        match queue.recv_timeout(shared.poll) {
            Ok(candidate) => {
                let outcome = scorer.score(&candidate);
                let accepted = matches!(outcome, Outcome::Succeeded(_));
                if accepted {
                    shared.accepted.fetch_add(1, Ordering::Relaxed);
                } else {
                    shared.failed.fetch_add(1, Ordering::Relaxed);
                }
                if !candidate.complete(outcome) {
                    tracing::error!(phrase = %candidate.phrase(), "candidate completed twice");
                }
                shared.signal.notify_all();
                shared.events.emit_candidate_scored(&CandidateScoredEvent {
                    phrase: candidate.phrase().to_string(),
                    accepted,
                    total_hits: scorer.last_total_hits(),
                });
                shared.progress.tick();
            }
            Err(RecvTimeoutError::Timeout) => {
                if shared.input_done.load(Ordering::SeqCst) && queue.is_empty() {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::debug!(worker_id, "scoring worker finished");
}
