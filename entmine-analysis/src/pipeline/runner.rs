//! Pipeline assembly and execution.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use entmine_core::config::runtime_config::hardware_concurrency;
use entmine_core::config::MinerConfig;
use entmine_core::constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_QUEUE_CAPACITY};
use entmine_core::errors::{ConfigError, ErrorCode, PipelineError};
use entmine_core::events::types::{ErrorEvent, RunCompleteEvent};
use entmine_core::events::EventDispatcher;
use entmine_core::traits::{Cancellable, CancellationToken};
use serde::Serialize;

use super::output::write_ordered;
use super::progress::ProgressLog;
use super::signal::CompletionSignal;
use super::worker::{run_worker, SharedState};
use crate::closure::KnowledgeBase;
use crate::index::DocumentIndex;
use crate::loaders::parse_candidate;
use crate::scoring::{Candidate, Scorer, ScoringSettings};

/// Number of workers for a configured parallelism: capped at the hardware
/// concurrency, and an error if that leaves fewer than one.
pub fn effective_parallelism(configured: usize) -> Result<usize, ConfigError> {
    let workers = configured.min(hardware_concurrency());
    if workers < 1 {
        return Err(ConfigError::ValidationFailed {
            field: "runtime.parallelism".to_string(),
            message: format!("effective parallelism {workers} is below 1"),
        });
    }
    Ok(workers)
}

/// Counters of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MiningStats {
    /// Non-empty input lines.
    pub read: u64,
    /// Lines that could not be parsed as candidates.
    pub malformed: u64,
    pub accepted: u64,
    pub failed: u64,
    /// Lines written; equals `accepted` for a run that was not interrupted.
    pub emitted: u64,
    pub parallelism: usize,
    pub duration_ms: u64,
}

/// Candidate scoring pipeline over a frozen knowledge base and an index.
pub struct MiningPipeline<'a> {
    knowledge: &'a KnowledgeBase,
    index: &'a dyn DocumentIndex,
    events: &'a EventDispatcher,
    settings: ScoringSettings,
    parallelism: usize,
    queue_capacity: usize,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl<'a> MiningPipeline<'a> {
    pub fn new(
        knowledge: &'a KnowledgeBase,
        index: &'a dyn DocumentIndex,
        events: &'a EventDispatcher,
    ) -> Self {
        Self {
            knowledge,
            index,
            events,
            settings: ScoringSettings::default(),
            parallelism: hardware_concurrency(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            cancel: CancellationToken::new(),
        }
    }

    /// Apply the `[scoring]` and `[runtime]` sections of `config`.
    pub fn with_config(mut self, config: &MinerConfig) -> Self {
        self.settings = ScoringSettings::from_config(&config.scoring);
        self.parallelism = config.runtime.requested_parallelism();
        self.queue_capacity = config.runtime.effective_queue_capacity();
        self.poll_interval = config.runtime.effective_poll_interval();
        self
    }

    pub fn with_settings(mut self, settings: ScoringSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Requested worker count; capped at the hardware concurrency on `run`.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn with_poll_interval(mut self, poll: Duration) -> Self {
        self.poll_interval = poll;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Score every candidate line of `input` and write accepted results to
    /// `output` in input order.
    pub fn run(
        &self,
        input: impl BufRead,
        output: &mut (dyn Write + Send),
    ) -> Result<MiningStats, PipelineError> {
        let parallelism = effective_parallelism(self.parallelism)?;
        let started = Instant::now();
        tracing::info!(
            parallelism,
            queue_capacity = self.queue_capacity,
            minimum_mentions = self.settings.minimum_mentions,
            "mining started"
        );

        let (work_tx, work_rx) = bounded::<Arc<Candidate>>(self.queue_capacity);
        let (out_tx, out_rx) = bounded::<Arc<Candidate>>(self.queue_capacity + 1);
        let shared = SharedState {
            signal: CompletionSignal::new(),
            input_done: AtomicBool::new(false),
            workers_alive: AtomicUsize::new(parallelism),
            read: AtomicU64::new(0),
            accepted: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            emitted: AtomicU64::new(0),
            poll: self.poll_interval,
            cancel: &self.cancel,
            events: self.events,
            progress: ProgressLog::new("candidates", self.events),
        };

        let (ingested, written) = std::thread::scope(|scope| {
            let shared = &shared;
            let workers: Vec<_> = (0..parallelism)
                .map(|worker_id| {
                    let queue = work_rx.clone();
                    let scorer = Scorer::new(self.knowledge, self.index, self.settings);
                    std::thread::Builder::new()
                        .name(format!("entmine-worker-{worker_id}"))
                        .spawn_scoped(scope, move || run_worker(worker_id, scorer, queue, shared))
                })
                .collect();
            drop(work_rx);

            let writer = scope.spawn(move || write_ordered(out_rx, output, shared));

            let ingested = ingest(input, work_tx, out_tx, shared);
            shared.input_done.store(true, Ordering::SeqCst);

            for handle in workers {
                match handle {
                    Ok(handle) => {
                        if handle.join().is_err() {
                            tracing::error!("scoring worker panicked");
                        }
                    }
                    Err(e) => {
                        shared.workers_alive.fetch_sub(1, Ordering::SeqCst);
                        tracing::error!(error = %e, "failed to spawn scoring worker");
                    }
                }
            }
            let written = writer.join().unwrap_or_else(|_| {
                Err(PipelineError::WorkerLost { ordinal: 0 })
            });
            (ingested, written)
        });
        shared.progress.finish();

        let outcome = if self.cancel.is_cancelled() {
            Err(PipelineError::Cancelled)
        } else {
            match (ingested, written) {
                (_, Err(e)) | (Err(e), _) => Err(e),
                (Ok(ingest), Ok(emitted)) => Ok(MiningStats {
                    read: ingest.read,
                    malformed: ingest.malformed,
                    accepted: shared.accepted.load(Ordering::SeqCst),
                    failed: shared.failed.load(Ordering::SeqCst),
                    emitted,
                    parallelism,
                    duration_ms: started.elapsed().as_millis() as u64,
                }),
            }
        };

        match &outcome {
            Ok(stats) => {
                tracing::info!(
                    read = stats.read,
                    malformed = stats.malformed,
                    accepted = stats.accepted,
                    failed = stats.failed,
                    emitted = stats.emitted,
                    duration_ms = stats.duration_ms,
                    "mining complete"
                );
                self.events.emit_run_complete(&RunCompleteEvent {
                    read: stats.read,
                    emitted: stats.emitted,
                    failed: stats.failed,
                    duration_ms: stats.duration_ms,
                    cancelled: false,
                });
            }
            Err(e) => {
                let cancelled = matches!(e, PipelineError::Cancelled);
                if cancelled {
                    tracing::warn!("mining cancelled, in-flight candidates dropped");
                } else {
                    tracing::error!(error = %e, "mining failed");
                    self.events.emit_error(&ErrorEvent {
                        message: e.to_string(),
                        error_code: e.error_code().to_string(),
                    });
                }
                self.events.emit_run_complete(&RunCompleteEvent {
                    read: shared.read.load(Ordering::SeqCst),
                    emitted: shared.emitted.load(Ordering::SeqCst),
                    failed: shared.failed.load(Ordering::SeqCst),
                    duration_ms: started.elapsed().as_millis() as u64,
                    cancelled,
                });
            }
        }
        outcome
    }
}

#[derive(Debug, Default)]
struct Ingested {
    read: u64,
    malformed: u64,
}

/// Parse input lines and enqueue each candidate on both queues. Dropping
/// the senders on return tells the workers and the output stage that no
/// more input follows.
fn ingest(
    input: impl BufRead,
    work: Sender<Arc<Candidate>>,
    ordered: Sender<Arc<Candidate>>,
    shared: &SharedState<'_>,
) -> Result<Ingested, PipelineError> {
    let mut ingested = Ingested::default();
    for line in input.lines() {
        if shared.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        let line = line.map_err(PipelineError::Input)?;
        if line.trim().is_empty() {
            continue;
        }
        ingested.read += 1;
        shared.read.store(ingested.read, Ordering::Relaxed);

        let ordinal = ingested.read - 1;
        let Some(candidate) = parse_candidate(ordinal, &line) else {
            ingested.malformed += 1;
            tracing::warn!(line = ingested.read, "skipping malformed candidate line");
            continue;
        };
        let candidate = Arc::new(candidate);
        if work.send(Arc::clone(&candidate)).is_err() || ordered.send(candidate).is_err() {
            tracing::debug!("downstream stages stopped, ending ingestion");
            break;
        }
    }
    Ok(ingested)
}
