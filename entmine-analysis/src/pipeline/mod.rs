//! Concurrent mining pipeline.
//!
//! Ingestion runs on the caller thread and pushes every candidate onto a
//! bounded work queue and, in the same order, onto the output queue. A
//! fixed pool of workers scores candidates in any order. A single output
//! stage walks the output queue in input order and waits for each
//! candidate's completion before writing or skipping it.

pub mod output;
pub mod progress;
pub mod runner;
pub mod signal;
pub mod worker;

pub use progress::ProgressLog;
pub use runner::{effective_parallelism, MiningPipeline, MiningStats};
pub use signal::CompletionSignal;
