//! Ordered output stage.

use std::io::Write;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use entmine_core::errors::{OutputError, PipelineError};

use super::worker::SharedState;
use crate::scoring::Candidate;

/// Drain `queue` in input order, waiting for each candidate to leave the
/// pending state before writing its line or skipping it.
///
/// Returns the number of lines written.
pub fn write_ordered(
    queue: Receiver<Arc<Candidate>>,
    output: &mut (dyn Write + Send),
    shared: &SharedState<'_>,
) -> Result<u64, PipelineError> {
    let mut emitted = 0u64;
    loop {
        let candidate = match queue.recv_timeout(shared.poll) {
            Ok(candidate) => candidate,
            Err(RecvTimeoutError::Timeout) => {
                if shared.cancel.is_cancelled() {
                    return Err(PipelineError::Cancelled);
                }
                if shared.input_done.load(Ordering::SeqCst) && queue.is_empty() {
                    break;
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };

        shared.signal.wait_until(
            || !candidate.is_pending(),
            shared.poll,
            || {
                if shared.cancel.is_cancelled() {
                    return Err(PipelineError::Cancelled);
                }
                if shared.workers_alive.load(Ordering::SeqCst) == 0 && candidate.is_pending() {
                    return Err(PipelineError::WorkerLost {
                        ordinal: candidate.ordinal(),
                    });
                }
                Ok(())
            },
        )?;

        if let Some(line) = candidate.result_line() {
            write_line(output, line)?;
            emitted += 1;
            shared.emitted.fetch_add(1, Ordering::Relaxed);
        }
    }

    output.flush().map_err(OutputError::from)?;
    Ok(emitted)
}

fn write_line(output: &mut (dyn Write + Send), line: &str) -> Result<(), OutputError> {
    output.write_all(line.as_bytes())?;
    output.write_all(b"\n")?;
    Ok(())
}
