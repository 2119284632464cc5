//! Completion signal between scoring workers and the output stage.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Condition variable paired with an empty mutex.
///
/// Workers publish a result, then call [`notify_all`](Self::notify_all).
/// The output stage checks its predicate under the lock before each wait,
/// so a notification between the check and the wait cannot be lost.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    lock: Mutex<()>,
    cond: Condvar,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake every waiter.
    pub fn notify_all(&self) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.cond.notify_all();
    }

    /// Block until `done` holds.
    ///
    /// Waits are bounded by `poll`. `done` is re-checked on every wake,
    /// spurious or not, and `abort` is consulted after every wait that
    /// did not satisfy it. An `Err` from `abort` ends the wait.
    pub fn wait_until<E>(
        &self,
        done: impl Fn() -> bool,
        poll: Duration,
        mut abort: impl FnMut() -> Result<(), E>,
    ) -> Result<(), E> {
        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if done() {
                return Ok(());
            }
            abort()?;
            let (next, _timeout) = self
                .cond
                .wait_timeout(guard, poll)
                .unwrap_or_else(PoisonError::into_inner);
            guard = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn wakes_on_notify() {
        let signal = CompletionSignal::new();
        let flag = AtomicBool::new(false);
        std::thread::scope(|s| {
            s.spawn(|| {
                std::thread::sleep(Duration::from_millis(20));
                flag.store(true, Ordering::SeqCst);
                signal.notify_all();
            });
            let result: Result<(), ()> = signal.wait_until(
                || flag.load(Ordering::SeqCst),
                Duration::from_secs(5),
                || Ok(()),
            );
            assert!(result.is_ok());
        });
    }

    #[test]
    fn abort_ends_wait() {
        let signal = CompletionSignal::new();
        let mut polls = 0;
        let result = signal.wait_until(
            || false,
            Duration::from_millis(1),
            || {
                polls += 1;
                if polls > 3 {
                    Err("gave up")
                } else {
                    Ok(())
                }
            },
        );
        assert_eq!(result, Err("gave up"));
    }
}
