//! Progress logging with a widening step.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use entmine_core::constants::PROGRESS_INITIAL_STEP;
use entmine_core::events::types::ProgressEvent;
use entmine_core::events::EventDispatcher;

/// Thread-safe counter that logs every `step` increments. The step starts
/// at 10 and grows tenfold once the count reaches twenty steps.
pub struct ProgressLog<'a> {
    label: &'static str,
    counter: AtomicUsize,
    step: AtomicUsize,
    start: Instant,
    previous: Mutex<(Instant, usize)>,
    events: &'a EventDispatcher,
}

impl<'a> ProgressLog<'a> {
    pub fn new(label: &'static str, events: &'a EventDispatcher) -> Self {
        let now = Instant::now();
        Self {
            label,
            counter: AtomicUsize::new(0),
            step: AtomicUsize::new(PROGRESS_INITIAL_STEP),
            start: now,
            previous: Mutex::new((now, 0)),
            events,
        }
    }

    /// Count one item, logging when a step boundary is crossed.
    pub fn tick(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let step = self.step.load(Ordering::Relaxed);
        if count % step == 0 {
            self.report(count);
            if count == 20 * step {
                self.step.store(step * 10, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }

    /// Log the final count.
    pub fn finish(&self) {
        self.report(self.count());
    }

    fn report(&self, count: usize) {
        let now = Instant::now();
        let mut previous = self.previous.lock().unwrap_or_else(PoisonError::into_inner);
        let (since, at) = *previous;
        *previous = (now, count);
        drop(previous);

        let event = ProgressEvent {
            processed: count,
            average_per_second: rate(count, now.duration_since(self.start).as_secs_f64()),
            current_per_second: rate(
                count.saturating_sub(at),
                now.duration_since(since).as_secs_f64(),
            ),
        };
        tracing::info!(
            label = self.label,
            processed = event.processed,
            average = format_args!("{:.2}/s", event.average_per_second),
            current = format_args!("{:.2}/s", event.current_per_second),
            "progress"
        );
        self.events.emit_progress(&event);
    }
}

fn rate(count: usize, seconds: f64) -> f64 {
    if seconds > 0.0 {
        count as f64 / seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use entmine_core::events::MiningEventHandler;

    use super::*;

    #[derive(Default)]
    struct Reports(Mutex<Vec<usize>>);

    impl MiningEventHandler for Reports {
        fn on_progress(&self, event: &ProgressEvent) {
            self.0.lock().unwrap().push(event.processed);
        }
    }

    #[test]
    fn step_widens_after_twenty_reports() {
        let reports = Arc::new(Reports::default());
        let mut events = EventDispatcher::new();
        events.register(reports.clone());

        let progress = ProgressLog::new("test", &events);
        for _ in 0..400 {
            progress.tick();
        }
        assert_eq!(progress.count(), 400);

        let seen = reports.0.lock().unwrap().clone();
        let mut expected: Vec<usize> = (1..=20).map(|i| i * 10).collect();
        expected.extend([300, 400]);
        assert_eq!(seen, expected);
        assert_eq!(seen.len(), 22);

        progress.finish();
        assert_eq!(reports.0.lock().unwrap().last(), Some(&400));
    }
}
