//! Trailing-edge debounce gate.
//!
//! Time is passed in by the caller so the event loop (or a test) owns the
//! clock. A trigger replaces whatever was pending; `poll` hands back the
//! arguments of the last trigger once the delay has elapsed since it.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<A> {
    due: Instant,
    args: A,
}

#[derive(Debug)]
pub struct Debouncer<A> {
    delay: Duration,
    pending: Option<Pending<A>>,
}

impl<A> Debouncer<A> {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Reschedule to `now + delay`, dropping the previously pending arguments.
    pub fn trigger(&mut self, now: Instant, args: A) {
        self.pending = Some(Pending { due: now + self.delay, args });
    }

    /// Drop the pending call, returning its arguments if there was one.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.args)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the pending call if it is due. Each scheduled call fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| p.args),
            _ => None,
        }
    }

    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(300);

    #[test]
    fn test_burst_collapses_to_last_call() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(D);
        let mut fired = Vec::new();

        for (i, text) in ["i", "in", "inc", "ince"].iter().enumerate() {
            let now = t0 + Duration::from_millis(50 * i as u64);
            debouncer.trigger(now, text.to_string());
            fired.extend(debouncer.poll(now));
        }
        // still inside the quiet period of the last trigger (t0 + 150ms)
        fired.extend(debouncer.poll(t0 + Duration::from_millis(400)));
        assert!(fired.is_empty());

        fired.extend(debouncer.poll(t0 + Duration::from_millis(450)));
        fired.extend(debouncer.poll(t0 + Duration::from_millis(900)));
        assert_eq!(fired, vec!["ince".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_separate_quiet_periods_fire_separately() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(D);
        debouncer.trigger(t0, 1);
        assert_eq!(debouncer.poll(t0 + D), Some(1));
        debouncer.trigger(t0 + Duration::from_secs(1), 2);
        assert_eq!(debouncer.poll(t0 + Duration::from_secs(1) + D), Some(2));
    }

    #[test]
    fn test_cancel_and_time_until_ready() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(D);
        assert_eq!(debouncer.time_until_ready(t0), None);

        debouncer.trigger(t0, "matrix");
        assert_eq!(debouncer.time_until_ready(t0 + Duration::from_millis(100)), Some(Duration::from_millis(200)));
        assert_eq!(debouncer.time_until_ready(t0 + Duration::from_secs(5)), Some(Duration::ZERO));

        assert_eq!(debouncer.cancel(), Some("matrix"));
        assert_eq!(debouncer.poll(t0 + Duration::from_secs(5)), None);
    }
}
