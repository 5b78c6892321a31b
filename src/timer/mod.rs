// ABOUTME: Clock abstraction and cancellable one-shot/repeating timer queue
// Drives every simulated delay in the wizard; tests swap in ManualClock

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary origin
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Entry<E> {
    id: TimerId,
    due: Duration,
    interval: Option<Duration>,
    event: E,
}

/// Queue of pending timers that emit `E` when due.
///
/// Nothing fires on its own: the owner calls [`Timers::poll`] from its tick
/// and applies the returned events. Dropping the queue cancels everything,
/// so a step that is torn down can never receive a late callback.
pub struct Timers<E> {
    clock: SharedClock,
    next_id: u64,
    entries: Vec<Entry<E>>,
}

impl<E> fmt::Debug for Timers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("pending", &self.entries.len())
            .field("now", &self.clock.now())
            .finish()
    }
}

impl<E: Clone> Timers<E> {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Fire `event` once after `delay`
    pub fn after(&mut self, delay: Duration, event: E) -> TimerId {
        self.push(delay, None, event)
    }

    /// Fire `event` every `interval` until cancelled
    pub fn every(&mut self, interval: Duration, event: E) -> TimerId {
        let interval = interval.max(Duration::from_millis(1));
        self.push(interval, Some(interval), event)
    }

    fn push(&mut self, delay: Duration, interval: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.clock.now() + delay,
            interval,
            event,
        });
        id
    }

    /// Returns true when the timer was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Collect every event due at the current time, in due order.
    ///
    /// A repeating timer that missed several intervals fires once per missed
    /// interval.
    pub fn poll(&mut self) -> Vec<(TimerId, E)> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        loop {
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due <= now)
                .min_by_key(|(_, e)| (e.due, e.id.0))
                .map(|(idx, _)| idx);

            let Some(idx) = next else { break };

            match self.entries[idx].interval {
                Some(interval) => {
                    let entry = &mut self.entries[idx];
                    fired.push((entry.id, entry.event.clone()));
                    entry.due += interval;
                }
                None => {
                    let entry = self.entries.remove(idx);
                    fired.push((entry.id, entry.event));
                }
            }
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ManualClock, Timers<&'static str>) {
        let clock = ManualClock::new();
        let timers = Timers::new(Arc::new(clock.clone()));
        (clock, timers)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let (clock, mut timers) = setup();
        let id = timers.after(Duration::from_millis(500), "done");

        clock.advance(Duration::from_millis(499));
        assert!(timers.poll().is_empty());

        clock.advance(Duration::from_millis(1));
        let fired = timers.poll();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, "done");

        clock.advance(Duration::from_secs(10));
        assert!(timers.poll().is_empty());
        assert!(!timers.cancel(id));
    }

    #[test]
    fn test_repeating_fires_per_interval() {
        let (clock, mut timers) = setup();
        timers.every(Duration::from_millis(350), "tick");

        clock.advance(Duration::from_millis(1050));
        assert_eq!(timers.poll().len(), 3);

        clock.advance(Duration::from_millis(349));
        assert!(timers.poll().is_empty());
        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.poll().len(), 1);
    }

    #[test]
    fn test_cancel_stops_timer() {
        let (clock, mut timers) = setup();
        let id = timers.every(Duration::from_millis(100), "tick");
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));

        clock.advance(Duration::from_secs(1));
        assert!(timers.poll().is_empty());
    }

    #[test]
    fn test_events_fire_in_due_order() {
        let (clock, mut timers) = setup();
        timers.after(Duration::from_millis(300), "late");
        timers.after(Duration::from_millis(100), "early");
        timers.after(Duration::from_millis(200), "middle");

        clock.advance(Duration::from_millis(300));
        let order: Vec<_> = timers.poll().into_iter().map(|(_, e)| e).collect();
        assert_eq!(order, vec!["early", "middle", "late"]);
    }
}
