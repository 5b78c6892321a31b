// ABOUTME: Fake generation progress driven by a repeating timer
// Progress climbs by random steps to 100, then a single delayed "done" fires

use crate::config::TimingConfig;
use crate::timer::{SharedClock, TimerId, Timers};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

pub const PROGRESS_CEILING: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressEvent {
    Tick,
    Done,
}

/// Lives exactly as long as the generating screen is mounted. Dropping it
/// drops its timers.
#[derive(Debug)]
pub struct GeneratingState {
    progress: f64,
    max_increment: f64,
    done_delay: Duration,
    timers: Timers<ProgressEvent>,
    interval: Option<TimerId>,
    done_scheduled: bool,
    done_fired: bool,
    rng: StdRng,
}

impl GeneratingState {
    pub fn new(clock: SharedClock, timing: &TimingConfig, rng: StdRng) -> Self {
        let mut timers = Timers::new(clock);
        let interval = timers.every(timing.progress_interval(), ProgressEvent::Tick);
        Self {
            progress: 0.0,
            max_increment: timing.progress_max_increment,
            done_delay: timing.progress_done_delay(),
            timers,
            interval: Some(interval),
            done_scheduled: false,
            done_fired: false,
            rng,
        }
    }

    /// 0.0 ..= 100.0
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn percent(&self) -> u16 {
        self.progress.round().clamp(0.0, PROGRESS_CEILING) as u16
    }

    pub fn is_done(&self) -> bool {
        self.done_fired
    }

    /// Apply due timers. Returns true on the one call that completes the step.
    pub fn tick(&mut self) -> bool {
        let mut completed = false;
        for (_, event) in self.timers.poll() {
            match event {
                ProgressEvent::Tick => self.advance(),
                ProgressEvent::Done if !self.done_fired => {
                    debug!("Generation finished");
                    self.done_fired = true;
                    completed = true;
                }
                ProgressEvent::Done => {}
            }
        }
        completed
    }

    fn advance(&mut self) {
        if self.done_scheduled {
            return;
        }
        let step = self.rng.random::<f64>() * self.max_increment;
        self.progress = (self.progress + step).min(PROGRESS_CEILING);
        if self.progress >= PROGRESS_CEILING {
            if let Some(id) = self.interval.take() {
                self.timers.cancel(id);
            }
            self.done_scheduled = true;
            self.timers.after(self.done_delay, ProgressEvent::Done);
        }
    }
}
