// ABOUTME: Playback model for the review step's video element and its companion audio track
// Audio mirrors the video's position, rate and play state while attached

use tracing::debug;

pub const DEFAULT_DRIFT_TOLERANCE: f64 = 0.3;

/// Playback rates cycled by the review step
pub const PLAYBACK_RATES: [f64; 4] = [1.0, 1.25, 1.5, 0.75];

/// Minimal stand-in for a media element's transport
#[derive(Debug, Clone, PartialEq)]
pub struct MediaElement {
    pub position: f64,
    pub rate: f64,
    pub paused: bool,
    pub muted: bool,
    /// 0.0 ..= 1.0
    pub volume: f64,
    pub duration: Option<f64>,
}

impl MediaElement {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            position: 0.0,
            rate: 1.0,
            paused: true,
            muted: false,
            volume: 1.0,
            duration,
        }
    }

    pub fn play(&mut self) {
        if self.ended() {
            self.position = 0.0;
        }
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn seek(&mut self, position: f64) {
        let upper = self.duration.unwrap_or(f64::MAX);
        self.position = position.clamp(0.0, upper);
    }

    pub fn ended(&self) -> bool {
        self.duration.is_some_and(|d| self.position >= d)
    }

    /// Move the playhead by `elapsed` seconds of wall time
    pub fn advance(&mut self, elapsed: f64) {
        if self.paused {
            return;
        }
        self.seek(self.position + elapsed * self.rate);
        if self.ended() {
            self.paused = true;
        }
    }
}

/// Keeps an audio element slaved to the video element.
///
/// Every handler is inert while detached, which stands in for removing the
/// event listeners.
#[derive(Debug, Clone)]
pub struct AvSync {
    attached: bool,
    tolerance: f64,
}

impl AvSync {
    pub fn new(tolerance: f64) -> Self {
        Self {
            attached: false,
            tolerance,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_attached(&mut self, attached: bool, video: &mut MediaElement, audio: &mut MediaElement) {
        self.attached = attached;
        if attached {
            video.muted = true;
            audio.position = video.position;
            audio.rate = video.rate;
            if !video.paused {
                audio.play();
            }
        } else {
            video.muted = false;
            audio.pause();
        }
    }

    pub fn on_play(&self, video: &MediaElement, audio: &mut MediaElement) {
        if self.attached {
            audio.position = video.position;
            audio.rate = video.rate;
            audio.play();
        }
    }

    pub fn on_pause(&self, audio: &mut MediaElement) {
        if self.attached {
            audio.pause();
        }
    }

    pub fn on_rate_change(&self, video: &MediaElement, audio: &mut MediaElement) {
        if self.attached {
            audio.rate = video.rate;
        }
    }

    pub fn on_seeked(&self, video: &MediaElement, audio: &mut MediaElement) {
        if self.attached {
            audio.position = video.position;
        }
    }

    /// Periodic drift check; true when the audio had to be pulled back in line
    pub fn on_time_update(&self, video: &MediaElement, audio: &mut MediaElement) -> bool {
        if !self.attached {
            return false;
        }
        let drift = (audio.position - video.position).abs();
        if drift > self.tolerance {
            debug!("Audio drifted {:.3}s, resyncing", drift);
            audio.position = video.position;
            return true;
        }
        false
    }
}

impl Default for AvSync {
    fn default() -> Self {
        Self::new(DEFAULT_DRIFT_TOLERANCE)
    }
}
