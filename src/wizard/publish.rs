// ABOUTME: Mock upload simulator for the publish step
// Each selected platform goes idle -> uploading -> done on a randomized timer;
// the "all done" notification fires once, after a short delay

use crate::config::TimingConfig;
use crate::timer::{SharedClock, TimerId, Timers};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
    YouTube,
}

impl Platform {
    pub const ALL: [Self; 3] = [Self::TikTok, Self::Instagram, Self::YouTube];

    pub fn id(self) -> &'static str {
        match self {
            Self::TikTok => "tiktok",
            Self::Instagram => "instagram",
            Self::YouTube => "youtube",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TikTok => "TikTok",
            Self::Instagram => "Instagram Reels",
            Self::YouTube => "YouTube Shorts",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishStatus {
    #[default]
    Idle,
    Uploading,
    Done,
}

impl PublishStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Queued",
            Self::Uploading => "Uploading…",
            Self::Done => "Uploaded ✓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadEvent {
    Finished(Platform),
    AllDone,
}

#[derive(Debug)]
pub struct PublishState {
    targets: Vec<Platform>,
    statuses: HashMap<Platform, PublishStatus>,
    started: bool,
    notified: bool,
    all_done_timer: Option<TimerId>,
    timers: Timers<UploadEvent>,
    rng: StdRng,
    base_delay: u64,
    stagger: u64,
    jitter: u64,
    all_done_delay: Duration,
}

impl PublishState {
    pub fn new(clock: SharedClock, timing: &TimingConfig, rng: StdRng) -> Self {
        Self {
            targets: vec![Platform::TikTok],
            statuses: HashMap::new(),
            started: false,
            notified: false,
            all_done_timer: None,
            timers: Timers::new(clock),
            rng,
            base_delay: timing.upload_base_delay_ms,
            stagger: timing.upload_stagger_ms,
            jitter: timing.upload_jitter_ms,
            all_done_delay: timing.all_done_delay(),
        }
    }

    pub fn targets(&self) -> &[Platform] {
        &self.targets
    }

    pub fn is_selected(&self, platform: Platform) -> bool {
        self.targets.contains(&platform)
    }

    pub fn status(&self, platform: Platform) -> PublishStatus {
        self.statuses.get(&platform).copied().unwrap_or_default()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn can_publish(&self) -> bool {
        !self.started && !self.targets.is_empty()
    }

    /// Every selected target has finished uploading
    pub fn all_done(&self) -> bool {
        !self.targets.is_empty()
            && self
                .targets
                .iter()
                .all(|p| self.status(*p) == PublishStatus::Done)
    }

    pub fn toggle(&mut self, platform: Platform) {
        if let Some(pos) = self.targets.iter().position(|p| *p == platform) {
            debug!("Deselected {}", platform.id());
            self.targets.remove(pos);
        } else {
            debug!("Selected {}", platform.id());
            self.targets.push(platform);
            if self.started {
                self.start_upload(platform, self.base_delay);
            }
        }
        self.update_all_done();
    }

    /// Start uploads for every selected target; false when nothing was started
    pub fn publish(&mut self) -> bool {
        if !self.can_publish() {
            return false;
        }
        info!(
            "Publishing to {}",
            self.targets.iter().map(|p| p.id()).collect::<Vec<_>>().join(", ")
        );
        self.started = true;
        for (i, platform) in self.targets.clone().into_iter().enumerate() {
            self.start_upload(platform, self.base_delay + i as u64 * self.stagger);
        }
        true
    }

    fn start_upload(&mut self, platform: Platform, base_ms: u64) {
        let jitter = self.rng.random::<f64>() * self.jitter as f64;
        let delay = Duration::from_millis(base_ms) + Duration::from_secs_f64(jitter / 1000.0);
        debug!("Uploading {} for {:?}", platform.id(), delay);
        self.statuses.insert(platform, PublishStatus::Uploading);
        self.timers.after(delay, UploadEvent::Finished(platform));
    }

    /// Apply due timers. Returns true on the one call that delivers "all done".
    pub fn tick(&mut self) -> bool {
        let mut notify = false;
        for (_, event) in self.timers.poll() {
            match event {
                UploadEvent::Finished(platform) => {
                    info!("Upload to {} finished", platform.id());
                    self.statuses.insert(platform, PublishStatus::Done);
                }
                UploadEvent::AllDone => {
                    self.all_done_timer = None;
                    if !self.notified && self.all_done() {
                        info!("All uploads finished");
                        self.notified = true;
                        notify = true;
                    }
                }
            }
        }
        self.update_all_done();
        notify
    }

    /// Arm the delayed notification when completion first holds; disarm it
    /// if completion stops holding before it fires
    fn update_all_done(&mut self) {
        if self.notified {
            return;
        }
        match (self.all_done(), self.all_done_timer) {
            (true, None) => {
                self.all_done_timer = Some(self.timers.after(self.all_done_delay, UploadEvent::AllDone));
            }
            (false, Some(id)) => {
                self.timers.cancel(id);
                self.all_done_timer = None;
            }
            _ => {}
        }
    }
}
