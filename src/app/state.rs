// ABOUTME: Root application state: wizard, media store, analytics feed and the
// per-step states mounted for the current screen, plus the tick that drives them

use crate::analytics::{self, AnalyticsFeed};
use crate::catalog::TrendMedia;
use crate::config::AppConfig;
use crate::media::{AssetStore, FfmpegTranscoder, MediaError, MediaStore, Muxer, Transcoder};
use crate::timer::{SharedClock, SystemClock};
use crate::wizard::{
    ChooseState, GeneratingState, Platform, PublishState, ReviewState, Step, WizardError,
    WizardState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

/// Shown on the selection screen after a review was requested without a trend
pub const MISSING_TREND_NOTICE: &str = "Pick a trend before reviewing your video.";

/// Notification system for TUI messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Success,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Error,
            created_at: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    pub fn info(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Info,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn warning(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Warning,
            created_at: Instant::now(),
            duration: Duration::from_secs(4),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Result of a background merge, tagged with the flow and trend it was started for
#[derive(Debug)]
struct MergeOutcome {
    epoch: u64,
    trend: &'static str,
    media: TrendMedia,
    result: Result<Vec<u8>, MediaError>,
}

#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub wizard: WizardState,
    pub media: MediaStore,
    pub feed: AnalyticsFeed,

    // Step-local state; `None` while the step is not on screen
    pub choose: ChooseState,
    pub generating: Option<GeneratingState>,
    pub review: Option<ReviewState>,
    pub publish: Option<PublishState>,

    /// Platform row under the cursor on the publish screen
    pub publish_cursor: usize,
    /// First visible post on the analytics screen
    pub analytics_scroll: usize,
    pub sparkline: [u64; analytics::SPARKLINE_LEN],

    pub help_visible: bool,
    pub should_quit: bool,
    pub notifications: Vec<Notification>,
    // Pending event to be processed in next loop iteration
    pub pending_event: Option<crate::app::events::AppEvent>,

    clock: SharedClock,
    rng: StdRng,
    assets: AssetStore,
    muxer: Arc<Mutex<Muxer>>,
    merge_tx: mpsc::UnboundedSender<MergeOutcome>,
    merge_rx: mpsc::UnboundedReceiver<MergeOutcome>,
    /// Trend id of the merge running in the background. Outlives the review
    /// screen so leaving and re-entering cannot start a second merge.
    merge_in_flight: Option<&'static str>,
    /// Bumped on every restart so late merge results from an old flow are dropped
    flow_epoch: u64,
    mounted_step: Step,
    last_playback: Duration,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        clock: SharedClock,
        mut rng: StdRng,
        engine: Box<dyn Transcoder>,
    ) -> Self {
        let wizard = WizardState::new(config.flow.flags());
        let assets = AssetStore::new(config.media.assets_dir.clone());
        let muxer = Muxer::new(engine, assets.clone());
        let (merge_tx, merge_rx) = mpsc::unbounded_channel();
        let sparkline = analytics::sparkline(&mut rng);
        let last_playback = clock.now();

        Self {
            choose: ChooseState::new(&wizard),
            config,
            wizard,
            media: MediaStore::new(),
            feed: AnalyticsFeed::seeded(chrono::Utc::now()),
            generating: None,
            review: None,
            publish: None,
            publish_cursor: 0,
            analytics_scroll: 0,
            sparkline,
            help_visible: false,
            should_quit: false,
            notifications: Vec::new(),
            pending_event: None,
            clock,
            rng,
            assets,
            muxer: Arc::new(Mutex::new(muxer)),
            merge_tx,
            merge_rx,
            merge_in_flight: None,
            flow_epoch: 0,
            mounted_step: Step::Choose,
            last_playback,
        }
    }

    pub fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn cleanup_expired_notifications(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Report a rejected transition without leaving the current screen
    pub fn report(&mut self, err: &WizardError) {
        debug!("Transition rejected: {}", err);
        match err {
            WizardError::IncompatibleBrand { .. } => {}
            WizardError::MissingTrend => {
                self.choose.notice = Some(MISSING_TREND_NOTICE.to_string());
            }
            WizardError::StepLocked { .. } => {
                self.add_notification(Notification::info(
                    "Finish the current step first".to_string(),
                ));
            }
            other => self.add_notification(Notification::warning(other.to_string())),
        }
    }

    /// Mount the state of the step now on screen and tear down the others.
    /// Dropping a step state drops its timers with it.
    pub fn sync_step_states(&mut self) {
        let step = self.wizard.step();
        let entered = step != self.mounted_step;

        if step != Step::Generating {
            self.generating = None;
        } else if self.generating.is_none() {
            let rng = StdRng::from_rng(&mut self.rng);
            self.generating = Some(GeneratingState::new(
                Arc::clone(&self.clock),
                &self.config.timing,
                rng,
            ));
        }

        if step != Step::Review {
            self.review = None;
        } else if self.review.is_none() {
            if let Some(trend) = self.wizard.trend() {
                self.discard_foreign_merge(trend.media());
                let mut review = ReviewState::new(
                    trend,
                    self.wizard.brand(),
                    &self.assets,
                    self.config.timing.drift_tolerance_secs,
                );
                if self.merge_in_flight.is_some() {
                    review.resume_merge();
                }
                self.review = Some(review);
                self.last_playback = self.clock.now();
            }
        }

        if step != Step::Publish {
            self.publish = None;
        } else if self.publish.is_none() {
            let rng = StdRng::from_rng(&mut self.rng);
            self.publish = Some(PublishState::new(
                Arc::clone(&self.clock),
                &self.config.timing,
                rng,
            ));
            self.publish_cursor = 0;
        }

        if entered {
            match step {
                Step::Choose => {
                    let notice = self.choose.notice.take();
                    self.choose = ChooseState::new(&self.wizard);
                    self.choose.notice = notice;
                }
                Step::Analytics => {
                    self.sparkline = analytics::sparkline(&mut self.rng);
                    self.analytics_scroll = 0;
                }
                _ => {}
            }
            self.mounted_step = step;
        }
    }

    /// Apply a transition result, then remount step states
    pub fn apply(&mut self, result: Result<(), WizardError>) {
        if let Err(e) = result {
            self.report(&e);
        }
        self.sync_step_states();
    }

    pub fn generate(&mut self) {
        let result = self.wizard.start_generation();
        if let Err(WizardError::CannotGenerate) = result {
            self.add_notification(Notification::info(
                "Pick a trend and a matching brand first".to_string(),
            ));
            return;
        }
        self.apply(result);
    }

    pub fn go_back(&mut self) {
        let result = self.wizard.back();
        self.apply(result);
    }

    pub fn navigate_to(&mut self, step: Step) {
        let result = self.wizard.navigate_to(step);
        self.apply(result);
    }

    pub fn toggle_analytics(&mut self) {
        if self.wizard.step() == Step::Analytics {
            self.wizard.close_analytics();
            self.sync_step_states();
        } else {
            let result = self.wizard.open_analytics();
            self.apply(result);
        }
    }

    pub fn continue_to_publish(&mut self) {
        if let Some(review) = &self.review {
            let (caption, hashtags) = review.continue_values();
            self.wizard.continue_to_publish(caption, hashtags);
            self.sync_step_states();
        }
    }

    /// A merged clip made for another trend must not follow the user into
    /// this review or the post published from it
    fn discard_foreign_merge(&mut self, media: TrendMedia) {
        let Some(handle) = self.wizard.merged() else {
            return;
        };
        let matches = self
            .media
            .get(handle)
            .is_some_and(|blob| blob.download_name == media.merged_download_name);
        if !matches {
            info!("Trend changed, dropping merged clip {}", handle);
            self.wizard.discard_merged(&mut self.media);
        }
    }

    /// Whether a background merge has not reported back yet
    pub fn is_merging(&self) -> bool {
        self.merge_in_flight.is_some()
    }

    /// Start the audio/video merge in the background. The trigger stays
    /// disabled until the outcome arrives.
    pub fn start_merge(&mut self) {
        if let Some(trend) = self.merge_in_flight {
            debug!("Merge for {} still running", trend);
            return;
        }
        let Some(trend) = self.wizard.trend() else {
            return;
        };
        let Some(review) = self.review.as_mut() else {
            return;
        };
        let media = match review.begin_merge() {
            Ok(media) => media,
            Err(e) => {
                debug!("Merge not started: {}", e);
                return;
            }
        };

        self.merge_in_flight = Some(trend.id);
        let muxer = Arc::clone(&self.muxer);
        let tx = self.merge_tx.clone();
        let epoch = self.flow_epoch;
        let trend = trend.id;
        tokio::spawn(async move {
            let result = muxer.lock().await.merge(&media).await;
            let outcome = MergeOutcome {
                epoch,
                trend,
                media,
                result,
            };
            if tx.send(outcome).is_err() {
                warn!("Merge finished after the app shut down");
            }
        });
    }

    fn drain_merge_outcomes(&mut self) {
        while let Ok(outcome) = self.merge_rx.try_recv() {
            self.apply_merge_outcome(outcome);
        }
    }

    fn apply_merge_outcome(&mut self, outcome: MergeOutcome) {
        self.merge_in_flight = None;
        let current = self.wizard.trend().map(|t| t.id);
        if outcome.epoch != self.flow_epoch || current != Some(outcome.trend) {
            info!("Dropping merge result for {} from an earlier selection", outcome.trend);
            if let Some(review) = self.review.as_mut() {
                review.merge_discarded();
            }
            return;
        }
        let review = self.review.as_mut().filter(|r| r.is_merging());
        match outcome.result {
            Ok(bytes) => {
                let handle = self.media.create(bytes, outcome.media.merged_download_name);
                self.wizard.set_merged(handle, &mut self.media);
                if let Some(review) = review {
                    review.merge_succeeded(handle);
                }
                self.add_notification(Notification::success(
                    "Merged video ready. You can download it in the Publish step.".to_string(),
                ));
            }
            Err(e) => {
                error!("Merge failed: {}", e);
                if let Some(review) = review {
                    review.merge_failed(e.to_string());
                }
            }
        }
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        if let Some(publish) = self.publish.as_mut() {
            publish.toggle(platform);
        }
    }

    pub fn start_publish(&mut self) {
        if let Some(publish) = self.publish.as_mut() {
            if !publish.publish() {
                self.add_notification(Notification::info(
                    "Select at least one platform".to_string(),
                ));
            }
        }
    }

    /// Write the merged clip to the export directory
    pub fn export_merged(&mut self) {
        let Some(handle) = self.wizard.merged() else {
            self.add_notification(Notification::info("No merged video yet".to_string()));
            return;
        };
        match self.media.export(handle, &self.config.media.export_dir) {
            Ok(path) => self.add_notification(Notification::success(format!(
                "Saved {}",
                path.display()
            ))),
            Err(e) => {
                error!("Export failed: {}", e);
                self.add_notification(Notification::error(e.to_string()));
            }
        }
    }

    /// "Create another": back to a fresh selection
    pub fn restart(&mut self) {
        if self.wizard.step() == Step::Analytics {
            self.wizard.clear_highlight();
        }
        self.wizard.reset(&mut self.media);
        self.flow_epoch += 1;
        self.choose.notice = None;
        self.sync_step_states();
    }

    fn on_publish_complete(&mut self) {
        self.add_notification(Notification::success("All uploads finished".to_string()));
        if !self.wizard.flags().analytics_enabled {
            return;
        }
        let post = analytics::synthesize_post(
            &self.wizard,
            &self.media,
            chrono::Utc::now(),
            &mut self.rng,
        );
        self.wizard.highlight_post(post.id.clone());
        self.feed.prepend(post);
    }

    /// Advance every mounted step by the time elapsed since the last tick
    pub fn tick(&mut self) {
        self.cleanup_expired_notifications();
        self.drain_merge_outcomes();

        let finished = self.generating.as_mut().is_some_and(GeneratingState::tick);
        if finished {
            let result = self.wizard.finish_generation();
            self.apply(result);
        }

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_playback);
        self.last_playback = now;
        if let Some(review) = self.review.as_mut() {
            review.tick(elapsed.as_secs_f64());
        }

        let all_done = self.publish.as_mut().is_some_and(PublishState::tick);
        if all_done {
            self.on_publish_complete();
        }
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    /// Application wired to the real clock, OS entropy and ffmpeg
    pub fn new(config: AppConfig) -> Self {
        let engine = FfmpegTranscoder::new(config.media.ffmpeg_path.clone());
        let clock: SharedClock = Arc::new(SystemClock::new());
        Self {
            state: AppState::new(config, clock, StdRng::from_os_rng(), Box::new(engine)),
        }
    }

    pub fn tick(&mut self) {
        self.state.tick();
    }
}
