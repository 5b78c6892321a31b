// ABOUTME: Review step state: caption and hashtag fields, simulated player with
// optional companion audio, and the merge state machine

use crate::app::text_editor::TextEditor;
use crate::catalog::{self, Trend, TrendMedia};
use crate::media::sync::PLAYBACK_RATES;
use crate::media::{AssetStore, AvSync, MediaElement, MediaError, MediaHandle};
use tracing::{debug, info, warn};

const SEEK_STEP_SECS: f64 = 5.0;
const VOLUME_STEP: u8 = 5;

/// Split on whitespace, dropping empty tokens
pub fn parse_hashtags(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFocus {
    Player,
    Caption,
    Hashtags,
    Audio,
    Continue,
}

impl ReviewFocus {
    const ALL: [Self; 5] = [
        Self::Player,
        Self::Caption,
        Self::Hashtags,
        Self::Audio,
        Self::Continue,
    ];

    fn offset(self, by: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ALL[(idx + by).rem_euclid(len) as usize]
    }
}

/// What the player is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSource {
    Asset(&'static str),
    Merged(MediaHandle),
}

#[derive(Debug, Clone)]
pub struct ReviewState {
    media: TrendMedia,
    pub focus: ReviewFocus,
    pub caption: TextEditor,
    pub hashtags: TextEditor,
    video: MediaElement,
    audio: MediaElement,
    sync: AvSync,
    source: VideoSource,
    rate_index: usize,
    volume: u8,
    audio_error: Option<String>,
    merging: bool,
    merge_error: Option<String>,
    merged_ready: bool,
}

impl ReviewState {
    /// Fresh review screen for `trend`. The audio asset is checked on entry so
    /// a missing file shows up as an inline error.
    pub fn new(trend: &Trend, brand: &str, assets: &AssetStore, drift_tolerance: f64) -> Self {
        let media = trend.media();
        let audio_error = media
            .audio_src
            .filter(|src| !assets.exists(src))
            .map(|src| {
                warn!("Audio asset {} is missing", src);
                format!("Could not load {src}")
            });

        Self {
            media,
            focus: ReviewFocus::Caption,
            caption: TextEditor::from_string(&catalog::default_caption(trend, brand)),
            hashtags: TextEditor::from_string(&trend.default_hashtags.join(" ")),
            video: MediaElement::new(None),
            audio: MediaElement::new(None),
            sync: AvSync::new(drift_tolerance),
            source: VideoSource::Asset(media.video_src),
            rate_index: 0,
            volume: 100,
            audio_error,
            merging: false,
            merge_error: None,
            merged_ready: false,
        }
    }

    pub fn media(&self) -> TrendMedia {
        self.media
    }

    pub fn video(&self) -> &MediaElement {
        &self.video
    }

    pub fn audio(&self) -> &MediaElement {
        &self.audio
    }

    pub fn source(&self) -> VideoSource {
        self.source
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn audio_error(&self) -> Option<&str> {
        self.audio_error.as_deref()
    }

    pub fn merge_error(&self) -> Option<&str> {
        self.merge_error.as_deref()
    }

    pub fn is_merging(&self) -> bool {
        self.merging
    }

    /// Merged clip exists and the last attempt did not fail
    pub fn merged_ready(&self) -> bool {
        self.merged_ready && !self.merging && self.merge_error.is_none()
    }

    pub fn attach_available(&self) -> bool {
        self.media.audio_src.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attach_available() && self.sync.is_attached()
    }

    pub fn can_merge(&self) -> bool {
        self.is_attached() && !self.merging
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.focus, ReviewFocus::Caption | ReviewFocus::Hashtags)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.offset(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.offset(-1);
    }

    pub fn input_char(&mut self, ch: char) {
        match self.focus {
            ReviewFocus::Caption => self.caption.insert_char(ch),
            // Single-line field
            ReviewFocus::Hashtags if ch != '\n' => self.hashtags.insert_char(ch),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            ReviewFocus::Caption => self.caption.backspace(),
            ReviewFocus::Hashtags => self.hashtags.backspace(),
            _ => {}
        }
    }

    /// Returns false when the trend has no audio track to attach
    pub fn toggle_attach(&mut self) -> bool {
        if !self.attach_available() {
            return false;
        }
        self.audio_error = None;
        let attached = !self.sync.is_attached();
        debug!("Audio attached: {}", attached);
        self.sync.set_attached(attached, &mut self.video, &mut self.audio);
        true
    }

    pub fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
        self.audio.volume = f64::from(self.volume) / 100.0;
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.volume.saturating_add(VOLUME_STEP));
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.volume.saturating_sub(VOLUME_STEP));
    }

    pub fn toggle_play(&mut self) {
        if self.video.paused {
            self.video.play();
            self.sync.on_play(&self.video, &mut self.audio);
        } else {
            self.video.pause();
            self.sync.on_pause(&mut self.audio);
        }
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.video.seek(self.video.position + delta);
        self.sync.on_seeked(&self.video, &mut self.audio);
    }

    pub fn seek_forward(&mut self) {
        self.seek_by(SEEK_STEP_SECS);
    }

    pub fn seek_backward(&mut self) {
        self.seek_by(-SEEK_STEP_SECS);
    }

    pub fn cycle_rate(&mut self) {
        self.rate_index = (self.rate_index + 1) % PLAYBACK_RATES.len();
        self.video.rate = PLAYBACK_RATES[self.rate_index];
        self.sync.on_rate_change(&self.video, &mut self.audio);
    }

    /// Advance both playheads by `elapsed` seconds and run the drift check
    pub fn tick(&mut self, elapsed: f64) {
        let was_playing = !self.video.paused;
        self.video.advance(elapsed);
        self.audio.advance(elapsed);
        if was_playing && self.video.paused {
            self.sync.on_pause(&mut self.audio);
        }
        self.sync.on_time_update(&self.video, &mut self.audio);
    }

    /// Claim the merge trigger. Fails while a merge is already running.
    pub fn begin_merge(&mut self) -> Result<TrendMedia, MediaError> {
        if self.merging {
            return Err(MediaError::MergeInFlight);
        }
        if self.media.audio_src.is_none() {
            return Err(MediaError::NoAudioTrack);
        }
        info!("Merging {}", self.media.video_src);
        self.merging = true;
        self.merge_error = None;
        Ok(self.media)
    }

    /// Swap the player to the merged clip, keeping play state and dropping
    /// the external audio
    pub fn merge_succeeded(&mut self, handle: MediaHandle) {
        self.merging = false;
        self.merged_ready = true;
        self.sync.set_attached(false, &mut self.video, &mut self.audio);

        let was_playing = !self.video.paused;
        let mut video = MediaElement::new(None);
        video.rate = self.video.rate;
        video.muted = false;
        if was_playing {
            video.play();
        }
        self.video = video;
        self.source = VideoSource::Merged(handle);
    }

    /// Show a merge started on an earlier visit as still running
    pub fn resume_merge(&mut self) {
        self.merging = true;
        self.merge_error = None;
    }

    /// The running merge was for another selection; re-enable the trigger
    pub fn merge_discarded(&mut self) {
        self.merging = false;
    }

    pub fn merge_failed(&mut self, message: String) {
        warn!("Merge failed: {}", message);
        self.merging = false;
        self.merge_error = Some(message);
    }

    /// Caption and parsed hashtags handed to the publish step
    pub fn continue_values(&self) -> (String, Vec<String>) {
        (self.caption.text(), parse_hashtags(&self.hashtags.text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_trend;
    use crate::media::MediaStore;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn assets(files: &[&str]) -> (TempDir, AssetStore) {
        let dir = TempDir::new().unwrap();
        for name in files {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let store = AssetStore::new(dir.path());
        (dir, store)
    }

    fn garmin() -> (TempDir, ReviewState) {
        let (dir, store) = assets(&["tesla_okgarmin.mp4", "tesla_okgarmin.mp3"]);
        let state = ReviewState::new(find_trend("ok-garmin").unwrap(), "Tesla", &store, 0.3);
        (dir, state)
    }

    #[test]
    fn test_parse_hashtags() {
        assert_eq!(parse_hashtags(" #a   #b  "), vec!["#a", "#b"]);
        assert!(parse_hashtags("   ").is_empty());
        assert_eq!(parse_hashtags("#x\t#y\n#z"), vec!["#x", "#y", "#z"]);
    }

    #[test]
    fn test_defaults_from_trend_and_brand() {
        let (_dir, state) = garmin();
        assert_eq!(state.caption.text(), "Activate the autopilot anytime");
        assert_eq!(
            state.hashtags.text(),
            "#garmin #okaygarmin #okgarmin #videospeichern #dashcam"
        );
        assert!(state.audio_error().is_none());
        assert_eq!(state.source(), VideoSource::Asset("/tesla_okgarmin.mp4"));
    }

    #[test]
    fn test_missing_audio_asset_reports_path() {
        let (_dir, store) = assets(&["ibiza_boss.mp4"]);
        let state = ReviewState::new(find_trend("ibiza-final-boss").unwrap(), "Nike", &store, 0.3);
        assert_eq!(state.audio_error(), Some("Could not load /ibiza_boss.mp3"));
    }

    #[test]
    fn test_attach_disabled_without_audio() {
        let (_dir, store) = assets(&[]);
        let mut state = ReviewState::new(find_trend("labubu").unwrap(), "Starbucks", &store, 0.3);
        assert!(!state.toggle_attach());
        assert!(!state.is_attached());
        assert!(matches!(state.begin_merge(), Err(MediaError::NoAudioTrack)));
    }

    #[test]
    fn test_attach_mirrors_transport() {
        let (_dir, mut state) = garmin();
        state.toggle_attach();
        assert!(state.video().muted);

        state.toggle_play();
        assert!(!state.audio().paused);

        state.cycle_rate();
        assert_eq!(state.audio().rate, 1.25);

        state.seek_forward();
        assert_eq!(state.audio().position, 5.0);

        state.toggle_play();
        assert!(state.audio().paused);

        state.toggle_attach();
        assert!(!state.video().muted);
    }

    #[test]
    fn test_volume_clamped() {
        let (_dir, mut state) = garmin();
        state.volume_up();
        assert_eq!(state.volume(), 100);
        for _ in 0..30 {
            state.volume_down();
        }
        assert_eq!(state.volume(), 0);
        assert_eq!(state.audio().volume, 0.0);
        state.set_volume(250);
        assert_eq!(state.volume(), 100);
    }

    #[test]
    fn test_merge_in_flight_is_rejected() {
        let (_dir, mut state) = garmin();
        state.toggle_attach();
        assert!(state.can_merge());
        state.begin_merge().unwrap();
        assert!(!state.can_merge());
        assert!(matches!(state.begin_merge(), Err(MediaError::MergeInFlight)));
    }

    #[test]
    fn test_resumed_merge_blocks_trigger_until_discarded() {
        let (_dir, mut state) = garmin();
        state.toggle_attach();
        state.resume_merge();
        assert!(!state.can_merge());
        assert!(matches!(state.begin_merge(), Err(MediaError::MergeInFlight)));

        state.merge_discarded();
        assert!(state.can_merge());
        assert!(state.merge_error().is_none());
        assert_eq!(state.source(), VideoSource::Asset("/tesla_okgarmin.mp4"));
    }

    #[test]
    fn test_merge_success_swaps_source_and_keeps_play_state() {
        let (_dir, mut state) = garmin();
        let mut store = MediaStore::new();
        state.toggle_attach();
        state.toggle_play();
        state.begin_merge().unwrap();

        let handle = store.create(vec![1], "merged_tesla_okgarmin.mp4");
        state.merge_succeeded(handle);

        assert_eq!(state.source(), VideoSource::Merged(handle));
        assert!(!state.video().paused);
        assert!(!state.video().muted);
        assert!(state.audio().paused);
        assert!(!state.is_attached());
        assert!(state.merged_ready());
    }

    #[test]
    fn test_merge_failure_is_retryable() {
        let (_dir, mut state) = garmin();
        state.toggle_attach();
        state.begin_merge().unwrap();
        state.merge_failed("FFmpeg not available".to_string());

        assert_eq!(state.merge_error(), Some("FFmpeg not available"));
        assert_eq!(state.source(), VideoSource::Asset("/tesla_okgarmin.mp4"));
        assert!(state.can_merge());
        state.begin_merge().unwrap();
        assert!(state.merge_error().is_none());
    }

    #[test]
    fn test_continue_values_parse_hashtags() {
        let (_dir, mut state) = garmin();
        state.focus = ReviewFocus::Hashtags;
        state.hashtags.clear();
        for ch in "  #one   #two ".chars() {
            state.input_char(ch);
        }
        let (caption, tags) = state.continue_values();
        assert_eq!(caption, "Activate the autopilot anytime");
        assert_eq!(tags, vec!["#one", "#two"]);
    }

    #[test]
    fn test_tick_resyncs_drift() {
        let (_dir, mut state) = garmin();
        state.toggle_attach();
        state.toggle_play();
        state.audio.position = 2.0;
        state.tick(0.1);
        assert!((state.audio().position - state.video().position).abs() < 1e-9);
    }
}
