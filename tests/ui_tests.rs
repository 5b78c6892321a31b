// ABOUTME: Headless rendering tests for every screen using ratatui's TestBackend

mod helpers;

use helpers::{FakeTranscoder, Harness};
use ratatui::{backend::TestBackend, Terminal};
use trendify::catalog::{find_trend, INCOMPATIBLE_BRAND_NOTICE};
use trendify::components::LayoutComponent;
use trendify::config::AppConfig;

pub struct UITestFramework {
    harness: Harness,
    terminal: Terminal<TestBackend>,
    layout: LayoutComponent,
}

impl UITestFramework {
    pub fn new() -> Self {
        Self::with_harness(Harness::new())
    }

    pub fn with_harness(harness: Harness) -> Self {
        let backend = TestBackend::new(120, 40); // Standard terminal size
        let terminal = Terminal::new(backend).unwrap();
        Self {
            harness,
            terminal,
            layout: LayoutComponent::new(),
        }
    }

    pub fn render(&mut self) {
        let state = &self.harness.state;
        let layout = &mut self.layout;
        self.terminal
            .draw(|frame| layout.render(frame, state))
            .unwrap();
    }

    /// Rendered screen as text, one line per row
    pub fn screen(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn assert_contains(&self, text: &str) {
        let screen = self.screen();
        assert!(screen.contains(text), "expected {text:?} on screen:\n{screen}");
    }

    pub fn assert_not_contains(&self, text: &str) {
        let screen = self.screen();
        assert!(!screen.contains(text), "did not expect {text:?} on screen:\n{screen}");
    }

    fn select(&mut self, trend: &str, brand: &str) {
        let state = &mut self.harness.state;
        state.wizard.select_trend(find_trend(trend).unwrap());
        state.wizard.select_brand(brand).unwrap();
        state.choose.sync_prompt(&state.wizard);
    }

    fn to_review(&mut self, trend: &str, brand: &str) {
        self.select(trend, brand);
        self.harness.state.generate();
        self.harness.run_for(20_000);
    }
}

#[test]
fn test_choose_screen_renders_catalog() {
    let mut ui = UITestFramework::new();
    ui.render();

    ui.assert_contains("Keep up with the Memes");
    ui.assert_contains("Select Trend");
    ui.assert_contains("Choose a trend");
    ui.assert_contains("Italian Brainrot");
    ui.assert_contains("Ok Garmin");
    ui.assert_contains("Starbucks");
    ui.assert_contains("Generate video");
    ui.assert_contains("Pick a trend first");
    ui.assert_contains("View analytics");
}

#[test]
fn test_generating_screen_shows_progress() {
    let mut ui = UITestFramework::new();
    ui.select("labubu", "Starbucks");
    ui.harness.state.generate();
    ui.render();

    ui.assert_contains("Generating your video");
    ui.assert_contains("0%");
    ui.assert_contains("Labubu");
}

#[test]
fn test_review_screen_sections() {
    let mut ui = UITestFramework::new();
    ui.to_review("ok-garmin", "Tesla");
    ui.render();

    ui.assert_contains("Preview");
    ui.assert_contains("/tesla_okgarmin.mp4");
    ui.assert_contains("Activate the autopilot anytime");
    ui.assert_contains("#okgarmin");
    ui.assert_contains("Attach audio track");
    ui.assert_contains("Continue to publish");
}

#[test]
fn test_review_without_audio_track() {
    let mut ui = UITestFramework::new();
    ui.to_review("labubu", "Starbucks");
    ui.render();

    ui.assert_contains("no separate audio track");
    ui.assert_not_contains("Attach audio track");
}

#[test]
fn test_publish_screen_statuses() {
    let mut ui = UITestFramework::new();
    ui.to_review("ok-garmin", "Tesla");
    ui.harness.state.continue_to_publish();
    ui.render();

    ui.assert_contains("Platforms");
    ui.assert_contains("Instagram Reels");
    ui.assert_contains("YouTube Shorts");
    ui.assert_contains("Queued");

    ui.harness.state.start_publish();
    ui.harness.run_for(10_000);
    ui.render();
    ui.assert_contains("Uploaded");
    ui.assert_contains("Create another");
}

#[test]
fn test_analytics_screen() {
    let mut ui = UITestFramework::new();
    ui.harness.state.toggle_analytics();
    ui.render();

    ui.assert_contains("Posts (3)");
    ui.assert_contains("235,420");
    ui.assert_contains("128,400 views");
    ui.assert_contains("Likes by platform");
    ui.assert_contains("Close analytics");
    // The step indicator is only shown inside the pipeline
    ui.assert_not_contains("Generate Video");
}

#[test]
fn test_overlays() {
    let mut ui = UITestFramework::new();
    ui.harness.state.toggle_help();
    ui.render();
    ui.assert_contains("Help - Press ? or Esc to close");

    ui.harness.state.toggle_help();
    ui.harness.state.choose.notice = Some(INCOMPATIBLE_BRAND_NOTICE.to_string());
    ui.render();
    ui.assert_contains("Heads up");
}

#[test]
fn test_footer_and_analytics_action_follow_config() {
    let mut config = AppConfig::default();
    config.ui.show_footer = false;
    config.flow.analytics_enabled = false;
    let mut ui = UITestFramework::with_harness(Harness::with_config(
        config,
        FakeTranscoder::default(),
    ));
    ui.render();

    ui.assert_not_contains("Mock demo");
    ui.assert_not_contains("View analytics");
}
