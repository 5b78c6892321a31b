// ABOUTME: End-to-end wizard flows through AppState: selection, generation, merge, publish and analytics

mod helpers;

use helpers::{FakeTranscoder, Harness};
use pretty_assertions::assert_eq;
use trendify::analytics::PostMedia;
use trendify::catalog::find_trend;
use trendify::config::AppConfig;
use trendify::wizard::review::VideoSource;
use trendify::wizard::{Platform, PublishStatus, Step};

fn select(h: &mut Harness, trend: &str, brand: &str) {
    h.state.wizard.select_trend(find_trend(trend).unwrap());
    if !brand.is_empty() {
        h.state.wizard.select_brand(brand).unwrap();
    }
    h.state.choose.sync_prompt(&h.state.wizard);
}

fn to_review(h: &mut Harness, trend: &str, brand: &str) {
    select(h, trend, brand);
    h.state.generate();
    h.run_for(20_000);
    assert_eq!(h.state.wizard.step(), Step::Review);
}

#[test]
fn test_full_flow_without_merge() {
    let mut h = Harness::new();
    to_review(&mut h, "ibiza-final-boss", "Nike");

    let review = h.state.review.as_ref().unwrap();
    assert_eq!(
        review.caption.text(),
        "Even the Ibiza final boss is waring Nike"
    );
    h.state.continue_to_publish();
    assert_eq!(
        h.state.wizard.hashtags(),
        ["#ibizafinalboss", "#finalboss", "#Ibiza"]
    );

    h.state.toggle_platform(Platform::Instagram);
    h.state.start_publish();
    h.run_for(10_000);

    let publish = h.state.publish.as_ref().unwrap();
    assert_eq!(publish.status(Platform::TikTok), PublishStatus::Done);
    assert_eq!(publish.status(Platform::Instagram), PublishStatus::Done);
    assert_eq!(publish.status(Platform::YouTube), PublishStatus::Idle);

    let newest = &h.state.feed.posts()[0];
    assert_eq!(h.state.feed.len(), 4);
    assert_eq!(newest.platform, Platform::TikTok);
    assert_eq!(
        newest.media,
        Some(PostMedia::Asset("/ibiza_boss.mp4".to_string()))
    );
    assert_eq!(newest.comments.len(), 2);
    assert!(newest.id.starts_with("new_"));
    let newest_id = newest.id.clone();

    h.state.toggle_analytics();
    assert_eq!(h.state.wizard.step(), Step::Analytics);
    assert_eq!(h.state.wizard.highlighted_post(), Some(newest_id.as_str()));
}

#[tokio::test]
async fn test_merge_then_publish_references_merged_clip() {
    let mut h = Harness::new();
    to_review(&mut h, "ok-garmin", "Tesla");

    h.state.review.as_mut().unwrap().toggle_attach();
    h.state.start_merge();
    assert!(h.state.review.as_ref().unwrap().is_merging());
    h.settle_merge().await;

    let review = h.state.review.as_ref().unwrap();
    assert!(review.merged_ready());
    assert!(!review.is_attached());
    let handle = h.state.wizard.merged().unwrap();
    assert_eq!(
        h.state.media.get(handle).unwrap().download_name,
        "merged_tesla_okgarmin.mp4"
    );

    h.state.continue_to_publish();
    h.state.export_merged();
    let exported = h.assets.path().join("exports").join("merged_tesla_okgarmin.mp4");
    assert_eq!(std::fs::read(exported).unwrap(), b"merged-mp4");

    h.state.start_publish();
    h.run_for(10_000);
    assert_eq!(
        h.state.feed.posts()[0].media,
        Some(PostMedia::Merged("merged_tesla_okgarmin.mp4".to_string()))
    );

    h.state.restart();
    assert!(!h.state.media.is_live(handle));
    assert_eq!(h.state.media.live_count(), 0);
}

#[tokio::test]
async fn test_merge_failure_keeps_original_clip() {
    let mut h = Harness::with_config(AppConfig::default(), FakeTranscoder { fail: true });
    to_review(&mut h, "italian-brainrot", "Apple");

    h.state.review.as_mut().unwrap().toggle_attach();
    h.state.start_merge();
    h.settle_merge().await;

    let review = h.state.review.as_ref().unwrap();
    assert_eq!(review.merge_error(), Some("FFmpeg not available"));
    assert!(!review.merged_ready());
    assert!(h.state.wizard.merged().is_none());

    // The trigger is usable again
    assert!(review.can_merge());
}

#[tokio::test]
async fn test_merge_result_after_restart_is_dropped() {
    let mut h = Harness::new();
    to_review(&mut h, "ok-garmin", "Tesla");
    h.state.review.as_mut().unwrap().toggle_attach();
    h.state.start_merge();
    h.state.restart();

    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        h.state.tick();
    }
    assert!(h.state.wizard.merged().is_none());
    assert_eq!(h.state.media.live_count(), 0);
}

#[tokio::test]
async fn test_merge_started_for_previous_trend_is_not_adopted() {
    let mut h = Harness::new();
    to_review(&mut h, "ok-garmin", "Tesla");
    h.state.review.as_mut().unwrap().toggle_attach();
    h.state.start_merge();

    h.state.go_back();
    h.state.go_back();
    assert_eq!(h.state.wizard.step(), Step::Choose);
    to_review(&mut h, "italian-brainrot", "Apple");

    // The first merge has not reported back, so the new screen stays locked
    assert!(h.state.is_merging());
    let review = h.state.review.as_mut().unwrap();
    review.toggle_attach();
    assert!(review.is_merging());
    assert!(!review.can_merge());
    h.state.start_merge();

    h.settle_merge().await;
    for _ in 0..20 {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        h.state.tick();
    }
    assert!(!h.state.is_merging());
    assert!(h.state.wizard.merged().is_none());
    assert_eq!(h.state.media.live_count(), 0);

    let review = h.state.review.as_ref().unwrap();
    assert!(!review.is_merging());
    assert!(review.can_merge());
    assert_eq!(review.source(), VideoSource::Asset("/apple_tungtung.mp4"));

    h.state.continue_to_publish();
    h.state.start_publish();
    h.run_for(10_000);
    assert_eq!(
        h.state.feed.posts()[0].media,
        Some(PostMedia::Asset("/apple_tungtung.mp4".to_string()))
    );
}

#[tokio::test]
async fn test_merged_clip_follows_only_its_own_trend() {
    let mut h = Harness::new();
    to_review(&mut h, "ok-garmin", "Tesla");
    h.state.review.as_mut().unwrap().toggle_attach();
    h.state.start_merge();
    h.settle_merge().await;
    let handle = h.state.wizard.merged().unwrap();

    h.state.go_back();
    h.state.go_back();
    to_review(&mut h, "ok-garmin", "Tesla");
    assert_eq!(h.state.wizard.merged(), Some(handle));

    h.state.go_back();
    h.state.go_back();
    to_review(&mut h, "italian-brainrot", "Apple");
    assert!(h.state.wizard.merged().is_none());
    assert!(!h.state.media.is_live(handle));
}

#[test]
fn test_relaxed_gating_without_brand() {
    let mut config = AppConfig::default();
    config.flow.strict_brand_gating = false;
    let mut h = Harness::with_config(config, FakeTranscoder::default());
    to_review(&mut h, "labubu", "");

    let review = h.state.review.as_ref().unwrap();
    assert_eq!(review.caption.text(), "Using Labubu for: your brand");
    assert!(!review.attach_available());
}

#[test]
fn test_back_walks_pipeline_and_keeps_selection() {
    let mut h = Harness::new();
    to_review(&mut h, "labubu", "Starbucks");
    h.state.continue_to_publish();

    h.state.go_back();
    assert_eq!(h.state.wizard.step(), Step::Review);
    assert!(h.state.publish.is_none());

    h.state.go_back();
    assert_eq!(h.state.wizard.step(), Step::Generating);
    h.state.go_back();
    assert_eq!(h.state.wizard.step(), Step::Choose);
    h.state.go_back();
    assert_eq!(h.state.wizard.step(), Step::Choose);
    assert_eq!(h.state.wizard.brand(), "Starbucks");
}

#[test]
fn test_missing_audio_asset_reported_on_review() {
    let mut h = Harness::new();
    std::fs::remove_file(h.assets.path().join("ibiza_boss.mp3")).unwrap();
    to_review(&mut h, "ibiza-final-boss", "Nike");

    let review = h.state.review.as_ref().unwrap();
    assert_eq!(review.audio_error(), Some("Could not load /ibiza_boss.mp3"));
}
