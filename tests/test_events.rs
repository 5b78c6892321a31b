// ABOUTME: Tests for event handling to ensure keyboard inputs map to the right wizard actions

mod helpers;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helpers::Harness;
use trendify::app::{AppEvent, EventHandler};
use trendify::catalog::INCOMPATIBLE_BRAND_NOTICE;
use trendify::config::AppConfig;
use trendify::wizard::{Platform, ReviewFocus, Step};

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

/// Map and apply a key press, returning the mapped event
fn press(h: &mut Harness, code: KeyCode) -> Option<AppEvent> {
    let event = EventHandler::handle_key_event(create_key_event(code), &mut h.state);
    if let Some(event) = event.clone() {
        EventHandler::process_event(event, &mut h.state);
    }
    event
}

fn press_n(h: &mut Harness, code: KeyCode, times: usize) {
    for _ in 0..times {
        press(h, code);
    }
}

/// Select Ok Garmin and Tesla through the keyboard
fn choose_ok_garmin_tesla(h: &mut Harness) {
    press_n(h, KeyCode::Char('l'), 3);
    press(h, KeyCode::Enter);
    press(h, KeyCode::Tab);
    press_n(h, KeyCode::Char('l'), 4);
    press(h, KeyCode::Enter);
}

#[test]
fn test_quit_key_events() {
    let mut h = Harness::new();

    let quit = EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &mut h.state);
    assert_eq!(quit, Some(AppEvent::Quit));

    let force_quit = EventHandler::handle_key_event(
        create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut h.state,
    );
    assert_eq!(force_quit, Some(AppEvent::Quit));

    EventHandler::process_event(AppEvent::Quit, &mut h.state);
    assert!(h.state.should_quit);
}

#[test]
fn test_keyboard_selection_and_generate() {
    let mut h = Harness::new();
    choose_ok_garmin_tesla(&mut h);

    assert_eq!(h.state.wizard.trend().map(|t| t.id), Some("ok-garmin"));
    assert_eq!(h.state.wizard.brand(), "Tesla");
    assert!(h.state.choose.prompt.text().contains("for Tesla"));

    assert_eq!(press(&mut h, KeyCode::Char('g')), Some(AppEvent::Generate));
    assert_eq!(h.state.wizard.step(), Step::Generating);
}

#[test]
fn test_incompatible_brand_notice_blocks_input() {
    let mut h = Harness::new();
    // Labubu, then Apple
    press_n(&mut h, KeyCode::Char('l'), 2);
    press(&mut h, KeyCode::Enter);
    press(&mut h, KeyCode::Tab);
    press(&mut h, KeyCode::Enter);

    assert_eq!(h.state.choose.notice.as_deref(), Some(INCOMPATIBLE_BRAND_NOTICE));
    assert_eq!(h.state.wizard.brand(), "");

    // Everything except the dismiss keys is swallowed
    assert_eq!(press(&mut h, KeyCode::Char('q')), None);
    assert!(!h.state.should_quit);

    assert_eq!(press(&mut h, KeyCode::Enter), Some(AppEvent::DismissNotice));
    assert!(h.state.choose.notice.is_none());
}

#[test]
fn test_help_overlay_swallows_keys() {
    let mut h = Harness::new();
    press(&mut h, KeyCode::Char('?'));
    assert!(h.state.help_visible);

    assert_eq!(press(&mut h, KeyCode::Char('g')), None);
    assert_eq!(press(&mut h, KeyCode::Esc), Some(AppEvent::ToggleHelp));
    assert!(!h.state.help_visible);
}

#[test]
fn test_prompt_typing_does_not_trigger_shortcuts() {
    let mut h = Harness::new();
    choose_ok_garmin_tesla(&mut h);
    // Brands -> Prompt
    press(&mut h, KeyCode::Tab);
    assert!(h.state.choose.is_typing());

    assert_eq!(press(&mut h, KeyCode::Char('q')), Some(AppEvent::InputChar('q')));
    assert!(!h.state.should_quit);
    assert!(h.state.wizard.prompt().ends_with('q'));

    press(&mut h, KeyCode::Backspace);
    assert!(!h.state.wizard.prompt().ends_with('q'));
}

#[test]
fn test_analytics_toggle_key() {
    let mut h = Harness::new();
    press(&mut h, KeyCode::Char('a'));
    assert_eq!(h.state.wizard.step(), Step::Analytics);
    press(&mut h, KeyCode::Esc);
    assert_eq!(h.state.wizard.step(), Step::Choose);

    let mut config = AppConfig::default();
    config.flow.analytics_enabled = false;
    let mut disabled = Harness::with_config(config, helpers::FakeTranscoder::default());
    assert_eq!(press(&mut disabled, KeyCode::Char('a')), None);
    assert_eq!(disabled.state.wizard.step(), Step::Choose);
}

#[test]
fn test_review_and_publish_keys() {
    let mut h = Harness::new();
    choose_ok_garmin_tesla(&mut h);
    press(&mut h, KeyCode::Char('g'));
    h.run_for(20_000);
    assert_eq!(h.state.wizard.step(), Step::Review);

    // Caption is focused, so letters are typed
    assert_eq!(press(&mut h, KeyCode::Char('!')), Some(AppEvent::InputChar('!')));
    assert!(h.state.review.as_ref().unwrap().caption.text().ends_with('!'));

    // Caption -> Hashtags -> Audio
    press_n(&mut h, KeyCode::Tab, 2);
    assert_eq!(h.state.review.as_ref().unwrap().focus, ReviewFocus::Audio);
    press(&mut h, KeyCode::Char(' '));
    assert!(h.state.review.as_ref().unwrap().is_attached());
    press(&mut h, KeyCode::Left);
    assert_eq!(h.state.review.as_ref().unwrap().volume(), 95);

    assert_eq!(press(&mut h, KeyCode::Char('c')), Some(AppEvent::ContinueToPublish));
    assert_eq!(h.state.wizard.step(), Step::Publish);
    assert!(h.state.wizard.caption().ends_with('!'));

    press(&mut h, KeyCode::Char('y'));
    let publish = h.state.publish.as_ref().unwrap();
    assert!(publish.is_selected(Platform::TikTok));
    assert!(publish.is_selected(Platform::YouTube));

    // 'n' only restarts once every upload is done
    assert_eq!(press(&mut h, KeyCode::Char('n')), None);
    press(&mut h, KeyCode::Enter);
    h.run_for(10_000);
    assert!(h.state.publish.as_ref().unwrap().all_done());
    assert_eq!(press(&mut h, KeyCode::Char('n')), Some(AppEvent::CreateAnother));
    assert_eq!(h.state.wizard.step(), Step::Choose);
    assert!(h.state.wizard.trend().is_none());
}

#[test]
fn test_step_number_navigates_backwards_only() {
    let mut h = Harness::new();
    choose_ok_garmin_tesla(&mut h);
    press(&mut h, KeyCode::Char('g'));
    h.run_for(20_000);
    // Caption -> Hashtags -> Audio -> Continue
    press_n(&mut h, KeyCode::Tab, 3);
    press(&mut h, KeyCode::Enter);
    assert_eq!(h.state.wizard.step(), Step::Publish);

    press(&mut h, KeyCode::Char('4'));
    assert_eq!(h.state.wizard.step(), Step::Publish);
    press(&mut h, KeyCode::Char('1'));
    assert_eq!(h.state.wizard.step(), Step::Choose);
    // Selection survives navigation
    assert_eq!(h.state.wizard.brand(), "Tesla");
}
