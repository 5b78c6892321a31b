// ABOUTME: Event handling system for keyboard input and app actions

use crate::app::AppState;
use crate::wizard::{ChooseFocus, Platform, ReviewFocus, Step};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    ToggleAnalytics,
    Back,
    NavigateTo(Step),
    DismissNotice,
    // Focus and cursor movement within the current step
    FocusNext,
    FocusPrev,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Activate,
    InputChar(char),
    Backspace,
    // Selection step
    Generate,
    // Review step
    TogglePlay,
    SeekForward,
    SeekBackward,
    CycleRate,
    ToggleAttach,
    VolumeUp,
    VolumeDown,
    GenerateMerged,
    ContinueToPublish,
    // Publish step
    TogglePlatform(Platform),
    Publish,
    ExportMerged,
    CreateAnother,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            return Some(AppEvent::Quit);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        // Blocking notice swallows everything until dismissed
        if state.wizard.step() == Step::Choose && state.choose.notice.is_some() {
            return match key_event.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(AppEvent::DismissNotice),
                _ => None,
            };
        }

        if Self::is_typing(state) {
            return Self::handle_text_input_keys(key_event, state);
        }

        match key_event.code {
            KeyCode::Char('q') => return Some(AppEvent::Quit),
            KeyCode::Char('?') => return Some(AppEvent::ToggleHelp),
            KeyCode::Char('a') if state.wizard.flags().analytics_enabled => {
                return Some(AppEvent::ToggleAnalytics);
            }
            KeyCode::Tab => return Some(AppEvent::FocusNext),
            KeyCode::BackTab => return Some(AppEvent::FocusPrev),
            KeyCode::Char(c @ '1'..='4') if state.wizard.step().in_pipeline() => {
                let idx = c as usize - '1' as usize;
                return Some(AppEvent::NavigateTo(Step::ORDER[idx]));
            }
            _ => {}
        }

        match state.wizard.step() {
            Step::Choose => Self::handle_choose_keys(key_event),
            Step::Generating => Self::handle_generating_keys(key_event),
            Step::Review => Self::handle_review_keys(key_event, state),
            Step::Publish => Self::handle_publish_keys(key_event, state),
            Step::Analytics => Self::handle_analytics_keys(key_event),
        }
    }

    fn is_typing(state: &AppState) -> bool {
        match state.wizard.step() {
            Step::Choose => state.choose.is_typing(),
            Step::Review => state.review.as_ref().is_some_and(|r| r.is_typing()),
            _ => false,
        }
    }

    fn handle_text_input_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let single_line = state
            .review
            .as_ref()
            .is_some_and(|r| r.focus == ReviewFocus::Hashtags);
        match key_event.code {
            KeyCode::Tab | KeyCode::Esc => Some(AppEvent::FocusNext),
            KeyCode::BackTab => Some(AppEvent::FocusPrev),
            KeyCode::Enter if single_line => Some(AppEvent::FocusNext),
            KeyCode::Enter => Some(AppEvent::InputChar('\n')),
            KeyCode::Left => Some(AppEvent::MoveLeft),
            KeyCode::Right => Some(AppEvent::MoveRight),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Char(c) => Some(AppEvent::InputChar(c)),
            _ => None,
        }
    }

    fn handle_choose_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Left | KeyCode::Char('h') => Some(AppEvent::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(AppEvent::MoveRight),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::FocusPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::FocusNext),
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::Activate),
            KeyCode::Char('g') => Some(AppEvent::Generate),
            _ => None,
        }
    }

    fn handle_generating_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('b') => Some(AppEvent::Back),
            _ => None,
        }
    }

    fn handle_review_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let focus = state.review.as_ref().map(|r| r.focus)?;
        match (focus, key_event.code) {
            (_, KeyCode::Esc | KeyCode::Char('b')) => Some(AppEvent::Back),
            (_, KeyCode::Char('c')) => Some(AppEvent::ContinueToPublish),
            (_, KeyCode::Char('m')) => Some(AppEvent::GenerateMerged),
            (_, KeyCode::Up) => Some(AppEvent::FocusPrev),
            (_, KeyCode::Down) => Some(AppEvent::FocusNext),
            (ReviewFocus::Player, KeyCode::Char(' ') | KeyCode::Enter) => {
                Some(AppEvent::TogglePlay)
            }
            (ReviewFocus::Player, KeyCode::Left) => Some(AppEvent::SeekBackward),
            (ReviewFocus::Player, KeyCode::Right) => Some(AppEvent::SeekForward),
            (ReviewFocus::Player, KeyCode::Char('r')) => Some(AppEvent::CycleRate),
            (ReviewFocus::Audio, KeyCode::Char(' ')) => Some(AppEvent::ToggleAttach),
            (ReviewFocus::Audio, KeyCode::Enter) => Some(AppEvent::GenerateMerged),
            (ReviewFocus::Audio, KeyCode::Left | KeyCode::Char('-')) => {
                Some(AppEvent::VolumeDown)
            }
            (ReviewFocus::Audio, KeyCode::Right | KeyCode::Char('+')) => Some(AppEvent::VolumeUp),
            (ReviewFocus::Continue, KeyCode::Enter) => Some(AppEvent::ContinueToPublish),
            _ => None,
        }
    }

    fn handle_publish_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let all_done = state.publish.as_ref().is_some_and(|p| p.all_done());
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('b') => Some(AppEvent::Back),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::MoveDown),
            KeyCode::Char(' ') => {
                let platform = Platform::ALL[state.publish_cursor % Platform::ALL.len()];
                Some(AppEvent::TogglePlatform(platform))
            }
            KeyCode::Char('t') => Some(AppEvent::TogglePlatform(Platform::TikTok)),
            KeyCode::Char('i') => Some(AppEvent::TogglePlatform(Platform::Instagram)),
            KeyCode::Char('y') => Some(AppEvent::TogglePlatform(Platform::YouTube)),
            KeyCode::Enter | KeyCode::Char('p') => Some(AppEvent::Publish),
            KeyCode::Char('d') => Some(AppEvent::ExportMerged),
            KeyCode::Char('n') if all_done => Some(AppEvent::CreateAnother),
            _ => None,
        }
    }

    fn handle_analytics_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::ToggleAnalytics),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::MoveDown),
            KeyCode::Char('n') => Some(AppEvent::CreateAnother),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Processing {:?} on {:?}", event, state.wizard.step());
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::ToggleAnalytics => state.toggle_analytics(),
            AppEvent::Back => state.go_back(),
            AppEvent::NavigateTo(step) => state.navigate_to(step),
            AppEvent::DismissNotice => state.choose.dismiss_notice(),
            AppEvent::FocusNext => Self::move_focus(state, true),
            AppEvent::FocusPrev => Self::move_focus(state, false),
            AppEvent::MoveLeft => Self::move_horizontal(state, false),
            AppEvent::MoveRight => Self::move_horizontal(state, true),
            AppEvent::MoveUp => Self::move_vertical(state, false),
            AppEvent::MoveDown => Self::move_vertical(state, true),
            AppEvent::Activate => Self::activate(state),
            AppEvent::InputChar(ch) => Self::input_char(state, ch),
            AppEvent::Backspace => Self::backspace(state),
            AppEvent::Generate => state.generate(),
            AppEvent::TogglePlay => Self::with_review(state, |r| r.toggle_play()),
            AppEvent::SeekForward => Self::with_review(state, |r| r.seek_forward()),
            AppEvent::SeekBackward => Self::with_review(state, |r| r.seek_backward()),
            AppEvent::CycleRate => Self::with_review(state, |r| r.cycle_rate()),
            AppEvent::ToggleAttach => Self::with_review(state, |r| {
                r.toggle_attach();
            }),
            AppEvent::VolumeUp => Self::with_review(state, |r| r.volume_up()),
            AppEvent::VolumeDown => Self::with_review(state, |r| r.volume_down()),
            AppEvent::GenerateMerged => state.start_merge(),
            AppEvent::ContinueToPublish => state.continue_to_publish(),
            AppEvent::TogglePlatform(platform) => state.toggle_platform(platform),
            AppEvent::Publish => state.start_publish(),
            AppEvent::ExportMerged => state.export_merged(),
            AppEvent::CreateAnother => state.restart(),
        }
    }

    fn with_review(state: &mut AppState, f: impl FnOnce(&mut crate::wizard::ReviewState)) {
        if let Some(review) = state.review.as_mut() {
            f(review);
        }
    }

    fn move_focus(state: &mut AppState, forward: bool) {
        match state.wizard.step() {
            Step::Choose if forward => state.choose.focus_next(),
            Step::Choose => state.choose.focus_prev(),
            Step::Review => Self::with_review(state, |r| {
                if forward {
                    r.focus_next();
                } else {
                    r.focus_prev();
                }
            }),
            Step::Publish => Self::move_vertical(state, forward),
            _ => {}
        }
    }

    fn move_horizontal(state: &mut AppState, right: bool) {
        match state.wizard.step() {
            Step::Choose if right => state.choose.move_right(),
            Step::Choose => state.choose.move_left(),
            Step::Review => Self::with_review(state, |r| {
                let editor = match r.focus {
                    ReviewFocus::Caption => &mut r.caption,
                    ReviewFocus::Hashtags => &mut r.hashtags,
                    _ => return,
                };
                if right {
                    editor.move_cursor_right();
                } else {
                    editor.move_cursor_left();
                }
            }),
            _ => {}
        }
    }

    fn move_vertical(state: &mut AppState, down: bool) {
        match state.wizard.step() {
            Step::Publish => {
                let len = Platform::ALL.len();
                state.publish_cursor = if down {
                    (state.publish_cursor + 1) % len
                } else {
                    (state.publish_cursor + len - 1) % len
                };
            }
            Step::Analytics => {
                let last = state.feed.len().saturating_sub(1);
                state.analytics_scroll = if down {
                    (state.analytics_scroll + 1).min(last)
                } else {
                    state.analytics_scroll.saturating_sub(1)
                };
            }
            _ => {}
        }
    }

    fn activate(state: &mut AppState) {
        if state.wizard.step() != Step::Choose {
            return;
        }
        let was_generate = state.choose.focus == ChooseFocus::Generate;
        if was_generate {
            state.generate();
            return;
        }
        // Incompatible brands are surfaced through the choose notice
        if state.choose.activate(&mut state.wizard).is_ok() {
            state.sync_step_states();
        }
    }

    fn input_char(state: &mut AppState, ch: char) {
        match state.wizard.step() {
            Step::Choose => state.choose.input_char(ch, &mut state.wizard),
            Step::Review => Self::with_review(state, |r| r.input_char(ch)),
            _ => {}
        }
    }

    fn backspace(state: &mut AppState) {
        match state.wizard.step() {
            Step::Choose => state.choose.backspace(&mut state.wizard),
            Step::Review => Self::with_review(state, |r| r.backspace()),
            _ => {}
        }
    }
}
