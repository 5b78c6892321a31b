// ABOUTME: Review screen: simulated player, caption and hashtag editors, audio attach and merge

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::palette::{
    button, key_hint, panel, ERROR_RED, GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE,
    WARNING_YELLOW,
};
use super::text_field::render_text_field;
use crate::app::AppState;
use crate::wizard::review::VideoSource;
use crate::wizard::{ReviewFocus, ReviewState};

pub struct ReviewComponent;

impl ReviewComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(review) = state.review.as_ref() else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.render_player(frame, columns[0], state, review);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),    // Caption
                Constraint::Length(3), // Hashtags
                Constraint::Length(7), // Audio
                Constraint::Length(3), // Continue
            ])
            .split(columns[1]);

        render_text_field(
            frame,
            rows[0],
            " Caption ",
            &review.caption,
            review.focus == ReviewFocus::Caption,
            "Write a caption...",
        );
        render_text_field(
            frame,
            rows[1],
            " Hashtags ",
            &review.hashtags,
            review.focus == ReviewFocus::Hashtags,
            "#meme #trend",
        );
        self.render_audio(frame, rows[2], review);

        let focused = review.focus == ReviewFocus::Continue;
        let mut spans = vec![button("Continue to publish", focused, true), Span::raw("   ")];
        spans.extend(key_hint("c", "continue"));
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(panel("", focused)),
            rows[3],
        );
    }

    fn render_player(&self, frame: &mut Frame, area: Rect, state: &AppState, review: &ReviewState) {
        let focused = review.focus == ReviewFocus::Player;
        let video = review.video();

        let source = match review.source() {
            VideoSource::Asset(src) => src.to_string(),
            VideoSource::Merged(handle) => state
                .media
                .get(handle)
                .map_or_else(|| "merged video".to_string(), |b| b.download_name.clone()),
        };
        let (play_icon, play_label) = if video.paused {
            ("⏸", "Paused")
        } else {
            ("▶", "Playing")
        };

        let mut lines = vec![
            Line::from(Span::styled(
                source,
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{play_icon} {play_label}"), Style::default().fg(GOLD)),
                Span::styled(
                    format!("   {}   {}x", format_time(video.position), video.rate),
                    Style::default().fg(SOFT_WHITE),
                ),
            ]),
        ];
        if video.muted {
            lines.push(Line::from(Span::styled(
                "🔇 Muted (external audio attached)",
                Style::default().fg(MUTED_GRAY),
            )));
        }
        if matches!(review.source(), VideoSource::Merged(_)) {
            lines.push(Line::from(Span::styled(
                "Showing merged video",
                Style::default().fg(SELECTION_GREEN),
            )));
        }
        lines.push(Line::from(""));
        let mut hints = key_hint("Space", "play/pause");
        hints.push(Span::raw("  "));
        hints.extend(key_hint("←/→", "seek 5s"));
        hints.push(Span::raw("  "));
        hints.extend(key_hint("r", "rate"));
        lines.push(Line::from(hints));

        let paragraph = Paragraph::new(lines)
            .block(panel(" Preview ", focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_audio(&self, frame: &mut Frame, area: Rect, review: &ReviewState) {
        let focused = review.focus == ReviewFocus::Audio;
        let mut lines = Vec::new();

        if review.attach_available() {
            let check = if review.is_attached() { "[x]" } else { "[ ]" };
            lines.push(Line::from(vec![
                Span::styled(format!("{check} "), Style::default().fg(SELECTION_GREEN)),
                Span::styled("Attach audio track", Style::default().fg(SOFT_WHITE)),
                Span::styled(
                    format!("   Volume {}%", review.volume()),
                    Style::default().fg(MUTED_GRAY),
                ),
            ]));
            lines.push(Line::from(vec![
                button("Generate merged video", focused, review.can_merge()),
                Span::raw("  "),
                Span::styled("[m]", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                "This trend has no separate audio track",
                Style::default().fg(MUTED_GRAY),
            )));
        }

        if review.is_merging() {
            lines.push(Line::from(Span::styled(
                "Merging…",
                Style::default().fg(WARNING_YELLOW),
            )));
        } else if let Some(err) = review.merge_error() {
            lines.push(Line::from(Span::styled(
                format!("Merge failed: {err}"),
                Style::default().fg(ERROR_RED),
            )));
        } else if review.merged_ready() {
            lines.push(Line::from(Span::styled(
                "✓ Merged video ready",
                Style::default().fg(SELECTION_GREEN),
            )));
        }
        if let Some(err) = review.audio_error() {
            lines.push(Line::from(Span::styled(err, Style::default().fg(ERROR_RED))));
        }

        let paragraph = Paragraph::new(lines)
            .block(panel(" Audio ", focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

impl Default for ReviewComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds as m:ss
fn format_time(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
