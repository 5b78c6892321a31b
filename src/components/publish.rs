// ABOUTME: Publish screen with platform targets, mock upload statuses and the merged download

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::palette::{
    button, key_hint, panel, CORNFLOWER_BLUE, GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE,
    WARNING_YELLOW,
};
use crate::app::AppState;
use crate::wizard::{Platform, PublishState, PublishStatus};

pub struct PublishComponent;

impl PublishComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(publish) = state.publish.as_ref() else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(7), Constraint::Length(3)])
            .split(columns[0]);

        self.render_targets(frame, left[0], state, publish);
        self.render_actions(frame, left[1], publish);
        self.render_preview(frame, columns[1], state);
    }

    fn render_targets(&self, frame: &mut Frame, area: Rect, state: &AppState, publish: &PublishState) {
        let mut lines = Vec::new();
        for (i, platform) in Platform::ALL.iter().enumerate() {
            let cursor = if state.publish_cursor == i { "▶ " } else { "  " };
            let check = if publish.is_selected(*platform) { "[x]" } else { "[ ]" };
            let status = publish.status(*platform);
            let status_style = match status {
                PublishStatus::Idle => Style::default().fg(MUTED_GRAY),
                PublishStatus::Uploading => Style::default().fg(WARNING_YELLOW),
                PublishStatus::Done => Style::default().fg(SELECTION_GREEN),
            };
            let mut spans = vec![
                Span::styled(cursor, Style::default().fg(GOLD)),
                Span::styled(format!("{check} "), Style::default().fg(SELECTION_GREEN)),
                Span::styled(
                    format!("{:<18}", platform.label()),
                    Style::default().fg(SOFT_WHITE),
                ),
            ];
            if publish.is_selected(*platform) {
                spans.push(Span::styled(status.label(), status_style));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        let mut hints = key_hint("t/i/y", "toggle");
        hints.push(Span::raw("  "));
        hints.extend(key_hint("Space", "toggle selected"));
        lines.push(Line::from(hints));

        let paragraph = Paragraph::new(lines).block(panel(" Platforms ", true));
        frame.render_widget(paragraph, area);
    }

    fn render_actions(&self, frame: &mut Frame, area: Rect, publish: &PublishState) {
        let spans = if publish.all_done() {
            let mut spans = vec![
                Span::styled("✓ All uploads finished   ", Style::default().fg(SELECTION_GREEN)),
            ];
            spans.extend(key_hint("n", "Create another"));
            spans
        } else if publish.started() {
            vec![Span::styled("Uploading…", Style::default().fg(WARNING_YELLOW))]
        } else {
            let mut spans = vec![button("Publish", true, publish.can_publish()), Span::raw("  ")];
            spans.extend(key_hint("Enter", "publish"));
            spans
        };
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(panel("", false)),
            area,
        );
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let caption = state.wizard.caption();
        let mut lines = vec![Line::from(Span::styled(
            if caption.is_empty() { "(no caption)" } else { caption },
            Style::default().fg(SOFT_WHITE),
        ))];
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            state.wizard.hashtags().join(" "),
            Style::default().fg(CORNFLOWER_BLUE),
        )));
        lines.push(Line::from(""));

        if let Some(blob) = state.wizard.merged().and_then(|h| state.media.get(h)) {
            let mut spans = key_hint("d", "Download merged video");
            spans.push(Span::styled(
                format!("  ({})", blob.download_name),
                Style::default().fg(MUTED_GRAY),
            ));
            lines.push(Line::from(spans));
        }

        let paragraph = Paragraph::new(lines)
            .block(panel(" Post preview ", false))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

impl Default for PublishComponent {
    fn default() -> Self {
        Self::new()
    }
}
