// ABOUTME: Fake generation progress screen

use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph},
};

use super::palette::{key_hint, panel, CORNFLOWER_BLUE, MUTED_GRAY, PANEL_BG, SOFT_WHITE};
use crate::app::AppState;

pub struct GeneratingComponent;

impl GeneratingComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = panel(" Generating your video ", true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let subject = match state.wizard.trend() {
            Some(trend) if !state.wizard.brand().is_empty() => {
                format!("{} × {}", trend.title, state.wizard.brand())
            }
            Some(trend) => trend.title.to_string(),
            None => String::new(),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(subject, Style::default().fg(SOFT_WHITE)))
                .alignment(Alignment::Center),
            chunks[1],
        );

        let percent = state.generating.as_ref().map_or(0, |g| g.percent());
        let gauge_area = centered_columns(chunks[2], 60);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(CORNFLOWER_BLUE).bg(PANEL_BG))
            .percent(percent)
            .label(format!("{percent}%"));
        frame.render_widget(gauge, gauge_area);

        let mut hint = vec![Span::styled(
            "Sit tight, the meme machine is warming up.   ",
            Style::default().fg(MUTED_GRAY),
        )];
        hint.extend(key_hint("Esc", "back"));
        frame.render_widget(
            Paragraph::new(Line::from(hint)).alignment(Alignment::Center),
            chunks[3],
        );
    }
}

impl Default for GeneratingComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_columns(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area)[1]
}
