// ABOUTME: Pipeline progress bar showing done, current and upcoming steps

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use super::palette::{panel, GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE};
use crate::wizard::{Step, StepStatus, WizardState};

pub struct StepIndicator;

impl StepIndicator {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, wizard: &WizardState) {
        let mut spans = Vec::new();
        for (i, step) in Step::ORDER.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" → ", Style::default().fg(MUTED_GRAY)));
            }
            let (dot, style) = match wizard.step_status(*step) {
                StepStatus::Done => ("●", Style::default().fg(SELECTION_GREEN)),
                StepStatus::Current => (
                    "◉",
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                ),
                StepStatus::Todo => ("○", Style::default().fg(MUTED_GRAY)),
            };
            spans.push(Span::styled(format!("{dot} "), style));
            let label_style = match wizard.step_status(*step) {
                StepStatus::Todo => Style::default().fg(MUTED_GRAY),
                _ => Style::default().fg(SOFT_WHITE),
            };
            spans.push(Span::styled(format!("{} {}", i + 1, step.label()), label_style));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(panel("", false));
        frame.render_widget(paragraph, area);
    }
}

impl Default for StepIndicator {
    fn default() -> Self {
        Self::new()
    }
}
