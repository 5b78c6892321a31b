// ABOUTME: Top-level screen layout: header, step indicator, current step, footer and overlays

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::analytics::AnalyticsComponent;
use super::choose::ChooseComponent;
use super::generating::GeneratingComponent;
use super::help::{centered_rect, HelpComponent};
use super::palette::{
    button, key_hint, CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG,
    SELECTION_GREEN, SOFT_WHITE, WARNING_YELLOW,
};
use super::publish::PublishComponent;
use super::review::ReviewComponent;
use super::step_indicator::StepIndicator;
use crate::app::state::{AppState, NotificationType};
use crate::wizard::Step;

pub struct LayoutComponent {
    steps: StepIndicator,
    choose: ChooseComponent,
    generating: GeneratingComponent,
    review: ReviewComponent,
    publish: PublishComponent,
    analytics: AnalyticsComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            steps: StepIndicator::new(),
            choose: ChooseComponent::new(),
            generating: GeneratingComponent::new(),
            review: ReviewComponent::new(),
            publish: PublishComponent::new(),
            analytics: AnalyticsComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let step = state.wizard.step();
        let mut constraints = vec![Constraint::Length(1)]; // Header
        if step.in_pipeline() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(0));
        if state.config.ui.show_footer {
            constraints.push(Constraint::Length(1));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        self.render_header(frame, chunks[idx], state);
        idx += 1;
        if step.in_pipeline() {
            self.steps.render(frame, chunks[idx], &state.wizard);
            idx += 1;
        }
        let content = chunks[idx];
        match step {
            Step::Choose => self.choose.render(frame, content, state),
            Step::Generating => self.generating.render(frame, content, state),
            Step::Review => self.review.render(frame, content, state),
            Step::Publish => self.publish.render(frame, content, state),
            Step::Analytics => self.analytics.render(frame, content, state),
        }
        if state.config.ui.show_footer {
            self.render_footer(frame, chunks[idx + 1], state);
        }

        if let Some(notice) = state.choose.notice.as_deref() {
            if step == Step::Choose {
                self.render_notice(frame, area, notice);
            }
        }

        self.render_notifications(frame, area, state);

        if state.help_visible {
            self.help
                .render(frame, area, state.wizard.flags().analytics_enabled);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let step = state.wizard.step();
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let title = Line::from(vec![
            Span::styled(" ✦ ", Style::default().fg(GOLD)),
            Span::styled(
                "Trendify",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(": Keep up with the Memes", Style::default().fg(SOFT_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(title), halves[0]);

        let mut actions = Vec::new();
        if matches!(step, Step::Generating | Step::Review | Step::Publish) {
            actions.extend(key_hint("Esc", "Back"));
            actions.push(Span::raw("  "));
        }
        if state.wizard.flags().analytics_enabled {
            let label = if step == Step::Analytics {
                "Close analytics"
            } else {
                "View analytics"
            };
            actions.extend(key_hint("a", label));
            actions.push(Span::raw("  "));
        }
        actions.extend(key_hint("?", "Help"));
        actions.push(Span::raw(" "));
        frame.render_widget(
            Paragraph::new(Line::from(actions)).alignment(Alignment::Right),
            halves[1],
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints: &[(&str, &str)] = match state.wizard.step() {
            Step::Choose => &[
                ("←/→", "move"),
                ("Tab", "next section"),
                ("Enter", "select"),
                ("g", "generate"),
            ],
            Step::Generating => &[("Esc", "back")],
            Step::Review => &[
                ("Tab", "next field"),
                ("m", "merge"),
                ("c", "continue"),
                ("Esc", "back"),
            ],
            Step::Publish => &[
                ("j/k", "move"),
                ("Space", "toggle"),
                ("Enter", "publish"),
                ("d", "download"),
            ],
            Step::Analytics => &[("j/k", "scroll"), ("n", "create another"), ("Esc", "close")],
        };

        let mut spans = vec![Span::styled(
            " Mock demo · no real uploads   ",
            Style::default().fg(MUTED_GRAY),
        )];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  |  ", Style::default().fg(MUTED_GRAY)));
            }
            spans.extend(key_hint(key, label));
        }
        spans.push(Span::styled("  |  ", Style::default().fg(MUTED_GRAY)));
        spans.extend(key_hint("q", "quit"));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, notice: &str) {
        let dialog_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, dialog_area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(notice, Style::default().fg(SOFT_WHITE))),
            Line::from(""),
            Line::from(button("OK", true, true)),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(WARNING_YELLOW))
                    .style(Style::default().bg(PANEL_BG))
                    .title(" Heads up ")
                    .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            );
        frame.render_widget(paragraph, dialog_area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let notifications = &state.notifications;
        if notifications.is_empty() {
            return;
        }

        // Position notifications in the top-right corner
        let notification_width = 50.min(area.width);
        let notification_height = notifications.len() as u16 * 3; // 3 lines per notification

        let notification_area = Rect {
            x: area.width.saturating_sub(notification_width + 2),
            y: 1,
            width: notification_width,
            height: notification_height.min(area.height.saturating_sub(2)),
        };

        for (i, notification) in notifications.iter().enumerate() {
            let y_offset = i as u16 * 3;
            if y_offset >= notification_area.height {
                break;
            }

            let single_notification_area = Rect {
                x: notification_area.x,
                y: notification_area.y + y_offset,
                width: notification_area.width,
                height: 3.min(notification_area.height - y_offset),
            };

            let (icon, color) = match notification.notification_type {
                NotificationType::Success => ("✓ ", SELECTION_GREEN),
                NotificationType::Error => ("✗ ", ERROR_RED),
                NotificationType::Warning => ("⚠ ", WARNING_YELLOW),
                NotificationType::Info => ("ℹ ", CORNFLOWER_BLUE),
            };

            let notification_line = Line::from(vec![
                Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(notification.message.as_str(), Style::default().fg(color)),
            ]);

            let notification_widget = Paragraph::new(notification_line)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color))
                        .style(Style::default().bg(PANEL_BG)),
                )
                .wrap(Wrap { trim: true });

            frame.render_widget(Clear, single_notification_area);
            frame.render_widget(notification_widget, single_notification_area);
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
