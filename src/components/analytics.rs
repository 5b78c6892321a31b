// ABOUTME: Analytics dashboard: post feed, totals, weekly views line and likes per platform

use ratatui::{
    prelude::*,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Gauge, List, ListItem, Paragraph,
    },
};

use super::palette::{
    panel, CHART_INDIGO, CORNFLOWER_BLUE, DARK_BG, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN,
    SOFT_WHITE,
};
use crate::analytics::{self, format_count, AnalyticsPost, SPARKLINE_HEIGHT, SPARKLINE_WIDTH};
use crate::app::AppState;

pub struct AnalyticsComponent;

impl AnalyticsComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.render_posts(frame, columns[0], state);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Stat cards
                Constraint::Min(6),    // Views chart
                Constraint::Length(8), // Likes by platform
            ])
            .split(columns[1]);

        self.render_stats(frame, rows[0], state);
        self.render_views_chart(frame, rows[1], state);
        self.render_platform_bars(frame, rows[2], state);
    }

    fn render_posts(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let highlighted = state.wizard.highlighted_post();
        let items: Vec<ListItem> = state
            .feed
            .posts()
            .iter()
            .skip(state.analytics_scroll)
            .map(|post| post_item(post, highlighted == Some(post.id.as_str())))
            .collect();

        let title = format!(" Posts ({}) ", state.feed.len());
        frame.render_widget(List::new(items).block(panel(&title, true)), area);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let summary = state.feed.summary();
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let stats = [
            (" Views ", format_count(summary.total_views)),
            (" Likes ", format_count(summary.total_likes)),
            (" Comments ", format_count(summary.total_comments as u64)),
        ];
        for (card, (title, value)) in cards.iter().zip(stats) {
            let paragraph = Paragraph::new(Span::styled(
                value,
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(panel(title, false));
            frame.render_widget(paragraph, *card);
        }
    }

    fn render_views_chart(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let points = analytics::sparkline_points(&state.sparkline);
        let canvas = Canvas::default()
            .block(panel(" Views, last 7 days ", false))
            .background_color(PANEL_BG)
            .x_bounds([0.0, SPARKLINE_WIDTH])
            .y_bounds([0.0, SPARKLINE_HEIGHT])
            .paint(move |ctx| {
                // Points are laid out with y growing downwards
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: SPARKLINE_HEIGHT - pair[0].1,
                        x2: pair[1].0,
                        y2: SPARKLINE_HEIGHT - pair[1].1,
                        color: CHART_INDIGO,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }

    fn render_platform_bars(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = panel(" Likes by platform ", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let bars = analytics::bar_percentages(&state.feed.summary().platform_likes);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(2); bars.len()])
            .split(inner);

        for (row, bar) in rows.iter().zip(bars) {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(18), Constraint::Min(0)])
                .split(*row);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    bar.platform.label(),
                    Style::default().fg(SOFT_WHITE),
                )),
                halves[0],
            );
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(CORNFLOWER_BLUE).bg(DARK_BG))
                .percent(u16::from(bar.percent))
                .label(format_count(bar.likes));
            frame.render_widget(gauge, Rect { height: 1, ..halves[1] });
        }
    }
}

impl Default for AnalyticsComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn post_item(post: &AnalyticsPost, is_new: bool) -> ListItem<'_> {
    let mut title = Vec::new();
    if is_new {
        title.push(Span::styled(
            " New ",
            Style::default()
                .fg(DARK_BG)
                .bg(SELECTION_GREEN)
                .add_modifier(Modifier::BOLD),
        ));
        title.push(Span::raw(" "));
    }
    title.push(Span::styled(
        post.caption.as_str(),
        Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
    ));

    let stats = Line::from(vec![
        Span::styled(post.platform.label(), Style::default().fg(GOLD)),
        Span::styled(
            format!(
                "  {}  ·  {} views  ·  {} likes  ·  {} comments",
                post.created_at.format("%b %d"),
                format_count(post.views),
                format_count(post.likes),
                post.comments.len()
            ),
            Style::default().fg(MUTED_GRAY),
        ),
    ]);
    let tags = Line::from(Span::styled(
        post.hashtags.join(" "),
        Style::default().fg(CORNFLOWER_BLUE),
    ));

    ListItem::new(vec![Line::from(title), stats, tags, Line::from("")])
}
