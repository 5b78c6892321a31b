// ABOUTME: Trend and brand selection screen with the editable generation prompt

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::palette::{
    button, key_hint, panel, CORNFLOWER_BLUE, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG,
    SELECTION_GREEN, SOFT_WHITE, SUBDUED_BORDER, WARNING_YELLOW,
};
use super::text_field::render_text_field;
use crate::app::AppState;
use crate::catalog::{BRANDS, TRENDS};
use crate::wizard::ChooseFocus;

pub struct ChooseComponent;

impl ChooseComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // Trends
                Constraint::Length(5), // Brands
                Constraint::Min(4),    // Prompt
                Constraint::Length(3), // Generate
            ])
            .split(area);

        self.render_trends(frame, chunks[0], state);
        self.render_brands(frame, chunks[1], state);
        render_text_field(
            frame,
            chunks[2],
            " Prompt ",
            &state.choose.prompt,
            state.choose.focus == ChooseFocus::Prompt,
            "Describe your video...",
        );
        self.render_generate(frame, chunks[3], state);
    }

    fn render_trends(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.choose.focus == ChooseFocus::Trends;
        let block = panel(" Choose a trend ", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tiles = tile_layout(inner, TRENDS.len());
        let selected = state.wizard.trend().map(|t| t.id);
        for (i, trend) in TRENDS.iter().enumerate() {
            let is_selected = selected == Some(trend.id);
            let under_cursor = focused && state.choose.trend_cursor == i;

            let mut lines = vec![Line::from(vec![
                Span::styled(
                    if is_selected { "✓ " } else { "" },
                    Style::default().fg(SELECTION_GREEN),
                ),
                Span::styled(
                    trend.title,
                    Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
                ),
            ])];
            if let Some(badge) = trend.badge() {
                lines.push(Line::from(Span::styled(
                    badge,
                    Style::default().fg(WARNING_YELLOW),
                )));
            }
            lines.push(Line::from(Span::styled(
                trend.description,
                Style::default().fg(MUTED_GRAY),
            )));

            let tile = Paragraph::new(lines)
                .block(tile_block(under_cursor, is_selected, true))
                .wrap(Wrap { trim: true });
            frame.render_widget(tile, tiles[i]);
        }
    }

    fn render_brands(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.choose.focus == ChooseFocus::Brands;
        let block = panel(" Choose a brand ", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tiles = tile_layout(inner, BRANDS.len());
        for (i, brand) in BRANDS.iter().enumerate() {
            let is_selected = state.wizard.brand() == brand.name;
            let enabled = state.wizard.brand_allowed(brand.name);
            let under_cursor = focused && state.choose.brand_cursor == i;

            let name_style = if enabled {
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SUBDUED_BORDER)
            };
            let line = Line::from(vec![
                Span::styled(
                    if is_selected { "✓ " } else { "" },
                    Style::default().fg(SELECTION_GREEN),
                ),
                Span::styled(brand.name, name_style),
            ]);

            let tile = Paragraph::new(line)
                .alignment(Alignment::Center)
                .block(tile_block(under_cursor, is_selected, enabled));
            frame.render_widget(tile, tiles[i]);
        }
    }

    fn render_generate(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.choose.focus == ChooseFocus::Generate;
        let enabled = state.wizard.can_generate();

        let mut spans = vec![button("Generate video", focused, enabled), Span::raw("   ")];
        if enabled {
            spans.extend(key_hint("g", "generate"));
        } else {
            let reason = if state.wizard.trend().is_none() {
                "Pick a trend first"
            } else {
                "Pick the matching brand"
            };
            spans.push(Span::styled(reason, Style::default().fg(ERROR_RED)));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(panel("", focused));
        frame.render_widget(paragraph, area);
    }
}

impl Default for ChooseComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn tile_layout(area: Rect, count: usize) -> std::rc::Rc<[Rect]> {
    let constraints = vec![Constraint::Ratio(1, count.max(1) as u32); count];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
}

fn tile_block(under_cursor: bool, selected: bool, enabled: bool) -> Block<'static> {
    let border = if under_cursor {
        GOLD
    } else if selected {
        SELECTION_GREEN
    } else if enabled {
        CORNFLOWER_BLUE
    } else {
        SUBDUED_BORDER
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(PANEL_BG))
}
