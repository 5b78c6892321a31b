// ABOUTME: Help overlay component displaying keyboard shortcuts per screen

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
};

use super::palette::{CORNFLOWER_BLUE, PANEL_BG};

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, analytics_enabled: bool) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let section = |title: &'static str| {
            ListItem::new(title)
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        };

        let mut help_items = vec![
            section("Select Trend:"),
            ListItem::new("  h/l ←/→    Move between trends or brands"),
            ListItem::new("  j/k ↑/↓    Move between sections"),
            ListItem::new("  Enter      Pick trend / brand, press button"),
            ListItem::new("  g          Generate video"),
            ListItem::new(""),
            section("Review:"),
            ListItem::new("  Space      Play / pause (player) or attach audio"),
            ListItem::new("  ←/→        Seek 5s (player) or volume (audio)"),
            ListItem::new("  r          Cycle playback rate"),
            ListItem::new("  m          Generate merged video"),
            ListItem::new("  c          Continue to publish"),
            ListItem::new(""),
            section("Publish:"),
            ListItem::new("  t/i/y      Toggle TikTok / Instagram / YouTube"),
            ListItem::new("  Space      Toggle platform under cursor"),
            ListItem::new("  Enter/p    Publish"),
            ListItem::new("  d          Download merged video"),
            ListItem::new("  n          Create another"),
            ListItem::new(""),
            section("General:"),
            ListItem::new("  Tab        Next field"),
            ListItem::new("  1-4        Jump to a finished step"),
            ListItem::new("  Esc/b      Back"),
        ];
        if analytics_enabled {
            help_items.push(ListItem::new("  a          View / close analytics"));
        }
        help_items.push(ListItem::new("  ?          Toggle this help"));
        help_items.push(ListItem::new("  q          Quit application"));
        help_items.push(ListItem::new("  Ctrl+C     Force quit"));

        let help_list = List::new(help_items).block(
            Block::default()
                .title(" Help - Press ? or Esc to close ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(CORNFLOWER_BLUE))
                .style(Style::default().bg(PANEL_BG)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
