// ABOUTME: Shared color palette (TUI style guide)

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders};

pub const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
pub const DARK_BG: Color = Color::Rgb(25, 25, 35);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);
pub const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
pub const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
pub const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
pub const ERROR_RED: Color = Color::Rgb(220, 80, 80);
pub const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);
/// Sparkline stroke
pub const CHART_INDIGO: Color = Color::Rgb(100, 108, 255);

/// Rounded panel used by every screen section
pub fn panel(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { GOLD } else { CORNFLOWER_BLUE };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(PANEL_BG))
        .title(title)
        .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
}

/// `[key] label` pair for hint lines
pub fn key_hint<'a>(key: &'a str, label: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::styled(
            format!("[{key}]"),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {label}"), Style::default().fg(MUTED_GRAY)),
    ]
}

/// Button-like label, highlighted while focused and dimmed while disabled
pub fn button(label: &str, focused: bool, enabled: bool) -> Span<'_> {
    let style = if !enabled {
        Style::default().fg(SUBDUED_BORDER)
    } else if focused {
        Style::default()
            .fg(DARK_BG)
            .bg(SELECTION_GREEN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
    };
    Span::styled(format!(" {label} "), style)
}
