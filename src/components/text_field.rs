// ABOUTME: Renders a TextEditor inside a panel, placing the terminal cursor while focused

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::palette::{panel, MUTED_GRAY, SOFT_WHITE};
use crate::app::TextEditor;

pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    editor: &TextEditor,
    focused: bool,
    placeholder: &str,
) {
    let block = panel(title, focused);
    let inner = block.inner(area);

    let paragraph = if editor.is_empty() && !focused {
        Paragraph::new(Span::styled(placeholder, Style::default().fg(MUTED_GRAY)))
    } else {
        let lines: Vec<Line> = editor
            .lines()
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(SOFT_WHITE))))
            .collect();
        Paragraph::new(lines)
    };
    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);

    if focused {
        let (line, col) = editor.cursor_position();
        let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + (line as u16).min(inner.height.saturating_sub(1));
        frame.set_cursor(x, y);
    }
}
