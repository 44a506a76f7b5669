use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::tui::theme;

/// Fetch failure notice shown above the (possibly stale) numbers.
pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::amber())
        .style(theme::surface());

    let line = Line::from(vec![
        Span::styled(" ⚠ ", theme::amber()),
        Span::styled(message, theme::amber()),
    ]);

    let paragraph = Paragraph::new(line).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
