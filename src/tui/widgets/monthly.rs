use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::StatsBundle;
use crate::tui::theme;
use crate::utils::format::{format_count, progress_bar};

/// Twelve months laid out as two columns of six.
pub fn render(frame: &mut Frame, area: Rect, stats: &StatsBundle) {
    let block = Block::default()
        .title(Span::styled(" Monthly Contributions ", theme::primary()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let max = stats.monthly_totals.iter().copied().max().unwrap_or(0).max(1);
    let half = (area.width as usize).saturating_sub(4) / 2;
    let bar_width = half.saturating_sub(12).max(3);

    let months = stats.monthly();
    let cell = |i: usize| {
        let month = &months[i];
        vec![
            Span::styled(format!(" {} ", month.month), theme::dim()),
            Span::styled(progress_bar(month.count, max, bar_width), theme::level(4)),
            Span::styled(format!(" {:>5} ", format_count(month.count)), theme::bold()),
        ]
    };

    let lines: Vec<Line> = (0..6)
        .map(|row| {
            let mut spans = cell(row);
            spans.extend(cell(row + 6));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
