use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::StatsBundle;
use crate::models::stats::WEEKDAY_NAMES;
use crate::tui::theme;
use crate::utils::format::{format_average, ratio_bar};

pub fn render(frame: &mut Frame, area: Rect, stats: &StatsBundle) {
    let block = Block::default()
        .title(Span::styled(" Weekday Average ", theme::primary()))
        .title_bottom(Line::from(Span::styled(
            format!(
                " best: {} ",
                stats.highlighted_weekday().map_or("—", |d| d.as_str())
            ),
            theme::green(),
        )))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let bar_width = (area.width as usize).saturating_sub(16).max(4);
    let max = stats.weekly_average.iter().copied().fold(1.0, f64::max);
    let best = stats.highlighted_weekday().map(|d| d.index());

    let lines: Vec<Line> = stats
        .weekly_average
        .iter()
        .enumerate()
        .map(|(i, avg)| {
            let (bar_style, label_style) = if best == Some(i) {
                (theme::green(), theme::green().add_modifier(Modifier::BOLD))
            } else {
                (theme::primary(), theme::dim())
            };
            Line::from(vec![
                Span::styled(format!(" {} ", WEEKDAY_NAMES[i]), label_style),
                Span::styled(ratio_bar(*avg, max, bar_width), bar_style),
                Span::styled(format!(" {}", format_average(*avg)), theme::bold()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
