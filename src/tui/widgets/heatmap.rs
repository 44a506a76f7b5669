use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::analysis::heatmap::{layout_weeks, month_labels};
use crate::models::DailyRecord;
use crate::tui::theme;
use crate::utils::format::format_count;

const DAY_LABELS: [&str; 7] = ["    ", "Mon ", "    ", "Wed ", "    ", "Fri ", "    "];

/// One column per week, one cell per day. Only the most recent weeks
/// are drawn when the area is too narrow for the whole year.
pub fn render(frame: &mut Frame, area: Rect, records: &[DailyRecord], reported_total: u64) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} contributions ", format_count(reported_total)),
            theme::primary(),
        ))
        .title_bottom(Line::from(vec![
            Span::styled(" Less ", theme::dim()),
            Span::styled("■", theme::level(0)),
            Span::styled("■", theme::level(1)),
            Span::styled("■", theme::level(2)),
            Span::styled("■", theme::level(3)),
            Span::styled("■", theme::level(4)),
            Span::styled(" More ", theme::dim()),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let weeks = layout_weeks(records);
    let visible = ((area.width as usize).saturating_sub(2 + DAY_LABELS[0].len())).min(weeks.len());
    let skip = weeks.len() - visible;

    let mut header = vec![' '; visible];
    for label in month_labels(records) {
        let Some(start) = label.week_index.checked_sub(skip) else {
            continue;
        };
        for (offset, ch) in label.label.chars().enumerate() {
            if let Some(slot) = header.get_mut(start + offset) {
                *slot = ch;
            }
        }
    }

    let mut lines = vec![Line::from(Span::styled(
        format!("{}{}", DAY_LABELS[0], header.into_iter().collect::<String>()),
        theme::dim(),
    ))];
    for (dow, day_label) in DAY_LABELS.iter().enumerate() {
        let mut spans = vec![Span::styled(*day_label, theme::dim())];
        for week in &weeks[skip..] {
            spans.push(match &week[dow] {
                Some(record) => Span::styled("■", theme::level(record.level)),
                None => Span::raw(" "),
            });
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
