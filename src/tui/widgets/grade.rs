use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

use crate::models::{Grade, StatsBundle};
use crate::tui::theme;
use crate::utils::format::progress_bar;

/// Quadrant glyphs are 4 cells wide and 4 tall.
const GLYPH_WIDTH: u16 = 4;
const GLYPH_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, stats: &StatsBundle) {
    let style = theme::severity(stats.grade.severity()).add_modifier(Modifier::BOLD);

    let block = Block::default()
        .title(Span::styled(" Grade ", theme::primary()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(GLYPH_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    // The 8x8 font has no em dash.
    let label = match stats.grade {
        Grade::NoData => "-",
        grade => grade.as_str(),
    };
    let grade_width = GLYPH_WIDTH * label.chars().count() as u16;
    let grade_area = Rect {
        x: rows[1].x + rows[1].width.saturating_sub(grade_width) / 2,
        width: grade_width.min(rows[1].width),
        ..rows[1]
    };
    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(style)
        .lines(vec![label.into()])
        .build();
    frame.render_widget(big, grade_area);

    let bar_width = (inner.width as usize).saturating_sub(10).clamp(4, 30);
    let bar = Line::from(vec![
        Span::styled(
            progress_bar(stats.consistency_percent as u64, 100, bar_width),
            style,
        ),
        Span::styled(format!("  {}%", stats.consistency_percent), theme::bold()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(bar), rows[3]);

    let days = Line::from(Span::styled(
        format!(
            "{} active / {} total days",
            stats.total_active_days, stats.total_days
        ),
        theme::dim(),
    ))
    .centered();
    frame.render_widget(Paragraph::new(days), rows[4]);
}
