use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::StatsBundle;
use crate::tui::theme;

fn card(frame: &mut Frame, area: Rect, title: &str, value: String, caption: Line, accent: Style) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), theme::dim()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let text = vec![
        Line::from(Span::styled(value, accent.add_modifier(Modifier::BOLD))),
        caption,
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// 2x2 grid: current streak, longest streak, active days, consistency.
pub fn render(frame: &mut Frame, area: Rect, stats: &StatsBundle) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let (streak_caption, streak_style) = if stats.on_fire() {
        (
            Line::from(Span::styled("🔥 ON FIRE!", theme::orange())),
            theme::orange(),
        )
    } else {
        (Line::from(Span::styled("days", theme::dim())), theme::primary())
    };
    card(
        frame,
        top[0],
        "Current Streak",
        stats.current_streak.to_string(),
        streak_caption,
        streak_style,
    );
    card(
        frame,
        top[1],
        "Longest Streak",
        stats.longest_streak.to_string(),
        Line::from(Span::styled("days", theme::dim())),
        theme::gold(),
    );
    card(
        frame,
        bottom[0],
        "Active Days",
        stats.total_active_days.to_string(),
        Line::from(Span::styled(
            format!("of {}", stats.total_days),
            theme::dim(),
        )),
        theme::green(),
    );
    card(
        frame,
        bottom[1],
        "Consistency",
        format!("{}%", stats.consistency_percent),
        Line::from(Span::styled(
            format!("grade {}", stats.grade),
            theme::severity(stats.grade.severity()),
        )),
        theme::severity(stats.grade.severity()),
    );
}
