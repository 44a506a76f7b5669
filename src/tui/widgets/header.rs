use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tracker::FetchStatus;
use crate::tui::theme;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render(
    frame: &mut Frame,
    area: Rect,
    identity: &str,
    year: i32,
    status: FetchStatus,
    tick: usize,
) {
    let title_line = Line::from(vec![
        Span::styled("  Consistency_Tracker  ", theme::primary().add_modifier(Modifier::BOLD)),
        Span::styled(format!("@{}", identity), theme::bold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled("◀ ", theme::dim()),
        Span::styled(year.to_string(), theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled(" ▶", theme::dim()),
    ]);

    let status_line = match status {
        FetchStatus::Loading => Line::from(vec![
            Span::styled(SPINNER[tick % SPINNER.len()], theme::amber()),
            Span::styled(" COMPUTING_METRICS...", theme::amber()),
        ]),
        FetchStatus::Failed => Line::from(vec![
            Span::styled("✕", theme::red()),
            Span::styled(" FETCH_FAILED", theme::red()),
        ]),
        FetchStatus::Idle | FetchStatus::Ready => Line::from(vec![
            Span::styled("●", theme::green()),
            Span::styled(" ANALYSIS_COMPLETE", theme::green()),
        ]),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::primary().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, status_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
