use ratatui::style::{Color, Modifier, Style};

use crate::models::Severity;

pub const BG: Color = Color::Rgb(16, 22, 34);
pub const SURFACE: Color = Color::Rgb(22, 30, 46);
pub const BORDER: Color = Color::Rgb(38, 52, 84);
pub const TEXT: Color = Color::Rgb(226, 232, 240);
pub const TEXT_DIM: Color = Color::Rgb(100, 116, 139);
pub const PRIMARY: Color = Color::Rgb(19, 91, 236);
pub const GOLD: Color = Color::Rgb(253, 224, 71);
pub const GREEN: Color = Color::Rgb(52, 211, 153);
pub const AMBER: Color = Color::Rgb(251, 191, 36);
pub const ORANGE: Color = Color::Rgb(251, 146, 60);
pub const RED: Color = Color::Rgb(248, 113, 113);

/// Heatmap shades for levels 0..=4
const LEVELS: [Color; 5] = [
    Color::Rgb(26, 36, 58),
    Color::Rgb(24, 52, 110),
    Color::Rgb(22, 66, 160),
    Color::Rgb(20, 78, 200),
    PRIMARY,
];

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn primary() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn orange() -> Style {
    Style::default().fg(ORANGE)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn severity(severity: Severity) -> Style {
    let color = match severity {
        Severity::Legendary => GOLD,
        Severity::Excellent => GREEN,
        Severity::Good => PRIMARY,
        Severity::Fair => AMBER,
        Severity::Weak => ORANGE,
        Severity::Failing => RED,
        Severity::Muted => TEXT_DIM,
    };
    Style::default().fg(color)
}

pub fn level(level: u8) -> Style {
    Style::default().fg(LEVELS[(level as usize).min(LEVELS.len() - 1)])
}
