use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::analysis::heatmap::available_years;
use crate::config::AppConfig;
use crate::tracker::{ConsistencyTracker, Snapshot};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{banner, cards, grade, header, heatmap, monthly, statusbar, weekly};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

pub struct App {
    pub view: View,
    pub should_quit: bool,
    pub tracker: ConsistencyTracker,
    /// Newest first
    pub years: Vec<i32>,
    /// Last state pulled from the tracker; what every frame draws.
    pub snapshot: Snapshot,
    pub ticks: usize,
}

impl App {
    pub fn new(tracker: ConsistencyTracker, first_year: i32, current_year: i32) -> Self {
        let snapshot = tracker.snapshot();
        App {
            view: View::Dashboard,
            should_quit: false,
            tracker,
            years: available_years(first_year, current_year),
            snapshot,
            ticks: 0,
        }
    }

    fn sync(&mut self) {
        self.snapshot = self.tracker.snapshot();
    }

    /// Fetch the selected year unless a fetch has already been made.
    pub fn start(&mut self) {
        self.tracker.start();
        self.sync();
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.tracker.pump();
        self.sync();
    }

    fn year_position(&self) -> Option<usize> {
        self.years.iter().position(|&y| y == self.tracker.year())
    }

    fn select_year(&mut self, year: i32) {
        if year != self.tracker.year() {
            self.tracker.set_year(year);
            self.sync();
        }
    }

    /// Move towards older years.
    pub fn previous_year(&mut self) {
        let next = match self.year_position() {
            Some(i) => self.years.get(i + 1).copied(),
            None => self.years.first().copied(),
        };
        if let Some(year) = next {
            self.select_year(year);
        }
    }

    /// Move towards the current year.
    pub fn next_year(&mut self) {
        let next = match self.year_position() {
            Some(i) if i > 0 => self.years.get(i - 1).copied(),
            Some(_) => None,
            None => self.years.first().copied(),
        };
        if let Some(year) = next {
            self.select_year(year);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.view == View::Help {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Esc | KeyCode::Char('?') => self.view = View::Dashboard,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.view = View::Help,
            KeyCode::Left | KeyCode::Char('h') => self.previous_year(),
            KeyCode::Right | KeyCode::Char('l') => self.next_year(),
            KeyCode::Char('r') => {
                self.tracker.refresh();
                self.sync();
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let snapshot = &self.snapshot;
        let banner_height = if snapshot.error.is_some() { 3 } else { 0 };

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),             // header
                Constraint::Length(banner_height), // fetch warning
                Constraint::Length(11),            // grade + cards
                Constraint::Length(9),             // weekday + monthly
                Constraint::Min(0),                // heatmap
                Constraint::Length(1),             // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer[0],
            self.tracker.identity(),
            snapshot.year,
            snapshot.status,
            self.ticks,
        );

        if let Some(err) = &snapshot.error {
            banner::render(frame, outer[1], err);
        }

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(outer[2]);
        grade::render(frame, top[0], &snapshot.stats);
        cards::render(frame, top[1], &snapshot.stats);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(outer[3]);
        weekly::render(frame, middle[0], &snapshot.stats);
        monthly::render(frame, middle[1], &snapshot.stats);

        heatmap::render(frame, outer[4], &snapshot.calendar, snapshot.reported_total);
        statusbar::render(frame, outer[5]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(10).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[← / h]    ", "Previous year"),
            ("[→ / l]    ", "Next year"),
            ("[r]        ", "Refetch the selected year"),
            ("[?]        ", "Toggle help"),
            ("[q / Esc]  ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::primary().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, action) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {}", key), theme::primary()),
                Span::styled(action, theme::dim()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            format!(
                "  Years {}–{}",
                self.years.last().copied().unwrap_or(self.snapshot.year),
                self.years.first().copied().unwrap_or(self.snapshot.year)
            ),
            theme::dim(),
        )));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::primary()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::primary())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the dashboard until the user quits. Blocks the calling thread, so it
/// belongs inside `block_in_place` on a multi-threaded runtime.
pub fn run(config: AppConfig, identity: &str, current_year: i32) -> Result<()> {
    let tracker = ConsistencyTracker::from_config(&config.source, identity, current_year)
        .context("Setting up contribution feed")?;
    let mut app = App::new(tracker, config.display.first_year, current_year);
    app.start();

    let mut terminal = ratatui::init();
    let events = EventHandler::new(Duration::from_millis(config.display.tick_rate_ms.max(16)));

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(),
            }
        }
    })();

    ratatui::restore();
    result
}
