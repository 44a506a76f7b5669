use anyhow::{Context, Result};
use chrono::{Datelike, Local, Utc};

use crate::analysis::activity::{EventTone, event_level, format_event_time};
use crate::analysis::heatmap::{layout_weeks, month_labels};
use crate::cli::args::ConfigCommands;
use crate::config::AppConfig;
use crate::models::stats::WEEKDAY_NAMES;
use crate::models::{DailyRecord, Severity, StatsBundle};
use crate::source::{GitHubClient, build_http_client};
use crate::tracker::{ConsistencyTracker, FetchStatus};
use crate::utils::format::{
    format_average, format_count, level_glyph, pad_right, progress_bar, ratio_bar,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[38;2;19;91;236m";
const GOLD: &str = "\x1b[38;2;253;224;71m";
const ORANGE: &str = "\x1b[38;2;251;146;60m";
const PURPLE: &str = "\x1b[38;2;192;132;252m";

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Legendary => GOLD,
        Severity::Excellent => GREEN,
        Severity::Good => BLUE,
        Severity::Fair => AMBER,
        Severity::Weak => ORANGE,
        Severity::Failing => RED,
        Severity::Muted => DIM,
    }
}

fn tone_color(tone: EventTone) -> &'static str {
    match tone {
        EventTone::Primary => BLUE,
        EventTone::Success => GREEN,
        EventTone::Warning => AMBER,
        EventTone::Danger => RED,
        EventTone::Highlight => GOLD,
        EventTone::Accent => PURPLE,
        EventTone::Muted => DIM,
    }
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// One-shot fetch for the printing commands. "Today" is pinned once so every
/// number printed comes from the same cut-off.
async fn fetch_year(config: &AppConfig, identity: &str, year: i32) -> Result<ConsistencyTracker> {
    let mut tracker = ConsistencyTracker::from_config(&config.source, identity, year)
        .context("Setting up contribution feed")?
        .with_today(Local::now().date_naive());
    tracker.set_year_and_wait(year).await;
    if tracker.status() == FetchStatus::Failed {
        if let Some(err) = tracker.error() {
            eprintln!("{}  ⚠ {}\x1b[0m", AMBER, err);
        }
    }
    Ok(tracker)
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub async fn handle_stats(
    config: &AppConfig,
    identity: &str,
    year: Option<i32>,
    json: bool,
) -> Result<()> {
    let year = year.unwrap_or_else(current_year);
    let tracker = fetch_year(config, identity, year).await?;

    if json {
        let out =
            serde_json::to_string_pretty(&tracker.snapshot()).context("Serializing stats")?;
        println!("{}", out);
        return Ok(());
    }

    print_stats(identity, &tracker);
    Ok(())
}

fn print_stats(identity: &str, tracker: &ConsistencyTracker) {
    let stats = tracker.stats();
    let grade_color = severity_color(stats.grade.severity());

    println!();
    println_colored!(BLUE, "  Consistency_Tracker — {} ({})", identity, tracker.year());
    println!();

    println!(
        "  Grade:          {}{}{}\x1b[0m  {}  {}%",
        BOLD,
        grade_color,
        stats.grade,
        progress_bar(stats.consistency_percent as u64, 100, 20),
        stats.consistency_percent
    );
    println!(
        "  Active days:    {} / {}",
        stats.total_active_days, stats.total_days
    );
    println!(
        "  Contributions:  {}  (feed total {})",
        format_count(stats.total_contributions),
        format_count(tracker.reported_total())
    );

    if stats.on_fire() {
        println_colored!(
            ORANGE,
            "  Streak:         {} days current  |  {} days best  ·  ON FIRE!",
            stats.current_streak,
            stats.longest_streak
        );
    } else {
        println_colored!(
            BOLD,
            "  Streak:         {} days current  |  {} days best",
            stats.current_streak,
            stats.longest_streak
        );
    }

    match &stats.best_day {
        Some(best) => println!("  Best day:       {} ({} contributions)", best.date, best.count),
        None => println!("  Best day:       —"),
    }
    println!("  Best weekday:   {}", stats.best_weekday_label());

    if !stats.has_data() {
        println!();
        return;
    }

    println!();
    println_colored!(DIM, "  Weekday averages");
    print_weekday_bars(stats);

    println!();
    println_colored!(DIM, "  Monthly totals");
    let max_month = stats.monthly_totals.iter().copied().max().unwrap_or(0).max(1);
    for month in stats.monthly() {
        println!(
            "  {}  {}  {}",
            month.month,
            progress_bar(month.count, max_month, 24),
            format_count(month.count)
        );
    }
    println!();
}

fn print_weekday_bars(stats: &StatsBundle) {
    let max = stats.weekly_average.iter().copied().fold(1.0, f64::max);
    for (i, avg) in stats.weekly_average.iter().enumerate() {
        let line = format!(
            "  {}  {}  {}",
            pad_right(WEEKDAY_NAMES[i], 3),
            ratio_bar(*avg, max, 24),
            format_average(*avg)
        );
        if stats.highlighted_weekday().map(|d| d.index()) == Some(i) {
            println_colored!(GREEN, "{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ─── Heatmap ─────────────────────────────────────────────────────────────────

const DAY_LABELS: [&str; 7] = ["", "Mon", "", "Wed", "", "Fri", ""];

/// Month header followed by one row per weekday, Sunday first.
pub fn heatmap_rows(records: &[DailyRecord]) -> Vec<String> {
    let weeks = layout_weeks(records);
    let mut header = vec![' '; weeks.len()];
    for label in month_labels(records) {
        for (offset, ch) in label.label.chars().enumerate() {
            if let Some(slot) = header.get_mut(label.week_index + offset) {
                *slot = ch;
            }
        }
    }

    let mut rows = vec![format!("     {}", header.into_iter().collect::<String>())];
    for (dow, day_label) in DAY_LABELS.iter().enumerate() {
        let cells: String = weeks
            .iter()
            .map(|week| match &week[dow] {
                Some(record) => level_glyph(record.level),
                None => " ",
            })
            .collect();
        rows.push(format!("{} {}", pad_right(day_label, 4), cells));
    }
    rows
}

pub async fn handle_heatmap(config: &AppConfig, identity: &str, year: Option<i32>) -> Result<()> {
    let year = year.unwrap_or_else(current_year);
    let tracker = fetch_year(config, identity, year).await?;

    println!();
    println_colored!(
        BOLD,
        "  {} contributions in {}",
        format_count(tracker.reported_total()),
        tracker.year()
    );
    println!();
    for row in heatmap_rows(tracker.calendar()) {
        println_colored!(GREEN, "  {}", row);
    }
    println!();
    println_colored!(DIM, "  Less · ░ ▒ ▓ █ More");
    println!();
    Ok(())
}

// ─── Profile ─────────────────────────────────────────────────────────────────

pub async fn handle_profile(config: &AppConfig, identity: &str, json: bool) -> Result<()> {
    let client = GitHubClient::new(
        build_http_client(config.source.timeout_secs)?,
        config.source.github_api.as_str(),
    );
    let summary = client
        .activity_summary(identity)
        .await
        .context("GitHub API rate limit or fetch error")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Serializing profile")?
        );
        return Ok(());
    }

    let profile = &summary.profile;
    println!();
    println_colored!(BLUE, "  {}  (@{})", profile.name, identity);
    println_colored!(
        DIM,
        "  Member since {}",
        profile.created_at.format("%b %Y")
    );
    println!();
    println!(
        "  Repos: {}   Followers: {}   Following: {}",
        profile.public_repos, profile.followers, profile.following
    );
    println!(
        "  Stars: {}   Forks: {}",
        format_count(summary.total_stars),
        format_count(summary.total_forks)
    );

    if !summary.top_languages.is_empty() {
        println!();
        println_colored!(DIM, "  Top languages");
        let max = summary.top_languages[0].count as u64;
        for lang in &summary.top_languages {
            println!(
                "  {}  {}  {}",
                pad_right(&lang.name, 14),
                progress_bar(lang.count as u64, max, 16),
                lang.count
            );
        }
    }

    if !summary.events.is_empty() {
        println!();
        println_colored!(DIM, "  Recent activity");
        let now = Utc::now();
        for event in &summary.events {
            let (level, tone) = event_level(&event.kind);
            println!(
                "  {}{}{}\x1b[0m {}  {}",
                DIM,
                pad_right(&format_event_time(event.created_at, now), 9),
                tone_color(tone),
                pad_right(&format!("[{}]", level), 9),
                event.message
            );
        }
    }
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Init { overwrite } => {
            let path = AppConfig::config_path()?;
            if path.exists() && !overwrite {
                println!(
                    "Config already exists at {}. Use --overwrite to replace it.",
                    path.display()
                );
                return Ok(());
            }
            let path = AppConfig::default().save()?;
            println_colored!(GREEN, "✓ Wrote default config to {}", path.display());
        }
        ConfigCommands::Show => {
            let content = toml::to_string_pretty(config).context("Serializing config")?;
            print!("{}", content);
        }
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn heatmap_rows_have_header_and_seven_days() {
        // Sat 2022-12-31 then Sun 2023-01-01 .. Mon 2023-01-02.
        let first = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        let records: Vec<DailyRecord> = (0..3)
            .map(|i| DailyRecord::new(first + chrono::Duration::days(i), i as u32, i as u8 * 2))
            .collect();

        let rows = heatmap_rows(&records);
        assert_eq!(rows.len(), 8);
        // Two week columns. Jan starts in column 1 and overwrites the tail of "Dec".
        assert_eq!(rows[0], "     DJ");
        assert_eq!(rows[1], "      ▒");
        assert_eq!(rows[2], "Mon   █");
        assert_eq!(rows[7], "     · ");
    }

    #[test]
    fn heatmap_of_nothing_is_just_labels() {
        let rows = heatmap_rows(&[]);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[2], "Mon  ");
    }
}
