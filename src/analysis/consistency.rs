use chrono::{Datelike, NaiveDate};

use crate::models::{BestDay, DailyRecord, Grade, StatsBundle, Weekday};

/// Derive the full statistics bundle for `year` from its daily records.
///
/// Records dated after `today` are ignored, so a feed that pads the current
/// year out to Dec 31 does not produce phantom zero-days at the end of the
/// series. Input is expected ascending and gapless; anything else is
/// tolerated but gives unspecified streak values.
pub fn analyze(year: i32, records: &[DailyRecord], today: NaiveDate) -> StatsBundle {
    let relevant: Vec<&DailyRecord> = records.iter().filter(|r| r.date <= today).collect();

    if relevant.is_empty() {
        return StatsBundle::empty(year);
    }

    let total_days = relevant.len() as u32;
    let total_active_days = relevant.iter().filter(|r| r.is_active()).count() as u32;
    let total_contributions = relevant.iter().map(|r| r.count as u64).sum();

    let consistency_percent = consistency_percent(total_active_days, total_days);
    let weekly_average = weekly_average(&relevant);

    StatsBundle {
        year,
        current_streak: current_streak(&relevant),
        longest_streak: longest_streak(&relevant),
        total_active_days,
        total_days,
        total_contributions,
        consistency_percent,
        grade: Grade::from_percent(consistency_percent),
        weekly_average,
        best_weekday: Some(best_weekday(&weekly_average)),
        monthly_totals: monthly_totals(&relevant),
        best_day: best_day(&relevant),
    }
}

/// Length of the active run ending at the last day.
///
/// An inactive last day does not reset the streak on its own: the run ending
/// the day before is reported instead. Two inactive trailing days give 0.
pub fn current_streak(days: &[&DailyRecord]) -> u32 {
    match days.split_last() {
        None => 0,
        Some((last, earlier)) if !last.is_active() => trailing_run(earlier),
        Some(_) => trailing_run(days),
    }
}

fn trailing_run(days: &[&DailyRecord]) -> u32 {
    days.iter().rev().take_while(|r| r.is_active()).count() as u32
}

pub fn longest_streak(days: &[&DailyRecord]) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    for day in days {
        if day.is_active() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

pub fn consistency_percent(active: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (active as f64 / total as f64 * 100.0).round().min(100.0) as u8
}

fn weekly_average(days: &[&DailyRecord]) -> [f64; 7] {
    let mut occurrences = [0u32; 7];
    let mut totals = [0u64; 7];
    for day in days {
        let dow = Weekday::from(day.date.weekday()).index();
        occurrences[dow] += 1;
        totals[dow] += day.count as u64;
    }

    let mut averages = [0.0; 7];
    for (i, avg) in averages.iter_mut().enumerate() {
        if occurrences[i] > 0 {
            *avg = round_one_decimal(totals[i] as f64 / occurrences[i] as f64);
        }
    }
    averages
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Argmax over the averages; ties go to the earliest day (Sunday first).
fn best_weekday(averages: &[f64; 7]) -> Weekday {
    let mut best = 0;
    for i in 1..averages.len() {
        if averages[i] > averages[best] {
            best = i;
        }
    }
    Weekday::from_index(best).unwrap_or(Weekday::Sun)
}

fn monthly_totals(days: &[&DailyRecord]) -> [u64; 12] {
    let mut months = [0u64; 12];
    for day in days {
        months[day.date.month0() as usize] += day.count as u64;
    }
    months
}

fn best_day(days: &[&DailyRecord]) -> Option<BestDay> {
    let mut best: Option<&DailyRecord> = None;
    for day in days {
        if best.is_none_or(|b| day.count > b.count) {
            best = Some(day);
        }
    }
    best.map(|d| BestDay {
        date: d.date,
        count: d.count,
    })
}
