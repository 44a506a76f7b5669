use chrono::Datelike;

use crate::models::stats::MONTH_NAMES;
use crate::models::{DailyRecord, Weekday};

/// One column of the heatmap, Sunday at index 0. `None` cells are padding.
pub type Week = [Option<DailyRecord>; 7];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLabel {
    pub label: &'static str,
    pub week_index: usize,
}

fn first_weekday(records: &[DailyRecord]) -> usize {
    records
        .first()
        .map(|r| Weekday::from(r.date.weekday()).index())
        .unwrap_or(0)
}

/// Lay records out as week columns, padding the first week up to the weekday
/// of the first record and the last week up to Saturday.
pub fn layout_weeks(records: &[DailyRecord]) -> Vec<Week> {
    let mut weeks = Vec::new();
    let mut current: Vec<Option<DailyRecord>> = vec![None; first_weekday(records)];

    for record in records {
        current.push(Some(record.clone()));
        if current.len() == 7 {
            weeks.push(into_week(std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() && current.iter().any(Option::is_some) {
        weeks.push(into_week(current));
    }
    weeks
}

fn into_week(mut cells: Vec<Option<DailyRecord>>) -> Week {
    cells.resize(7, None);
    let mut week: Week = Default::default();
    for (slot, cell) in week.iter_mut().zip(cells) {
        *slot = cell;
    }
    week
}

/// Week column at which each month starts.
pub fn month_labels(records: &[DailyRecord]) -> Vec<MonthLabel> {
    let offset = first_weekday(records);
    let mut labels = Vec::new();
    let mut last_month = None;

    for (day_index, record) in records.iter().enumerate() {
        let month = record.date.month0() as usize;
        if last_month != Some(month) {
            labels.push(MonthLabel {
                label: MONTH_NAMES[month],
                week_index: (day_index + offset) / 7,
            });
            last_month = Some(month);
        }
    }
    labels
}

/// Selectable years, newest first.
pub fn available_years(first_year: i32, current_year: i32) -> Vec<i32> {
    if current_year < first_year {
        return vec![current_year];
    }
    (first_year..=current_year).rev().collect()
}
