use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    pub fn all() -> [Weekday; 7] {
        [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ]
    }

    /// Sunday-based index, Sun = 0 .. Sat = 6.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Weekday> {
        Self::all().get(idx).copied()
    }

    pub fn as_str(&self) -> &'static str {
        WEEKDAY_NAMES[self.index()]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::all()[day.num_days_from_sunday() as usize]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Letter grade summarising the consistency percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "S+")]
    SPlus,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "—")]
    NoData,
}

impl Grade {
    /// Threshold table, checked top to bottom.
    const THRESHOLDS: [(u8, Grade); 8] = [
        (90, Grade::SPlus),
        (80, Grade::APlus),
        (70, Grade::A),
        (60, Grade::BPlus),
        (50, Grade::B),
        (40, Grade::CPlus),
        (30, Grade::C),
        (20, Grade::D),
    ];

    pub fn from_percent(pct: u8) -> Grade {
        Self::THRESHOLDS
            .iter()
            .find(|(min, _)| pct >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::SPlus => "S+",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NoData => "—",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Grade::SPlus => Severity::Legendary,
            Grade::APlus | Grade::A => Severity::Excellent,
            Grade::BPlus | Grade::B => Severity::Good,
            Grade::CPlus | Grade::C => Severity::Fair,
            Grade::D => Severity::Weak,
            Grade::F => Severity::Failing,
            Grade::NoData => Severity::Muted,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S+" => Ok(Grade::SPlus),
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C+" => Ok(Grade::CPlus),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "—" | "-" => Ok(Grade::NoData),
            _ => Err(anyhow::anyhow!("Unknown grade: {}", s)),
        }
    }
}

/// Display tier attached to a grade. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Legendary,
    Excellent,
    Good,
    Fair,
    Weak,
    Failing,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestDay {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: &'static str,
    pub count: u64,
}

/// Everything derived from one analysis pass over a year of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsBundle {
    pub year: i32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_active_days: u32,
    pub total_days: u32,
    pub total_contributions: u64,
    pub consistency_percent: u8,
    pub grade: Grade,
    /// Mean count per weekday, Sun..Sat, one decimal place.
    pub weekly_average: [f64; 7],
    /// `None` when there was nothing to analyze.
    pub best_weekday: Option<Weekday>,
    /// Sum of counts per month, Jan..Dec.
    pub monthly_totals: [u64; 12],
    pub best_day: Option<BestDay>,
}

impl StatsBundle {
    /// The defined "no data" result.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            current_streak: 0,
            longest_streak: 0,
            total_active_days: 0,
            total_days: 0,
            total_contributions: 0,
            consistency_percent: 0,
            grade: Grade::NoData,
            weekly_average: [0.0; 7],
            best_weekday: None,
            monthly_totals: [0; 12],
            best_day: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_days > 0
    }

    pub fn best_weekday_label(&self) -> &'static str {
        self.best_weekday.map(|d| d.as_str()).unwrap_or("—")
    }

    /// Best weekday worth pointing out: none when every average is zero.
    pub fn highlighted_weekday(&self) -> Option<Weekday> {
        self.best_weekday
            .filter(|d| self.weekly_average[d.index()] > 0.0)
    }

    pub fn monthly(&self) -> Vec<MonthlyTotal> {
        MONTH_NAMES
            .iter()
            .zip(self.monthly_totals.iter())
            .map(|(month, count)| MonthlyTotal {
                month: *month,
                count: *count,
            })
            .collect()
    }

    /// Streaks of a week or more get the "on fire" treatment.
    pub fn on_fire(&self) -> bool {
        self.current_streak >= 7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_thresholds_are_inclusive() {
        assert_eq!(Grade::from_percent(100), Grade::SPlus);
        assert_eq!(Grade::from_percent(90), Grade::SPlus);
        assert_eq!(Grade::from_percent(89), Grade::APlus);
        assert_eq!(Grade::from_percent(80), Grade::APlus);
        assert_eq!(Grade::from_percent(70), Grade::A);
        assert_eq!(Grade::from_percent(60), Grade::BPlus);
        assert_eq!(Grade::from_percent(50), Grade::B);
        assert_eq!(Grade::from_percent(40), Grade::CPlus);
        assert_eq!(Grade::from_percent(30), Grade::C);
        assert_eq!(Grade::from_percent(20), Grade::D);
        assert_eq!(Grade::from_percent(19), Grade::F);
        assert_eq!(Grade::from_percent(0), Grade::F);
    }

    #[test]
    fn grade_severity_tiers() {
        assert_eq!(Grade::SPlus.severity(), Severity::Legendary);
        assert_eq!(Grade::A.severity(), Severity::Excellent);
        assert_eq!(Grade::BPlus.severity(), Severity::Good);
        assert_eq!(Grade::C.severity(), Severity::Fair);
        assert_eq!(Grade::D.severity(), Severity::Weak);
        assert_eq!(Grade::F.severity(), Severity::Failing);
        assert_eq!(Grade::NoData.severity(), Severity::Muted);
    }

    #[test]
    fn grade_parses_its_own_labels() {
        for pct in [95u8, 85, 75, 65, 55, 45, 35, 25, 5] {
            let grade = Grade::from_percent(pct);
            assert_eq!(grade.as_str().parse::<Grade>().unwrap(), grade);
        }
        assert!("Z".parse::<Grade>().is_err());
    }

    #[test]
    fn weekday_from_chrono_is_sunday_based() {
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sun);
        assert_eq!(Weekday::from(chrono::Weekday::Sat).index(), 6);
        assert_eq!(Weekday::from_index(3), Some(Weekday::Wed));
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn idle_weeks_highlight_no_weekday() {
        let mut bundle = StatsBundle::empty(2024);
        bundle.best_weekday = Some(Weekday::Sun);
        assert_eq!(bundle.highlighted_weekday(), None);

        bundle.weekly_average[Weekday::Sun.index()] = 0.5;
        assert_eq!(bundle.highlighted_weekday(), Some(Weekday::Sun));
    }

    #[test]
    fn empty_bundle_has_all_twelve_months() {
        let bundle = StatsBundle::empty(2024);
        let months = bundle.monthly();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].month, "Jan");
        assert_eq!(months[11].month, "Dec");
        assert_eq!(bundle.best_weekday_label(), "—");
        assert!(!bundle.has_data());
    }
}
