pub mod contribution;
pub mod github;
pub mod stats;

pub use contribution::{DailyRecord, YearContributions};
pub use github::{ActivityEvent, ActivitySummary, LanguageCount, Profile, Repo};
pub use stats::{BestDay, Grade, MonthlyTotal, Severity, StatsBundle, Weekday};
