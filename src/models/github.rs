use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub avatar: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// A public event already reduced to a one-line log message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Event type without the `Event` suffix, upper-cased (`PUSH`, `PULLREQUEST`, ...).
    pub kind: String,
    pub repo: String,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub profile: Profile,
    pub repos: Vec<Repo>,
    pub events: Vec<ActivityEvent>,
    pub total_stars: u64,
    pub total_forks: u64,
    pub top_languages: Vec<LanguageCount>,
}
