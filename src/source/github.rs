use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::analysis::activity;
use crate::models::ActivitySummary;
use crate::source::{FetchError, get_json};

// Raw REST payloads. Only the fields the summary needs are decoded.

#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub ref_type: Option<String>,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub pull_request: Option<Numbered>,
    #[serde(default)]
    pub issue: Option<Numbered>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Numbered {
    pub number: u64,
}

/// Read-only client for the public profile endpoints.
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Profile, repositories and recent events, fetched concurrently. Any one
    /// failing fails the whole summary.
    pub async fn activity_summary(&self, identity: &str) -> Result<ActivitySummary, FetchError> {
        let user = format!("{}/users/{}", self.base_url, identity);
        let repos_url = format!("{user}/repos?per_page=100&sort=updated");
        let events_url = format!("{user}/events?per_page=30");

        log::debug!("Fetching profile, repos and events for {}", identity);
        let (profile, repos, events) = tokio::try_join!(
            get_json::<RawProfile>(&self.client, &user),
            get_json::<Vec<RawRepo>>(&self.client, &repos_url),
            get_json::<Vec<RawEvent>>(&self.client, &events_url),
        )?;

        Ok(activity::summarize(identity, profile, repos, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::build_http_client;
    use crate::source::test_server::{Route, serve};

    const PROFILE: &str = r#"{
        "login": "octo",
        "name": null,
        "avatar_url": "https://avatars.example/u/1",
        "public_repos": 2,
        "followers": 4,
        "following": 1,
        "created_at": "2022-12-01T10:00:00Z"
    }"#;

    const REPOS: &str = r#"[
        {"name": "one", "stargazers_count": 3, "forks_count": 1, "language": "Rust", "updated_at": "2025-01-02T00:00:00Z"},
        {"name": "two", "stargazers_count": 2, "forks_count": 0, "language": null, "updated_at": "2025-01-01T00:00:00Z"}
    ]"#;

    const EVENTS: &str = r#"[
        {"type": "PushEvent", "repo": {"name": "octo/one"}, "created_at": "2025-01-02T09:00:00Z",
         "payload": {"commits": [{"sha": "a"}, {"sha": "b"}]}},
        {"type": "MemberEvent", "repo": {"name": "octo/one"}, "created_at": "2025-01-02T08:00:00Z", "payload": {}},
        {"type": "WatchEvent", "repo": {"name": "rust-lang/rust"}, "created_at": "2025-01-01T08:00:00Z"}
    ]"#;

    #[tokio::test]
    async fn builds_summary_from_three_endpoints() {
        // More specific paths first: the profile path is a prefix of the others.
        let Some(base) = serve(vec![
            Route::new("/users/octo/repos", "200 OK", REPOS),
            Route::new("/users/octo/events", "200 OK", EVENTS),
            Route::new("/users/octo", "200 OK", PROFILE),
        ])
        .await
        else {
            return;
        };

        let client = GitHubClient::new(build_http_client(5).unwrap(), base);
        let summary = client.activity_summary("octo").await.unwrap();

        assert_eq!(summary.profile.name, "octo");
        assert_eq!(summary.profile.followers, 4);
        assert_eq!(summary.repos.len(), 2);
        assert_eq!(summary.total_stars, 5);
        assert_eq!(summary.total_forks, 1);
        assert_eq!(summary.top_languages.len(), 1);
        assert_eq!(summary.events.len(), 2);
        assert_eq!(summary.events[0].message, "Pushed 2 commits to octo/one");
        assert_eq!(summary.events[1].kind, "WATCH");
    }

    #[tokio::test]
    async fn rate_limited_endpoint_fails_the_summary() {
        let Some(base) = serve(vec![
            Route::new("/users/octo/repos", "200 OK", REPOS),
            Route::new("/users/octo/events", "403 Forbidden", r#"{"message": "rate limit"}"#),
            Route::new("/users/octo", "200 OK", PROFILE),
        ])
        .await
        else {
            return;
        };

        let client = GitHubClient::new(build_http_client(5).unwrap(), base);
        let err = client.activity_summary("octo").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 403, .. }), "{err:?}");
    }
}
