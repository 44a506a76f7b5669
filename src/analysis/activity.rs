use chrono::{DateTime, Utc};

use crate::models::{ActivityEvent, ActivitySummary, LanguageCount, Profile, Repo};
use crate::source::github::{RawEvent, RawProfile, RawRepo};

const TOP_LANGUAGES: usize = 8;
const MAX_EVENTS: usize = 10;
const KEPT_EVENT_TYPES: [&str; 6] = [
    "PushEvent",
    "CreateEvent",
    "PullRequestEvent",
    "IssuesEvent",
    "WatchEvent",
    "ForkEvent",
];

/// Reduce the raw profile, repository and event payloads to the summary the
/// dashboard and `profile` command show.
pub fn summarize(
    identity: &str,
    profile: RawProfile,
    repos: Vec<RawRepo>,
    events: Vec<RawEvent>,
) -> ActivitySummary {
    let profile = Profile {
        name: profile
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| identity.to_string()),
        avatar: profile.avatar_url,
        public_repos: profile.public_repos,
        followers: profile.followers,
        following: profile.following,
        created_at: profile.created_at,
    };

    let repos: Vec<Repo> = repos
        .into_iter()
        .map(|r| Repo {
            name: r.name,
            stars: r.stargazers_count,
            forks: r.forks_count,
            language: r.language,
            updated_at: r.updated_at,
        })
        .collect();

    let total_stars = repos.iter().map(|r| r.stars as u64).sum();
    let total_forks = repos.iter().map(|r| r.forks as u64).sum();
    let top_languages = top_languages(&repos);

    let events = events
        .iter()
        .filter(|e| KEPT_EVENT_TYPES.contains(&e.kind.as_str()))
        .take(MAX_EVENTS)
        .map(describe_event)
        .collect();

    ActivitySummary {
        profile,
        repos,
        events,
        total_stars,
        total_forks,
        top_languages,
    }
}

/// Repository count per language, most used first. Equal counts keep the
/// order in which the languages were first seen.
pub fn top_languages(repos: &[Repo]) -> Vec<LanguageCount> {
    let mut counts: Vec<LanguageCount> = Vec::new();
    for lang in repos.iter().filter_map(|r| r.language.as_deref()) {
        match counts.iter_mut().find(|c| c.name == lang) {
            Some(entry) => entry.count += 1,
            None => counts.push(LanguageCount {
                name: lang.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_LANGUAGES);
    counts
}

pub fn describe_event(event: &RawEvent) -> ActivityEvent {
    let repo = event.repo.name.as_str();
    let payload = &event.payload;

    let message = match event.kind.as_str() {
        "PushEvent" => {
            let commits = payload.commits.as_ref().map(Vec::len).unwrap_or(0);
            let plural = if commits == 1 { "" } else { "s" };
            format!("Pushed {commits} commit{plural} to {repo}")
        }
        "CreateEvent" => {
            let ref_type = payload.ref_type.as_deref().unwrap_or("repo");
            match payload.git_ref.as_deref() {
                Some(r) => format!("Created {ref_type} \"{r}\" in {repo}"),
                None => format!("Created {ref_type} in {repo}"),
            }
        }
        "PullRequestEvent" => format!(
            "{} PR #{} in {repo}",
            payload.action.as_deref().unwrap_or("updated"),
            number_or_unknown(payload.pull_request.as_ref().map(|p| p.number)),
        ),
        "IssuesEvent" => format!(
            "{} issue #{} in {repo}",
            payload.action.as_deref().unwrap_or("updated"),
            number_or_unknown(payload.issue.as_ref().map(|i| i.number)),
        ),
        "WatchEvent" => format!("Starred {repo}"),
        "ForkEvent" => format!("Forked {repo}"),
        other => format!("{} on {repo}", other.replace("Event", "")),
    };

    ActivityEvent {
        kind: event.kind.replace("Event", "").to_uppercase(),
        repo: repo.to_string(),
        created_at: event.created_at,
        message,
    }
}

fn number_or_unknown(n: Option<u64>) -> String {
    n.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Relative age of an event: minutes, hours, days, then a short date.
pub fn format_event_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let mins = elapsed.num_minutes().max(0);
    let hours = elapsed.num_hours().max(0);
    let days = elapsed.num_days().max(0);

    if mins < 60 {
        format!("{mins}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        then.format("%b %-d").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTone {
    Primary,
    Success,
    Warning,
    Danger,
    Highlight,
    Accent,
    Muted,
}

/// Short log-level tag and colour for an event kind.
pub fn event_level(kind: &str) -> (&str, EventTone) {
    match kind {
        "PUSH" => ("PUSH", EventTone::Primary),
        "CREATE" => ("CREATE", EventTone::Success),
        "PULLREQUEST" => ("PR", EventTone::Warning),
        "ISSUES" => ("ISSUE", EventTone::Danger),
        "WATCH" => ("STAR", EventTone::Highlight),
        "FORK" => ("FORK", EventTone::Accent),
        other => (other, EventTone::Muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::github::{EventPayload, EventRepo, Numbered};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn event(kind: &str, payload: EventPayload) -> RawEvent {
        RawEvent {
            kind: kind.to_string(),
            repo: EventRepo {
                name: "octo/repo".to_string(),
            },
            created_at: at(2025, 3, 4, 12, 0),
            payload,
        }
    }

    fn repo(name: &str, language: Option<&str>, stars: u32, forks: u32) -> RawRepo {
        RawRepo {
            name: name.to_string(),
            stargazers_count: stars,
            forks_count: forks,
            language: language.map(str::to_string),
            updated_at: at(2025, 1, 1, 0, 0),
        }
    }

    fn profile(name: Option<&str>) -> RawProfile {
        RawProfile {
            name: name.map(str::to_string),
            avatar_url: "https://avatars.example/u/1".to_string(),
            public_repos: 3,
            followers: 10,
            following: 2,
            created_at: at(2022, 12, 1, 0, 0),
        }
    }

    #[test]
    fn push_event_pluralizes_commits() {
        let one = event(
            "PushEvent",
            EventPayload {
                commits: Some(vec![serde_json::json!({})]),
                ..Default::default()
            },
        );
        assert_eq!(describe_event(&one).message, "Pushed 1 commit to octo/repo");

        let none = event("PushEvent", EventPayload::default());
        let described = describe_event(&none);
        assert_eq!(described.message, "Pushed 0 commits to octo/repo");
        assert_eq!(described.kind, "PUSH");
    }

    #[test]
    fn create_pull_request_and_issue_messages() {
        let create = event(
            "CreateEvent",
            EventPayload {
                ref_type: Some("branch".to_string()),
                git_ref: Some("main".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            describe_event(&create).message,
            "Created branch \"main\" in octo/repo"
        );

        let bare_create = event("CreateEvent", EventPayload::default());
        assert_eq!(describe_event(&bare_create).message, "Created repo in octo/repo");

        let pr = event(
            "PullRequestEvent",
            EventPayload {
                action: Some("opened".to_string()),
                pull_request: Some(Numbered { number: 42 }),
                ..Default::default()
            },
        );
        let described = describe_event(&pr);
        assert_eq!(described.message, "opened PR #42 in octo/repo");
        assert_eq!(described.kind, "PULLREQUEST");

        let issue = event(
            "IssuesEvent",
            EventPayload {
                action: Some("closed".to_string()),
                issue: Some(Numbered { number: 7 }),
                ..Default::default()
            },
        );
        assert_eq!(describe_event(&issue).message, "closed issue #7 in octo/repo");
    }

    #[test]
    fn summarize_filters_and_caps_events() {
        let mut events: Vec<RawEvent> = (0..12)
            .map(|_| event("WatchEvent", EventPayload::default()))
            .collect();
        events.insert(0, event("GollumEvent", EventPayload::default()));
        events.insert(1, event("ForkEvent", EventPayload::default()));

        let summary = summarize("octo", profile(None), vec![], events);
        assert_eq!(summary.events.len(), 10);
        assert_eq!(summary.events[0].message, "Forked octo/repo");
        assert_eq!(summary.events[1].message, "Starred octo/repo");
        assert_eq!(summary.profile.name, "octo");
    }

    #[test]
    fn summarize_totals_and_languages() {
        let repos = vec![
            repo("a", Some("TypeScript"), 5, 1),
            repo("b", Some("Rust"), 3, 0),
            repo("c", None, 1, 2),
            repo("d", Some("Rust"), 0, 0),
            repo("e", Some("Java"), 0, 0),
        ];
        let summary = summarize("octo", profile(Some("Octo Cat")), repos, vec![]);
        assert_eq!(summary.total_stars, 9);
        assert_eq!(summary.total_forks, 3);
        assert_eq!(summary.profile.name, "Octo Cat");
        let langs: Vec<(&str, u32)> = summary
            .top_languages
            .iter()
            .map(|l| (l.name.as_str(), l.count))
            .collect();
        assert_eq!(langs, vec![("Rust", 2), ("TypeScript", 1), ("Java", 1)]);
    }

    #[test]
    fn top_languages_keeps_eight() {
        let repos: Vec<Repo> = (0..12)
            .map(|i| Repo {
                name: format!("r{i}"),
                stars: 0,
                forks: 0,
                language: Some(format!("Lang{i}")),
                updated_at: at(2025, 1, 1, 0, 0),
            })
            .collect();
        let langs = top_languages(&repos);
        assert_eq!(langs.len(), 8);
        assert_eq!(langs[0].name, "Lang0");
    }

    #[test]
    fn relative_event_times() {
        let now = at(2025, 3, 10, 12, 0);
        assert_eq!(format_event_time(at(2025, 3, 10, 11, 15), now), "45m ago");
        assert_eq!(format_event_time(at(2025, 3, 10, 2, 0), now), "10h ago");
        assert_eq!(format_event_time(at(2025, 3, 7, 12, 0), now), "3d ago");
        assert_eq!(format_event_time(at(2025, 3, 1, 9, 0), now), "Mar 1");
        assert_eq!(format_event_time(at(2025, 3, 10, 12, 5), now), "0m ago");
    }

    #[test]
    fn event_levels() {
        assert_eq!(event_level("PULLREQUEST"), ("PR", EventTone::Warning));
        assert_eq!(event_level("WATCH"), ("STAR", EventTone::Highlight));
        assert_eq!(event_level("GOLLUM"), ("GOLLUM", EventTone::Muted));
    }
}
