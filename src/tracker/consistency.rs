use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::analysis::consistency::analyze;
use crate::config::settings::SourceConfig;
use crate::models::{DailyRecord, StatsBundle, YearContributions};
use crate::source::{ContributionSource, FetchError, HttpContributionSource, build_http_client};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identifies one fetch request. Only the ticket with the latest generation
/// may change the tracker's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub year: i32,
}

type Completion = (FetchTicket, Result<YearContributions, FetchError>);

/// What renderers get to see. Cloned out of the tracker, never shared.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Selected year. May differ from `stats.year` while loading or after a
    /// failed fetch, when the previous bundle is still shown.
    pub year: i32,
    pub status: FetchStatus,
    pub loading: bool,
    pub error: Option<String>,
    pub stats: StatsBundle,
    #[serde(skip)]
    pub calendar: Vec<DailyRecord>,
    /// Yearly total as reported by the feed.
    pub reported_total: u64,
}

/// Owns the selected year and the last published analysis for one identity.
pub struct ConsistencyTracker {
    source: Arc<dyn ContributionSource>,
    identity: String,
    year: i32,
    generation: u64,
    status: FetchStatus,
    error: Option<String>,
    stats: StatsBundle,
    calendar: Vec<DailyRecord>,
    reported_total: u64,
    pinned_today: Option<NaiveDate>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl ConsistencyTracker {
    pub fn new(source: Arc<dyn ContributionSource>, identity: impl Into<String>, year: i32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            identity: identity.into(),
            year,
            generation: 0,
            status: FetchStatus::Idle,
            error: None,
            stats: StatsBundle::empty(year),
            calendar: Vec::new(),
            reported_total: 0,
            pinned_today: None,
            tx,
            rx,
        }
    }

    /// Tracker backed by the configured HTTP contribution feed.
    pub fn from_config(config: &SourceConfig, identity: &str, year: i32) -> Result<Self, FetchError> {
        let client = build_http_client(config.timeout_secs)?;
        let feed = HttpContributionSource::new(client, config.contributions_api.as_str());
        Ok(Self::new(Arc::new(feed), identity, year))
    }

    /// Pin "today" instead of reading the local clock on every analysis.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.pinned_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> &StatsBundle {
        &self.stats
    }

    pub fn calendar(&self) -> &[DailyRecord] {
        &self.calendar
    }

    pub fn reported_total(&self) -> u64 {
        self.reported_total
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            year: self.year,
            status: self.status,
            loading: self.loading(),
            error: self.error.clone(),
            stats: self.stats.clone(),
            calendar: self.calendar.clone(),
            reported_total: self.reported_total,
        }
    }

    /// Select `year` and enter `Loading`. The returned ticket supersedes every
    /// ticket handed out before it.
    pub fn begin(&mut self, year: i32) -> FetchTicket {
        self.generation += 1;
        self.year = year;
        self.status = FetchStatus::Loading;
        self.error = None;
        log::debug!(
            "Requesting {} for {} (generation {})",
            year,
            self.identity,
            self.generation
        );
        FetchTicket {
            generation: self.generation,
            year,
        }
    }

    /// Apply the outcome of a fetch. Returns `false` when the ticket is stale
    /// and the result was dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<YearContributions, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Discarding stale response for {} (generation {}, latest {})",
                ticket.year,
                ticket.generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(data) => {
                self.stats = analyze(ticket.year, &data.records, self.today());
                self.calendar = data.records;
                self.reported_total = data.total;
                self.status = FetchStatus::Ready;
                log::debug!(
                    "Analyzed {}: {} active of {} days, grade {}",
                    ticket.year,
                    self.stats.total_active_days,
                    self.stats.total_days,
                    self.stats.grade
                );
            }
            Err(e) => {
                log::warn!("Fetching {} failed: {}", ticket.year, e);
                self.error = Some(e.to_string());
                self.status = FetchStatus::Failed;
            }
        }
        true
    }

    /// Select `year` and fetch it in the background. Needs a tokio runtime.
    /// Results are applied by `pump` or `settle`.
    pub fn set_year(&mut self, year: i32) {
        let ticket = self.begin(year);
        let source = Arc::clone(&self.source);
        let identity = self.identity.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = source.fetch_year(&identity, ticket.year).await;
            // The tracker may be gone already; nothing to report to then.
            let _ = tx.send((ticket, result));
        });
    }

    pub fn refresh(&mut self) {
        self.set_year(self.year);
    }

    /// Kick off the first fetch if nothing has been requested yet.
    pub fn start(&mut self) {
        if self.status == FetchStatus::Idle {
            self.set_year(self.year);
        }
    }

    /// Apply every finished fetch without blocking. Returns `true` if state changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok((ticket, result)) = self.rx.try_recv() {
            changed |= self.complete(ticket, result);
        }
        changed
    }

    /// Wait until the latest request has resolved. Wrap in
    /// `tokio::time::timeout` to bound the wait.
    pub async fn settle(&mut self) {
        while self.status == FetchStatus::Loading {
            match self.rx.recv().await {
                Some((ticket, result)) => {
                    self.complete(ticket, result);
                }
                None => break,
            }
        }
    }

    pub async fn set_year_and_wait(&mut self, year: i32) -> &StatsBundle {
        self.set_year(year);
        self.settle().await;
        &self.stats
    }
}
