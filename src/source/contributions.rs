use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{DailyRecord, YearContributions};
use crate::source::{ContributionSource, FetchError, get_json};

/// Body of `GET {base}/{identity}?y={year}`.
#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(default)]
    total: HashMap<String, u64>,
    #[serde(default)]
    contributions: Vec<DailyRecord>,
}

/// Contribution calendar feed over HTTP.
pub struct HttpContributionSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContributionSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn year_url(&self, identity: &str, year: i32) -> String {
        format!("{}/{}?y={}", self.base_url, identity, year)
    }
}

#[async_trait]
impl ContributionSource for HttpContributionSource {
    async fn fetch_year(
        &self,
        identity: &str,
        year: i32,
    ) -> Result<YearContributions, FetchError> {
        let url = self.year_url(identity, year);
        log::debug!("Fetching contributions for {} ({})", identity, year);

        let mut body: CalendarResponse = get_json(&self.client, &url).await?;
        body.contributions.sort_by_key(|r| r.date);
        let total = body.total.get(&year.to_string()).copied().unwrap_or(0);

        log::debug!(
            "Fetched {} days for {} ({}), total {}",
            body.contributions.len(),
            identity,
            year,
            total
        );

        Ok(YearContributions {
            year,
            records: body.contributions,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::build_http_client;
    use crate::source::test_server::{Route, serve};

    const BODY: &str = r#"{
        "total": {"2024": 7},
        "contributions": [
            {"date": "2024-01-02", "count": 5, "level": 3},
            {"date": "2024-01-01", "count": 2, "level": 1},
            {"date": "2024-01-03", "count": 0, "level": 0}
        ]
    }"#;

    fn source(base: &str) -> HttpContributionSource {
        HttpContributionSource::new(build_http_client(5).unwrap(), format!("{base}/v4/"))
    }

    #[tokio::test]
    async fn decodes_records_and_yearly_total() {
        let Some(base) = serve(vec![Route::new("/v4/octo?y=2024", "200 OK", BODY)]).await else {
            return;
        };

        let year = source(&base).fetch_year("octo", 2024).await.unwrap();
        assert_eq!(year.year, 2024);
        assert_eq!(year.total, 7);
        assert_eq!(year.records.len(), 3);
        // Returned ascending even when the feed is not.
        assert_eq!(year.records[0].date.to_string(), "2024-01-01");
        assert_eq!(year.records[1].count, 5);
        assert_eq!(year.records[1].level, 3);
    }

    #[tokio::test]
    async fn missing_total_defaults_to_zero() {
        let Some(base) = serve(vec![Route::new(
            "/v4/octo?y=2023",
            "200 OK",
            r#"{"contributions": []}"#,
        )])
        .await
        else {
            return;
        };

        let year = source(&base).fetch_year("octo", 2023).await.unwrap();
        assert_eq!(year.total, 0);
        assert!(year.records.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let Some(base) = serve(vec![Route::new(
            "/v4/octo",
            "500 Internal Server Error",
            r#"{"error": "boom"}"#,
        )])
        .await
        else {
            return;
        };

        let err = source(&base).fetch_year("octo", 2024).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }), "{err:?}");
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn garbage_body_is_a_decode_error() {
        let Some(base) = serve(vec![Route::new("/v4/octo", "200 OK", "not json")]).await else {
            return;
        };

        let err = source(&base).fetch_year("octo", 2024).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is essentially never listening.
        let source = HttpContributionSource::new(build_http_client(2).unwrap(), "http://127.0.0.1:9");
        let err = source.fetch_year("octo", 2024).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "{err:?}");
    }
}
