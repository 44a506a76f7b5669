pub mod contributions;
pub mod github;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::YearContributions;

pub use contributions::HttpContributionSource;
pub use github::GitHubClient;

const USER_AGENT: &str = concat!("devstreak/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to fetch data: {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Remote provider of one identity's daily contribution calendar.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Daily records for `year`, ascending, plus the provider's yearly total.
    async fn fetch_year(&self, identity: &str, year: i32)
        -> Result<YearContributions, FetchError>;
}

/// Shared client for both sources. `timeout_secs == 0` leaves requests unbounded.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, FetchError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build().map_err(FetchError::Client)
}

/// GET `url` and decode the JSON body, mapping each failure stage to its own
/// `FetchError` variant.
pub(crate) async fn get_json<T>(client: &reqwest::Client, url: &str) -> Result<T, FetchError>
where
    T: serde::de::DeserializeOwned,
{
    let transport = |source| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(transport)?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
