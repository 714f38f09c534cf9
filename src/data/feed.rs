//! Loading the earthquake feed.
//!
//! The feed is fetched once per load. Every failure on the way (transport,
//! HTTP status, body decoding) is reported as a single [`DataLoadError`].

use crate::core::constants::{DEFAULT_FEED_URL, DEFAULT_REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::data::geojson::GeoJson;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Base URL of the USGS real-time summary feeds.
pub const USGS_SUMMARY_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Shared async HTTP client so repeated loads reuse one connection pool.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    build_client(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)).unwrap_or_else(|e| {
        log::warn!("falling back to default HTTP client: {}", e);
        Client::new()
    })
});

fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Failure to obtain or decode the feed
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{source_name} is not valid GeoJSON: {source}")]
    Decode {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Anything that can hand over one GeoJSON document of events
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human readable origin, used in logs and errors
    fn describe(&self) -> &str;

    async fn fetch(&self) -> Result<GeoJson, DataLoadError>;
}

fn decode(source_name: &str, body: &[u8]) -> Result<GeoJson, DataLoadError> {
    GeoJson::from_slice(body).map_err(|source| DataLoadError::Decode {
        source_name: source_name.to_string(),
        source,
    })
}

/// Feed served over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFeed {
    url: String,
    client: Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Uses a dedicated client with its own request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, DataLoadError> {
        Ok(Self {
            url: url.into(),
            client: build_client(timeout).map_err(DataLoadError::Client)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    fn describe(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<GeoJson, DataLoadError> {
        log::info!("loading earthquake feed from {}", self.url);

        let request_error = |source| DataLoadError::Request {
            url: self.url.clone(),
            source,
        };
        let response = self.client.get(&self.url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("feed {} answered with {}", self.url, status);
            return Err(DataLoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        log::info!("downloaded {} bytes from {}", body.len(), self.url);

        decode(&self.url, &body)
    }
}

/// Feed already held in memory, e.g. a saved copy of a USGS document
#[derive(Debug, Clone)]
pub struct StaticFeed {
    label: String,
    body: Vec<u8>,
}

impl StaticFeed {
    pub fn new(label: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    fn describe(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<GeoJson, DataLoadError> {
        decode(&self.label, &self.body)
    }
}

/// Minimum magnitude class of a USGS summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedMagnitude {
    Significant,
    M4_5,
    M2_5,
    M1_0,
    All,
}

impl FeedMagnitude {
    fn as_str(&self) -> &'static str {
        match self {
            FeedMagnitude::Significant => "significant",
            FeedMagnitude::M4_5 => "4.5",
            FeedMagnitude::M2_5 => "2.5",
            FeedMagnitude::M1_0 => "1.0",
            FeedMagnitude::All => "all",
        }
    }
}

/// Time window of a USGS summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedWindow {
    Hour,
    Day,
    Week,
    Month,
}

impl FeedWindow {
    fn as_str(&self) -> &'static str {
        match self {
            FeedWindow::Hour => "hour",
            FeedWindow::Day => "day",
            FeedWindow::Week => "week",
            FeedWindow::Month => "month",
        }
    }
}

/// One of the USGS summary feeds, named like `all_week` or `2.5_day`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsgsFeed {
    pub magnitude: FeedMagnitude,
    pub window: FeedWindow,
}

impl UsgsFeed {
    pub fn new(magnitude: FeedMagnitude, window: FeedWindow) -> Self {
        Self { magnitude, window }
    }

    pub fn url(&self) -> String {
        format!("{}/{}.geojson", USGS_SUMMARY_BASE, self)
    }
}

impl Default for UsgsFeed {
    fn default() -> Self {
        Self::new(FeedMagnitude::All, FeedWindow::Week)
    }
}

impl std::fmt::Display for UsgsFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.magnitude.as_str(), self.window.as_str())
    }
}

impl std::str::FromStr for UsgsFeed {
    type Err = crate::MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::MapError::InvalidConfig(format!("unknown USGS feed: {}", s));
        let (magnitude, window) = s.split_once('_').ok_or_else(invalid)?;

        let magnitude = match magnitude {
            "significant" => FeedMagnitude::Significant,
            "4.5" => FeedMagnitude::M4_5,
            "2.5" => FeedMagnitude::M2_5,
            "1.0" => FeedMagnitude::M1_0,
            "all" => FeedMagnitude::All,
            _ => return Err(invalid()),
        };
        let window = match window {
            "hour" => FeedWindow::Hour,
            "day" => FeedWindow::Day,
            "week" => FeedWindow::Week,
            "month" => FeedWindow::Month,
            _ => return Err(invalid()),
        };

        Ok(Self::new(magnitude, window))
    }
}

/// URL of the default feed, every event of the past week
pub fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}
