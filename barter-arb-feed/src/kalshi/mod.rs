use self::{model::KalshiFeed, normalize::normalize_feed};
use crate::{EventSource, error::FeedError, http::get_json};
use async_trait::async_trait;
use barter_arb_scanner::{NormalizedEvent, Venue};
use reqwest::Client;
use tracing::info;
use url::Url;

/// Kalshi feed payload types.
pub mod model;

/// Conversion of Kalshi feed events into [`NormalizedEvent`]s.
pub mod normalize;

/// Kalshi public event feed URL.
pub const KALSHI_FEED_URL: &str = "https://api.elections.kalshi.com/v1/users/feed";

/// Client for the public Kalshi event feed.
#[derive(Debug, Clone)]
pub struct KalshiFeedClient {
    client: Client,
    url: Url,
}

impl KalshiFeedClient {
    pub fn new() -> Result<Self, FeedError> {
        Self::with_url(KALSHI_FEED_URL)
    }

    /// Point the client at a different feed URL (eg/ a mirror or local proxy).
    pub fn with_url(url: &str) -> Result<Self, FeedError> {
        Ok(Self {
            client: Client::new(),
            url: Url::parse(url)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl EventSource for KalshiFeedClient {
    fn venue(&self) -> Venue {
        Venue::kalshi()
    }

    async fn fetch_events(&self) -> Result<Vec<NormalizedEvent>, FeedError> {
        let payload: KalshiFeed = get_json(&self.client, self.url.clone()).await?;

        if payload.feed.is_empty() {
            info!(venue = %self.venue(), "No events found");
            return Ok(Vec::new());
        }

        let raw_events = payload.feed.len();
        let events = normalize_feed(payload.feed);
        info!(venue = %self.venue(), raw_events, events = events.len(), "Fetched events");

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let client = KalshiFeedClient::new().unwrap();
        assert_eq!(client.url().as_str(), KALSHI_FEED_URL);
        assert_eq!(client.venue(), Venue::kalshi());
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(KalshiFeedClient::with_url("not a url"), Err(FeedError::Url(_))));
    }
}
