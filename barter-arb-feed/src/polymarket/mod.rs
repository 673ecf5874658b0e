use self::{model::GammaEvent, normalize::normalize_events};
use crate::{EventSource, error::FeedError, http::get_json};
use async_trait::async_trait;
use barter_arb_scanner::{NormalizedEvent, Venue};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;
use url::Url;

/// Polymarket gamma payload types.
pub mod model;

/// Conversion of gamma events into [`NormalizedEvent`]s.
pub mod normalize;

/// Polymarket gamma `events` endpoint.
///
/// See docs: <https://docs.polymarket.com/developers/gamma-markets-api/get-events>
pub const GAMMA_EVENTS_URL: &str = "https://gamma-api.polymarket.com/events";

/// Query parameters sent to the gamma `events` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaEventsQuery {
    pub closed: bool,
    pub limit: u32,
    pub liquidity_num_min: Decimal,
    pub volume_num_min: Decimal,
}

impl Default for GammaEventsQuery {
    /// Open events with meaningful liquidity and volume.
    fn default() -> Self {
        Self {
            closed: false,
            limit: 1000,
            liquidity_num_min: Decimal::from(5000),
            volume_num_min: Decimal::from(1000),
        }
    }
}

impl GammaEventsQuery {
    /// Append the query parameters to `base`.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("closed", &self.closed.to_string())
            .append_pair("limit", &self.limit.to_string())
            .append_pair("liquidity_num_min", &self.liquidity_num_min.to_string())
            .append_pair("volume_num_min", &self.volume_num_min.to_string());
        url
    }
}

/// Client for the Polymarket gamma events API.
#[derive(Debug, Clone)]
pub struct GammaEventsClient {
    client: Client,
    base_url: Url,
    query: GammaEventsQuery,
}

impl GammaEventsClient {
    pub fn new() -> Result<Self, FeedError> {
        Self::with_url(GAMMA_EVENTS_URL)
    }

    pub fn with_url(base_url: &str) -> Result<Self, FeedError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
            query: GammaEventsQuery::default(),
        })
    }

    pub fn with_query(mut self, query: GammaEventsQuery) -> Self {
        self.query = query;
        self
    }

    /// Full request URL, including query parameters.
    pub fn url(&self) -> Url {
        self.query.url(&self.base_url)
    }
}

#[async_trait]
impl EventSource for GammaEventsClient {
    fn venue(&self) -> Venue {
        Venue::polymarket()
    }

    async fn fetch_events(&self) -> Result<Vec<NormalizedEvent>, FeedError> {
        let payload: Value = get_json(&self.client, self.url()).await?;
        let raw_events = parse_events(payload)?;

        if raw_events.is_empty() {
            info!(venue = %self.venue(), "No events found");
            return Ok(Vec::new());
        }

        let raw_count = raw_events.len();
        let events = normalize_events(raw_events);
        info!(venue = %self.venue(), raw_events = raw_count, events = events.len(), "Fetched events");

        Ok(events)
    }
}

/// Decode a gamma `events` response, which must be a JSON array.
pub fn parse_events(payload: Value) -> Result<Vec<GammaEvent>, FeedError> {
    if !payload.is_array() {
        return Err(FeedError::Parse(format!(
            "Unexpected response format: expected a list of events, found {}",
            json_kind(&payload)
        )));
    }

    serde_json::from_value(payload)
        .map_err(|error| FeedError::Parse(format!("Failed to parse gamma events: {error}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_query_url() {
        let client = GammaEventsClient::new().unwrap();
        assert_eq!(
            client.url().as_str(),
            "https://gamma-api.polymarket.com/events?closed=false&limit=1000&liquidity_num_min=5000&volume_num_min=1000"
        );
    }

    #[test]
    fn test_custom_query_url() {
        let client = GammaEventsClient::new().unwrap().with_query(GammaEventsQuery {
            limit: 50,
            ..Default::default()
        });
        assert!(client.url().as_str().contains("limit=50"));
    }

    #[test]
    fn test_parse_events_requires_list() {
        let error = parse_events(json!({"error": "rate limited"})).unwrap_err();
        assert!(matches!(error, FeedError::Parse(message) if message.contains("an object")));

        assert!(parse_events(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_parse_events() {
        let events = parse_events(json!([
            {"title": "Will it rain tomorrow?", "markets": [{"outcomes": ["Yes", "No"], "outcomePrices": ["0.6", "0.4"]}]}
        ]))
        .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].markets[0].outcomes, vec!["Yes", "No"]);
    }
}
