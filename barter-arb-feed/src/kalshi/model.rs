use barter_arb_scanner::event::{de_lenient_decimal, de_null_as_empty, parse_timestamp};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kalshi `users/feed` response.
///
/// ### Payload Example
/// ```json
/// {
///   "feed": [
///     {
///       "event_title": "How much solar capacity will be installed in the US this year?",
///       "event_subtitle": "In 2025",
///       "markets": [
///         {
///           "ticker": "KXSOLAR-25-50",
///           "yes_subtitle": "At least 50 GWdc",
///           "yes_bid": 11,
///           "yes_ask": 20,
///           "last_price": 11,
///           "open_ts": "2024-12-20T15:00:00Z",
///           "close_ts": "2026-03-31T15:00:00Z"
///         }
///       ]
///     }
///   ]
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct KalshiFeed {
    #[serde(default)]
    pub feed: Vec<KalshiFeedEvent>,
}

/// One event of the Kalshi feed with its markets.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct KalshiFeedEvent {
    pub event_title: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub event_subtitle: String,
    #[serde(default)]
    pub markets: Vec<KalshiFeedMarket>,
}

/// One binary market of a Kalshi event. Prices are in cents (0-100).
///
/// A non-numeric price decodes as `None` so one bad market never fails the feed.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct KalshiFeedMarket {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub yes_subtitle: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_decimal")]
    pub yes_bid: Option<Decimal>,
    #[serde(default, deserialize_with = "de_lenient_decimal")]
    pub yes_ask: Option<Decimal>,
    #[serde(default, deserialize_with = "de_lenient_decimal")]
    pub last_price: Option<Decimal>,
    #[serde(default)]
    pub open_ts: Option<String>,
    #[serde(default)]
    pub close_ts: Option<String>,
}

impl KalshiFeedMarket {
    pub fn open_time(&self) -> Option<DateTime<Utc>> {
        self.open_ts.as_deref().and_then(parse_timestamp)
    }

    pub fn close_time(&self) -> Option<DateTime<Utc>> {
        self.close_ts.as_deref().and_then(parse_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_de_kalshi_feed() {
        let input = r#"
        {
            "feed": [
                {
                    "event_title": "How much solar capacity will be installed in the US this year?",
                    "event_subtitle": null,
                    "markets": [
                        {
                            "ticker": "KXSOLAR-25-50",
                            "yes_subtitle": "At least 50 GWdc",
                            "no_subtitle": "",
                            "yes_bid": 11,
                            "yes_ask": 20,
                            "last_price": 11,
                            "price_delta": 0,
                            "close_ts": "2026-03-31T15:00:00Z",
                            "open_ts": "2024-12-20T15:00:00Z",
                            "rulebook_variables": {},
                            "result": ""
                        }
                    ]
                },
                {
                    "event_title": "Empty event"
                }
            ]
        }
        "#;

        let feed: KalshiFeed = serde_json::from_str(input).unwrap();
        assert_eq!(feed.feed.len(), 2);

        let event = &feed.feed[0];
        assert_eq!(event.event_subtitle, "");

        let market = &event.markets[0];
        assert_eq!(market.ticker.as_deref(), Some("KXSOLAR-25-50"));
        assert_eq!(market.yes_ask, Some(dec!(20)));
        assert_eq!(
            market.close_time(),
            Some(Utc.with_ymd_and_hms(2026, 3, 31, 15, 0, 0).unwrap())
        );

        assert!(feed.feed[1].markets.is_empty());
    }

    #[test]
    fn test_unparseable_timestamp_is_none() {
        let market: KalshiFeedMarket =
            serde_json::from_str(r#"{"yes_subtitle": "Yes", "yes_ask": 20, "close_ts": "soon"}"#).unwrap();
        assert_eq!(market.close_time(), None);
        assert_eq!(market.open_time(), None);
    }

    #[test]
    fn test_non_numeric_price_does_not_fail_feed() {
        let input = r#"
        {
            "feed": [
                {
                    "event_title": "Will it rain tomorrow?",
                    "markets": [
                        {"yes_subtitle": "London", "yes_bid": "", "yes_ask": "n/a", "last_price": null},
                        {"yes_subtitle": "Paris", "yes_ask": "35"},
                        {"yes_subtitle": "Berlin", "yes_ask": 41}
                    ]
                }
            ]
        }
        "#;

        let feed: KalshiFeed = serde_json::from_str(input).unwrap();
        let markets = &feed.feed[0].markets;
        assert_eq!(markets.len(), 3);
        assert_eq!(markets[0].yes_ask, None);
        assert_eq!(markets[0].yes_bid, None);
        assert_eq!(markets[0].last_price, None);
        assert_eq!(markets[1].yes_ask, Some(dec!(35)));
        assert_eq!(markets[2].yes_ask, Some(dec!(41)));
    }
}
