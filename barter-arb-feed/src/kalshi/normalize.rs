use super::model::{KalshiFeedEvent, KalshiFeedMarket};
use crate::is_valid_outcome;
use barter_arb_scanner::{NormalizedEvent, Outcome, Venue};
use indexmap::IndexMap;
use tracing::debug;

/// Consolidate Kalshi feed events into [`NormalizedEvent`]s.
///
/// Markets are grouped by `(event_title, event_subtitle)` in first-seen order.
/// The first market of a group provides the start and end dates. Events
/// left without any valid outcome are dropped.
pub fn normalize_feed(feed: Vec<KalshiFeedEvent>) -> Vec<NormalizedEvent> {
    let venue = Venue::kalshi();
    let mut grouped: IndexMap<(String, String), NormalizedEvent> = IndexMap::new();

    for event in feed {
        if event.markets.is_empty() {
            debug!(title = %event.event_title, "Skipping Kalshi event without markets");
            continue;
        }

        for market in &event.markets {
            let key = (event.event_title.clone(), event.event_subtitle.clone());
            let normalized = grouped.entry(key).or_insert_with(|| {
                NormalizedEvent::new(&event.event_title, &event.event_subtitle, Vec::new())
                    .with_dates(market.open_time(), market.close_time())
            });

            let outcome = market_outcome(market);
            if is_valid_outcome(&venue, &normalized.title, &outcome) {
                normalized.outcomes.push(outcome);
            }
        }
    }

    grouped
        .into_values()
        .filter(|event| !event.outcomes.is_empty())
        .collect()
}

/// One outcome per market: YES priced at `yes_ask`, NO at its complement.
fn market_outcome(market: &KalshiFeedMarket) -> Outcome {
    let label = market.yes_subtitle.clone().unwrap_or_default();
    match market.yes_ask {
        Some(yes_ask) => Outcome::from_yes_ask(label, yes_ask),
        None => Outcome::new(label, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kalshi::model::KalshiFeed;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn feed() -> Vec<KalshiFeedEvent> {
        let payload = json!({
            "feed": [
                {
                    "event_title": "How much solar capacity will be installed in the US this year?",
                    "event_subtitle": "In 2025",
                    "markets": [
                        {"yes_subtitle": "At least 50 GWdc", "yes_ask": 20, "open_ts": "2024-12-20T15:00:00Z", "close_ts": "2026-03-31T15:00:00Z"},
                        {"yes_subtitle": "At least 60 GWdc", "yes_ask": 8, "open_ts": "2024-12-21T15:00:00Z", "close_ts": "2026-04-30T15:00:00Z"}
                    ]
                },
                {
                    "event_title": "Fed decision in March",
                    "event_subtitle": "",
                    "markets": []
                },
                {
                    "event_title": "How much solar capacity will be installed in the US this year?",
                    "event_subtitle": "In 2025",
                    "markets": [
                        {"yes_subtitle": "At least 70 GWdc", "yes_ask": 3, "open_ts": null, "close_ts": null}
                    ]
                },
                {
                    "event_title": "How much solar capacity will be installed in the US this year?",
                    "event_subtitle": "In 2026",
                    "markets": [
                        {"yes_subtitle": "At least 50 GWdc", "yes_ask": 140, "close_ts": "2027-03-31T15:00:00Z"}
                    ]
                }
            ]
        });

        serde_json::from_value::<KalshiFeed>(payload).unwrap().feed
    }

    #[test]
    fn test_groups_markets_by_title_and_subtitle() {
        let events = normalize_feed(feed());

        // "Fed decision" has no markets and "In 2026" has only an invalid one
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.subtitle, "In 2025");
        let labels: Vec<_> = event.outcomes.iter().filter_map(Outcome::label).collect();
        assert_eq!(labels, vec!["At least 50 GWdc", "At least 60 GWdc", "At least 70 GWdc"]);
    }

    #[test]
    fn test_dates_from_first_market() {
        let event = &normalize_feed(feed())[0];
        assert_eq!(
            event.start_date,
            Some(Utc.with_ymd_and_hms(2024, 12, 20, 15, 0, 0).unwrap())
        );
        assert_eq!(
            event.end_date,
            Some(Utc.with_ymd_and_hms(2026, 3, 31, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_no_ask_is_complement() {
        let event = &normalize_feed(feed())[0];
        assert_eq!(event.outcomes[0].yes_ask, Some(dec!(20)));
        assert_eq!(event.outcomes[0].no_ask, Some(dec!(80)));
        assert_eq!(event.outcomes[1].no_ask, Some(dec!(92)));
    }

    #[test]
    fn test_missing_yes_ask_kept_unpriced() {
        let payload = json!([{
            "event_title": "Fed decision in March",
            "event_subtitle": "",
            "markets": [{"yes_subtitle": "Cut 25bps", "yes_ask": null}]
        }]);

        let events = normalize_feed(serde_json::from_value(payload).unwrap());
        assert_eq!(events[0].outcomes[0].yes_ask, None);
        assert_eq!(events[0].outcomes[0].no_ask, None);
    }
}
