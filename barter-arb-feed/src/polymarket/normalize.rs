use super::model::{GammaEvent, GammaMarket};
use crate::is_valid_outcome;
use barter_arb_scanner::{NormalizedEvent, Outcome, Venue, event::parse_price};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::debug;

/// Consolidate gamma events into [`NormalizedEvent`]s.
///
/// Outcomes of every market are grouped under their event title in
/// first-seen order. The first event seen with a title provides the subtitle
/// (its description) and the dates. Markets without any usable outcome are
/// skipped.
pub fn normalize_events(events: Vec<GammaEvent>) -> Vec<NormalizedEvent> {
    let venue = Venue::polymarket();
    let mut grouped: IndexMap<String, NormalizedEvent> = IndexMap::new();

    for event in &events {
        for market in &event.markets {
            let outcomes: Vec<_> = market_outcomes(market)
                .into_iter()
                .filter(|outcome| is_valid_outcome(&venue, &event.title, outcome))
                .collect();

            if outcomes.is_empty() {
                debug!(
                    title = %event.title,
                    question = ?market.question,
                    "Skipping Polymarket market without valid outcomes"
                );
                continue;
            }

            grouped
                .entry(event.title.clone())
                .or_insert_with(|| {
                    NormalizedEvent::new(&event.title, &event.description, Vec::new())
                        .with_dates(event.start_time(), event.end_time())
                })
                .outcomes
                .extend(outcomes);
        }
    }

    grouped.into_values().collect()
}

/// Outcomes quoted by one market.
///
/// A grouped market contributes a single outcome named by its group item
/// title and priced from the first outcome price. Otherwise each named
/// outcome is paired with its price. Unparseable prices are skipped.
fn market_outcomes(market: &GammaMarket) -> Vec<Outcome> {
    if let (Some(name), Some(price)) = (market.group_item_title(), market.outcome_prices.first()) {
        return probability_to_points(price)
            .map(|yes_ask| Outcome::from_yes_ask(name, yes_ask))
            .into_iter()
            .collect();
    }

    if market.outcomes.len() != market.outcome_prices.len() {
        debug!(
            question = ?market.question,
            outcomes = market.outcomes.len(),
            prices = market.outcome_prices.len(),
            "Outcome names and prices differ in length"
        );
        return Vec::new();
    }

    market
        .outcomes
        .iter()
        .zip(&market.outcome_prices)
        .filter_map(|(name, price)| {
            probability_to_points(price).map(|yes_ask| Outcome::from_yes_ask(name.as_str(), yes_ask))
        })
        .collect()
}

/// Convert a fractional price ("0.655") to percentage points (65.5).
fn probability_to_points(price: &str) -> Option<Decimal> {
    parse_price(price)?.checked_mul(Decimal::ONE_HUNDRED)
}
