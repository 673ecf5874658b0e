//! Batch arbitrage scan over two venue snapshots.

use crate::{
    calculator::ArbitrageCalculator,
    config::ScannerConfig,
    error::ScanError,
    event::{Venue, VenueSnapshot},
    filter::OpportunityFilter,
    matcher::{MatchedEventPair, Matcher},
    opportunity::{ArbitrageDirection, ArbitrageOpportunity},
    similarity::{IndelRatio, Similarity},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

/// Matches two venue snapshots and reports every risk-free position that
/// clears the configured thresholds.
///
/// Construction performs no work; call [`ArbitrageScanner::scan`] to run.
#[derive(Debug, Clone)]
pub struct ArbitrageScanner<S = IndelRatio> {
    config: ScannerConfig,
    matcher: Matcher<S>,
    filter: OpportunityFilter,
}

impl ArbitrageScanner<IndelRatio> {
    /// Create a scanner using the default [`IndelRatio`] similarity.
    pub fn new(config: ScannerConfig) -> Result<Self, ScanError> {
        Self::with_similarity(config, IndelRatio)
    }
}

impl<S> ArbitrageScanner<S>
where
    S: Similarity,
{
    /// Create a scanner with a custom similarity function.
    pub fn with_similarity(config: ScannerConfig, similarity: S) -> Result<Self, ScanError> {
        config.validate()?;

        Ok(Self {
            matcher: Matcher::with_similarity(config.similarity_threshold, similarity),
            filter: OpportunityFilter::from(&config),
            config,
        })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scan relative to the current time.
    pub fn scan(&self, venue_a: &VenueSnapshot, venue_b: &VenueSnapshot) -> Vec<ArbitrageOpportunity> {
        self.scan_at(venue_a, venue_b, Utc::now())
    }

    /// Scan two JSON arrays of event records, failing fast on schema errors.
    pub fn scan_json(
        &self,
        (venue_a, records_a): (Venue, &Value),
        (venue_b, records_b): (Venue, &Value),
    ) -> Result<Vec<ArbitrageOpportunity>, ScanError> {
        let venue_a = VenueSnapshot::from_json(venue_a, records_a)?;
        let venue_b = VenueSnapshot::from_json(venue_b, records_b)?;
        Ok(self.scan(&venue_a, &venue_b))
    }

    /// Scan with `days_remaining` computed relative to `now`.
    ///
    /// Output is ordered by (venue A event, venue B event, venue A outcome,
    /// venue B outcome, direction) unless a sort is configured.
    pub fn scan_at(
        &self,
        venue_a: &VenueSnapshot,
        venue_b: &VenueSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<ArbitrageOpportunity> {
        if venue_a.is_empty() || venue_b.is_empty() {
            info!(
                venue_a = %venue_a.venue,
                events_a = venue_a.events.len(),
                venue_b = %venue_b.venue,
                events_b = venue_b.events.len(),
                "No events found in one or both venues"
            );
            return Vec::new();
        }

        let event_pairs = self.matcher.match_events(&venue_a.events, &venue_b.events);

        let candidates: Vec<_> = event_pairs
            .iter()
            .filter(|pair| self.is_in_window(pair, now))
            .flat_map(|pair| self.evaluate_pair(&venue_a.venue, &venue_b.venue, pair, now))
            .collect();

        let candidate_count = candidates.len();
        let opportunities = self.filter.apply(candidates);

        info!(
            venue_a = %venue_a.venue,
            venue_b = %venue_b.venue,
            matched_events = event_pairs.len(),
            candidates = candidate_count,
            opportunities = opportunities.len(),
            "Arbitrage scan complete"
        );

        opportunities
    }

    /// Time bounds apply to every outcome of an event pair, so they are
    /// checked once per pair. Past end dates yield negative `days_remaining`.
    fn is_in_window(&self, pair: &MatchedEventPair<'_>, now: DateTime<Utc>) -> bool {
        let days_remaining = pair.days_remaining(now);
        let in_window = self.filter.accepts_days(days_remaining);
        if !in_window {
            debug!(
                title_a = %pair.event_a.title,
                title_b = %pair.event_b.title,
                ?days_remaining,
                "Skipping event pair outside time window"
            );
        }
        in_window
    }

    /// Check both directions of every matched outcome of an event pair.
    fn evaluate_pair(
        &self,
        venue_a: &Venue,
        venue_b: &Venue,
        pair: &MatchedEventPair<'_>,
        now: DateTime<Utc>,
    ) -> Vec<ArbitrageOpportunity> {
        let days_remaining = pair.days_remaining(now);
        let stake = self.config.stake;

        self.matcher
            .match_outcomes(pair)
            .iter()
            .flat_map(|outcome_pair| {
                ArbitrageDirection::ALL.into_iter().filter_map(move |direction| {
                    let (yes_ask, no_ask) = direction.prices(outcome_pair.outcome_a, outcome_pair.outcome_b);

                    let Some(split) = ArbitrageCalculator::evaluate(yes_ask, no_ask, stake) else {
                        debug!(
                            label_a = outcome_pair.label_a,
                            label_b = outcome_pair.label_b,
                            ?direction,
                            ?yes_ask,
                            ?no_ask,
                            "No opportunity"
                        );
                        return None;
                    };

                    Some(ArbitrageOpportunity::new(
                        (venue_a, venue_b),
                        pair,
                        outcome_pair,
                        direction,
                        split,
                        stake,
                        days_remaining,
                    ))
                })
            })
            .collect()
    }
}
