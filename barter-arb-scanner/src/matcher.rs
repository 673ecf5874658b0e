//! Cross-venue event and outcome matching.

use crate::{
    event::{NormalizedEvent, Outcome},
    similarity::{IndelRatio, Similarity},
};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::debug;

/// Two events, one per venue, whose titles are similar enough to be treated
/// as the same real-world question.
#[derive(Debug, Clone, Copy)]
pub struct MatchedEventPair<'a> {
    /// Position of `event_a` in venue A's snapshot
    pub index_a: usize,
    /// Position of `event_b` in venue B's snapshot
    pub index_b: usize,
    pub event_a: &'a NormalizedEvent,
    pub event_b: &'a NormalizedEvent,
    /// Title similarity (0-100)
    pub title_similarity: f64,
}

impl MatchedEventPair<'_> {
    /// The earlier of the two end dates, or `None` if either side lacks one.
    pub fn earliest_end_date(&self) -> Option<DateTime<Utc>> {
        match (self.event_a.end_date, self.event_b.end_date) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        }
    }

    /// Whole days until the earlier of the two events ends.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.earliest_end_date().map(|end| (end - now).num_days())
    }
}

/// Two outcomes of a [`MatchedEventPair`] whose labels match.
#[derive(Debug, Clone, Copy)]
pub struct MatchedOutcomePair<'a> {
    pub index_a: usize,
    pub index_b: usize,
    pub outcome_a: &'a Outcome,
    pub outcome_b: &'a Outcome,
    /// Trimmed, non-empty label of `outcome_a`
    pub label_a: &'a str,
    /// Trimmed, non-empty label of `outcome_b`
    pub label_b: &'a str,
    /// Label similarity (0-100)
    pub outcome_similarity: f64,
}

/// Exhaustive many-to-many matcher over an injectable [`Similarity`].
///
/// Every pair scoring at least `threshold` is kept; there is no best-match
/// restriction, so one event may pair with several counterparts.
#[derive(Debug, Clone)]
pub struct Matcher<S = IndelRatio> {
    similarity: S,
    threshold: u8,
}

impl Matcher<IndelRatio> {
    pub fn new(threshold: u8) -> Self {
        Self::with_similarity(threshold, IndelRatio)
    }
}

impl<S> Matcher<S>
where
    S: Similarity,
{
    pub fn with_similarity(threshold: u8, similarity: S) -> Self {
        Self {
            similarity,
            threshold,
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    fn accepts(&self, score: f64) -> bool {
        score >= f64::from(self.threshold)
    }

    /// Pair every venue A event with every venue B event whose title scores
    /// at or above the threshold.
    ///
    /// Pairs are returned in `(index_a, index_b)` order.
    pub fn match_events<'a>(
        &self,
        venue_a: &'a [NormalizedEvent],
        venue_b: &'a [NormalizedEvent],
    ) -> Vec<MatchedEventPair<'a>> {
        venue_a
            .iter()
            .enumerate()
            .cartesian_product(venue_b.iter().enumerate())
            .filter_map(|((index_a, event_a), (index_b, event_b))| {
                let title_similarity = self.similarity.score(&event_a.title, &event_b.title);
                self.accepts(title_similarity).then_some(MatchedEventPair {
                    index_a,
                    index_b,
                    event_a,
                    event_b,
                    title_similarity,
                })
            })
            .collect()
    }

    /// Pair the outcomes of a matched event pair by label.
    ///
    /// Outcomes without a usable label are never scored.
    pub fn match_outcomes<'a>(&self, pair: &MatchedEventPair<'a>) -> Vec<MatchedOutcomePair<'a>> {
        let labelled = |outcomes: &'a [Outcome]| {
            outcomes
                .iter()
                .enumerate()
                .filter_map(|(index, outcome)| match outcome.label() {
                    Some(label) => Some((index, outcome, label)),
                    None => {
                        debug!(index, "skipping outcome without label");
                        None
                    }
                })
                .collect::<Vec<_>>()
        };

        let outcomes_a = labelled(&pair.event_a.outcomes);
        let outcomes_b = labelled(&pair.event_b.outcomes);

        outcomes_a
            .iter()
            .cartesian_product(outcomes_b.iter())
            .filter_map(|(&(index_a, outcome_a, label_a), &(index_b, outcome_b, label_b))| {
                let outcome_similarity = self.similarity.score(label_a, label_b);
                self.accepts(outcome_similarity).then_some(MatchedOutcomePair {
                    index_a,
                    index_b,
                    outcome_a,
                    outcome_b,
                    label_a,
                    label_b,
                    outcome_similarity,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn event(title: &str, labels: &[&str]) -> NormalizedEvent {
        NormalizedEvent::new(
            title,
            "",
            labels
                .iter()
                .map(|label| Outcome::from_yes_ask(*label, dec!(50)))
                .collect(),
        )
    }

    #[test]
    fn test_match_events_many_to_many() {
        let venue_a = vec![event("Fed cuts rates in March", &[]), event("Who wins the Super Bowl", &[])];
        let venue_b = vec![
            event("Fed cuts rates in March?", &[]),
            event("Fed cuts rates in May?", &[]),
            event("Oscars best picture", &[]),
        ];

        let pairs = Matcher::new(75).match_events(&venue_a, &venue_b);
        let indices: Vec<_> = pairs.iter().map(|p| (p.index_a, p.index_b)).collect();

        assert_eq!(indices, vec![(0, 0), (0, 1)]);
        assert!(pairs.iter().all(|p| p.title_similarity >= 75.0));
    }

    #[test]
    fn test_match_events_threshold_100_is_case_insensitive_exact() {
        let venue_a = vec![event("Will it rain tomorrow", &[])];
        let venue_b = vec![event("WILL IT RAIN TOMORROW", &[]), event("Will it rain tomorrow?", &[])];

        let pairs = Matcher::new(100).match_events(&venue_a, &venue_b);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].index_b, 0);
        assert_eq!(pairs[0].title_similarity, 100.0);
    }

    #[test]
    fn test_match_events_empty_input() {
        let venue_a = vec![event("Anything", &[])];
        assert!(Matcher::new(0).match_events(&venue_a, &[]).is_empty());
        assert!(Matcher::new(0).match_events(&[], &venue_a).is_empty());
    }

    #[test]
    fn test_injected_similarity() {
        let venue_a = vec![event("a", &["x"]), event("b", &["y"])];
        let venue_b = vec![event("c", &["z"])];

        let always = Matcher::with_similarity(90, |_: &str, _: &str| 95.0);
        assert_eq!(always.match_events(&venue_a, &venue_b).len(), 2);

        let never = Matcher::with_similarity(90, |_: &str, _: &str| 10.0);
        assert!(never.match_events(&venue_a, &venue_b).is_empty());
    }

    #[test]
    fn test_match_outcomes_skips_missing_labels() {
        let mut event_a = event("Rain", &["Yes", "No"]);
        event_a.outcomes.push(Outcome {
            label: None,
            yes_ask: Some(dec!(10)),
            no_ask: Some(dec!(90)),
        });
        let mut event_b = event("Rain", &["yes"]);
        event_b.outcomes.push(Outcome::from_yes_ask("  ", dec!(20)));

        let matcher = Matcher::with_similarity(0, |_: &str, _: &str| 100.0);
        let pair = matcher.match_events(std::slice::from_ref(&event_a), std::slice::from_ref(&event_b))[0];
        let outcome_pairs = matcher.match_outcomes(&pair);

        let indices: Vec<_> = outcome_pairs.iter().map(|p| (p.index_a, p.index_b)).collect();
        assert_eq!(indices, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_match_outcomes_by_label() {
        let event_a = event("Solar capacity", &["At least 50 GWdc", "At least 60 GWdc"]);
        let event_b = event("Solar capacity", &["at least 50 gwdc"]);

        let matcher = Matcher::new(100);
        let pair = matcher.match_events(std::slice::from_ref(&event_a), std::slice::from_ref(&event_b))[0];
        let outcome_pairs = matcher.match_outcomes(&pair);

        assert_eq!(outcome_pairs.len(), 1);
        assert_eq!(outcome_pairs[0].label_a, "At least 50 GWdc");
        assert_eq!(outcome_pairs[0].label_b, "at least 50 gwdc");
    }

    #[test]
    fn test_days_remaining_uses_earliest_end_date() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let event_a = event("Rain", &[]).with_dates(None, Some(now + chrono::Duration::days(30)));
        let event_b = event("Rain", &[]).with_dates(None, Some(now + chrono::Duration::days(5)));
        let undated = event("Rain", &[]);

        let matcher = Matcher::new(100);
        let pair = matcher.match_events(std::slice::from_ref(&event_a), std::slice::from_ref(&event_b))[0];
        assert_eq!(pair.days_remaining(now), Some(5));
        assert_eq!(pair.days_remaining(now + chrono::Duration::days(7)), Some(-2));

        let pair = matcher.match_events(std::slice::from_ref(&event_a), std::slice::from_ref(&undated))[0];
        assert_eq!(pair.days_remaining(now), None);
    }
}
