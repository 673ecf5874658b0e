//! Arbitrage opportunity representation.

use crate::{
    calculator::StakeSplit,
    event::{Outcome, Venue},
    matcher::{MatchedEventPair, MatchedOutcomePair},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which venue the YES leg is bought on. The NO leg goes to the other venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ArbitrageDirection {
    /// Buy YES on venue A, buy NO on venue B
    YesOnA,
    /// Buy YES on venue B, buy NO on venue A
    YesOnB,
}

impl ArbitrageDirection {
    /// Both directions, in evaluation order.
    pub const ALL: [ArbitrageDirection; 2] = [ArbitrageDirection::YesOnA, ArbitrageDirection::YesOnB];

    /// The YES and NO asks this direction trades, taken only from its own legs.
    pub fn prices(&self, outcome_a: &Outcome, outcome_b: &Outcome) -> (Option<Decimal>, Option<Decimal>) {
        match self {
            ArbitrageDirection::YesOnA => (outcome_a.yes_ask, outcome_b.no_ask),
            ArbitrageDirection::YesOnB => (outcome_b.yes_ask, outcome_a.no_ask),
        }
    }

    /// Get the venue the YES leg is bought on.
    pub fn yes_venue<'a>(&self, venue_a: &'a Venue, venue_b: &'a Venue) -> &'a Venue {
        match self {
            ArbitrageDirection::YesOnA => venue_a,
            ArbitrageDirection::YesOnB => venue_b,
        }
    }

    /// Get the venue the NO leg is bought on.
    pub fn no_venue<'a>(&self, venue_a: &'a Venue, venue_b: &'a Venue) -> &'a Venue {
        match self {
            ArbitrageDirection::YesOnA => venue_b,
            ArbitrageDirection::YesOnB => venue_a,
        }
    }
}

/// Ask prices quoted by one venue for a matched outcome.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Quote {
    pub yes_ask: Option<Decimal>,
    pub no_ask: Option<Decimal>,
}

impl From<&Outcome> for Quote {
    fn from(outcome: &Outcome) -> Self {
        Self {
            yes_ask: outcome.yes_ask,
            no_ask: outcome.no_ask,
        }
    }
}

/// A risk-free position across two venues for one matched outcome.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArbitrageOpportunity {
    /// Event title on venue A
    pub title_a: String,
    /// Event title on venue B
    pub title_b: String,
    /// Position of the event in venue A's snapshot
    pub event_index_a: usize,
    /// Position of the event in venue B's snapshot
    pub event_index_b: usize,
    /// Outcome label on venue A
    pub label_a: String,
    /// Outcome label on venue B
    pub label_b: String,
    /// Position of the outcome within the venue A event
    pub outcome_index_a: usize,
    /// Position of the outcome within the venue B event
    pub outcome_index_b: usize,
    /// Title similarity (0-100)
    pub title_similarity: f64,
    /// Label similarity (0-100)
    pub outcome_similarity: f64,
    pub direction: ArbitrageDirection,
    /// Venue the YES leg is bought on
    pub yes_venue: Venue,
    /// Venue the NO leg is bought on
    pub no_venue: Venue,
    /// YES ask paid
    pub yes_price: Decimal,
    /// NO ask paid
    pub no_price: Decimal,
    /// Venue A's quotes for the outcome
    pub quote_a: Quote,
    /// Venue B's quotes for the outcome
    pub quote_b: Quote,
    /// Capital basis of the split
    pub stake: Decimal,
    pub yes_stake: Decimal,
    pub no_stake: Decimal,
    /// Capital deployed across both legs
    pub total_cost: Decimal,
    /// Worst-case profit in currency units
    pub guaranteed_profit: Decimal,
    /// Profit relative to stake, in percent
    pub profit_percentage: Decimal,
    /// Days until the earlier of the two events ends
    pub days_remaining: Option<i64>,
}

impl ArbitrageOpportunity {
    /// Create a new arbitrage opportunity from a viable split.
    pub fn new(
        venues: (&Venue, &Venue),
        event_pair: &MatchedEventPair<'_>,
        outcome_pair: &MatchedOutcomePair<'_>,
        direction: ArbitrageDirection,
        split: StakeSplit,
        stake: Decimal,
        days_remaining: Option<i64>,
    ) -> Self {
        let (venue_a, venue_b) = venues;
        let (yes_price, no_price) = direction.prices(outcome_pair.outcome_a, outcome_pair.outcome_b);

        Self {
            title_a: event_pair.event_a.title.clone(),
            title_b: event_pair.event_b.title.clone(),
            event_index_a: event_pair.index_a,
            event_index_b: event_pair.index_b,
            label_a: outcome_pair.label_a.to_string(),
            label_b: outcome_pair.label_b.to_string(),
            outcome_index_a: outcome_pair.index_a,
            outcome_index_b: outcome_pair.index_b,
            title_similarity: event_pair.title_similarity,
            outcome_similarity: outcome_pair.outcome_similarity,
            direction,
            yes_venue: direction.yes_venue(venue_a, venue_b).clone(),
            no_venue: direction.no_venue(venue_a, venue_b).clone(),
            yes_price: yes_price.unwrap_or_default(),
            no_price: no_price.unwrap_or_default(),
            quote_a: Quote::from(outcome_pair.outcome_a),
            quote_b: Quote::from(outcome_pair.outcome_b),
            stake,
            yes_stake: split.yes_stake,
            no_stake: split.no_stake,
            total_cost: split.total_cost(),
            guaranteed_profit: split.profit,
            profit_percentage: split.profit_percentage,
            days_remaining,
        }
    }

    /// Combined price of both legs; below 100 for a real arbitrage.
    pub fn combined_price(&self) -> Decimal {
        self.yes_price + self.no_price
    }

    /// Check if this opportunity meets a minimum profit threshold.
    pub fn meets_threshold(&self, min_profit: Decimal) -> bool {
        self.guaranteed_profit >= min_profit
    }
}
