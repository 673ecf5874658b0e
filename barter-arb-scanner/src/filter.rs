//! Threshold filtering and ordering of arbitrage candidates.

use crate::{config::ScannerConfig, opportunity::ArbitrageOpportunity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output ordering of the opportunity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Keep the canonical matching order
    #[default]
    None,
    /// Title similarity descending, then outcome similarity descending
    Similarity,
    /// Guaranteed profit descending
    Profit,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(SortBy::None),
            "similarity" => Ok(SortBy::Similarity),
            "profit" => Ok(SortBy::Profit),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Retains only candidates that clear every configured threshold.
#[derive(Debug, Clone)]
pub struct OpportunityFilter {
    pub similarity_threshold: u8,
    pub min_profit: Decimal,
    pub max_days_left: Option<i64>,
    pub min_days_left: Option<i64>,
    pub sort_by: SortBy,
}

impl From<&ScannerConfig> for OpportunityFilter {
    fn from(config: &ScannerConfig) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            min_profit: config.min_profit,
            max_days_left: config.max_days_left,
            min_days_left: config.min_days_left,
            sort_by: config.sort_by,
        }
    }
}

impl OpportunityFilter {
    /// Whether a time-to-expiry bound is active.
    pub fn time_bounded(&self) -> bool {
        self.max_days_left.is_some() || self.min_days_left.is_some()
    }

    /// Check `days_remaining` against the time bounds.
    ///
    /// With a bound active, an unknown `days_remaining` never passes.
    pub fn accepts_days(&self, days_remaining: Option<i64>) -> bool {
        if !self.time_bounded() {
            return true;
        }

        let Some(days) = days_remaining else {
            return false;
        };

        self.max_days_left.is_none_or(|max| days <= max) && self.min_days_left.is_none_or(|min| days >= min)
    }

    /// Check every threshold for a single candidate.
    pub fn accepts(&self, opportunity: &ArbitrageOpportunity) -> bool {
        let threshold = f64::from(self.similarity_threshold);

        opportunity.title_similarity >= threshold
            && opportunity.outcome_similarity >= threshold
            && opportunity.meets_threshold(self.min_profit)
            && self.accepts_days(opportunity.days_remaining)
    }

    /// Drop rejected candidates and apply the configured ordering.
    pub fn apply(&self, candidates: Vec<ArbitrageOpportunity>) -> Vec<ArbitrageOpportunity> {
        let mut retained: Vec<_> = candidates
            .into_iter()
            .filter(|opportunity| self.accepts(opportunity))
            .collect();

        sort_opportunities(&mut retained, self.sort_by);
        retained
    }
}

/// Stable, descending sort; ties keep their existing relative order.
pub fn sort_opportunities(opportunities: &mut [ArbitrageOpportunity], sort_by: SortBy) {
    match sort_by {
        SortBy::None => {}
        SortBy::Similarity => opportunities.sort_by(|a, b| {
            b.title_similarity
                .total_cmp(&a.title_similarity)
                .then_with(|| b.outcome_similarity.total_cmp(&a.outcome_similarity))
        }),
        SortBy::Profit => opportunities.sort_by(|a, b| b.guaranteed_profit.cmp(&a.guaranteed_profit)),
    }
}
