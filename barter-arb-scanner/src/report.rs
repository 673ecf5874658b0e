//! Human-readable rendering of scan results.

use crate::opportunity::ArbitrageOpportunity;
use std::fmt;

const SEPARATOR: &str = "--------------------------------------------------";

impl fmt::Display for ArbitrageOpportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Arbitrage Opportunity Found! **")?;
        writeln!(
            f,
            "Event: {} / {} (Similarity: {:.1}%)",
            self.title_a, self.title_b, self.title_similarity
        )?;
        writeln!(
            f,
            "Matched Outcome: {} <-> {} (Similarity: {:.1}%)",
            self.label_a, self.label_b, self.outcome_similarity
        )?;
        writeln!(
            f,
            "Buy YES on {} at {}% (Stake ${:.2})",
            self.yes_venue,
            self.yes_price.normalize(),
            self.yes_stake.round_dp(2)
        )?;
        writeln!(
            f,
            "Buy NO on {} at {}% (Stake ${:.2})",
            self.no_venue,
            self.no_price.normalize(),
            self.no_stake.round_dp(2)
        )?;
        writeln!(
            f,
            "Guaranteed Profit: ${:.2} ({:.2}%)",
            self.guaranteed_profit.round_dp(2),
            self.profit_percentage.round_dp(2)
        )?;
        match self.days_remaining {
            Some(days) => writeln!(f, "Days Remaining: {days}")?,
            None => writeln!(f, "Days Remaining: unknown")?,
        }
        write!(f, "{SEPARATOR}")
    }
}

/// Render one block per opportunity.
pub fn render_report(opportunities: &[ArbitrageOpportunity]) -> String {
    if opportunities.is_empty() {
        return "No arbitrage opportunities found.".to_string();
    }

    opportunities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event::Venue,
        opportunity::{ArbitrageDirection, Quote},
    };
    use rust_decimal_macros::dec;

    fn opportunity() -> ArbitrageOpportunity {
        ArbitrageOpportunity {
            title_a: "Will it rain tomorrow".to_string(),
            title_b: "Will it rain tomorrow?".to_string(),
            event_index_a: 0,
            event_index_b: 0,
            label_a: "Yes".to_string(),
            label_b: "Yes".to_string(),
            outcome_index_a: 0,
            outcome_index_b: 0,
            title_similarity: 97.674,
            outcome_similarity: 100.0,
            direction: ArbitrageDirection::YesOnA,
            yes_venue: Venue::kalshi(),
            no_venue: Venue::polymarket(),
            yes_price: dec!(30),
            no_price: dec!(40),
            quote_a: Quote { yes_ask: Some(dec!(30)), no_ask: Some(dec!(70)) },
            quote_b: Quote { yes_ask: Some(dec!(60)), no_ask: Some(dec!(40)) },
            stake: dec!(100),
            yes_stake: dec!(42.857142),
            no_stake: dec!(57.142858),
            total_cost: dec!(100),
            guaranteed_profit: dec!(42.857142),
            profit_percentage: dec!(42.857142),
            days_remaining: None,
        }
    }

    #[test]
    fn test_display_block() {
        let expected = "\
** Arbitrage Opportunity Found! **
Event: Will it rain tomorrow / Will it rain tomorrow? (Similarity: 97.7%)
Matched Outcome: Yes <-> Yes (Similarity: 100.0%)
Buy YES on Kalshi at 30% (Stake $42.86)
Buy NO on Polymarket at 40% (Stake $57.14)
Guaranteed Profit: $42.86 (42.86%)
Days Remaining: unknown
--------------------------------------------------";

        assert_eq!(opportunity().to_string(), expected);
    }

    #[test]
    fn test_render_report() {
        assert_eq!(render_report(&[]), "No arbitrage opportunities found.");

        let report = render_report(&[opportunity(), opportunity()]);
        assert_eq!(report.matches("** Arbitrage Opportunity Found! **").count(), 2);
    }
}
