//! Guaranteed-profit stake allocation for YES/NO price pairs.
//!
//! Uses rust_decimal for exact precision in financial calculations. Prices
//! are in percentage points (0-100) and a winning contract pays 100.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Allocation of a stake across the YES and NO legs of one direction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StakeSplit {
    /// Capital placed on the YES leg
    pub yes_stake: Decimal,
    /// Capital placed on the NO leg
    pub no_stake: Decimal,
    /// Payout if the proposition resolves YES
    pub payout_if_yes: Decimal,
    /// Payout if the proposition resolves NO
    pub payout_if_no: Decimal,
    /// Worst-case payout minus stake
    pub profit: Decimal,
    /// Profit relative to stake, in percent
    pub profit_percentage: Decimal,
}

impl StakeSplit {
    /// Total capital deployed across both legs.
    pub fn total_cost(&self) -> Decimal {
        self.yes_stake + self.no_stake
    }
}

/// Arbitrage calculator for complementary YES/NO quotes.
pub struct ArbitrageCalculator;

impl ArbitrageCalculator {
    /// Fraction of the stake a split may lose to rounding before it is
    /// considered non-viable (1%).
    pub const LOSS_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    /// Whether buying YES at `yes_ask` and NO at `no_ask` costs less than the
    /// guaranteed payout of 100.
    pub fn has_arbitrage(yes_ask: Decimal, no_ask: Decimal) -> bool {
        yes_ask + no_ask < Decimal::ONE_HUNDRED
    }

    /// Split `stake` so that the payout is the same whichever side resolves.
    ///
    /// Formula:
    /// ```text
    /// yes_stake = stake / (1 + no_ask / yes_ask)
    /// no_stake  = stake - yes_stake
    /// profit    = min(yes_stake / (yes_ask / 100), no_stake / (no_ask / 100)) - stake
    /// ```
    ///
    /// # Arguments
    /// * `yes_ask` - Price of the YES leg (0-100)
    /// * `no_ask` - Price of the NO leg (0-100)
    /// * `stake` - Total capital to allocate
    ///
    /// # Returns
    /// `None` when a price or the stake is not positive, when the profit is at
    /// or below `-LOSS_TOLERANCE * stake`, or when an intermediate value
    /// overflows.
    pub fn stake_split(yes_ask: Decimal, no_ask: Decimal, stake: Decimal) -> Option<StakeSplit> {
        if yes_ask <= Decimal::ZERO || no_ask <= Decimal::ZERO || stake <= Decimal::ZERO {
            return None;
        }

        let yes_stake = stake.checked_div(Decimal::ONE.checked_add(no_ask.checked_div(yes_ask)?)?)?;
        let no_stake = stake.checked_sub(yes_stake)?;

        let payout_if_yes = yes_stake.checked_div(yes_ask.checked_div(Decimal::ONE_HUNDRED)?)?;
        let payout_if_no = no_stake.checked_div(no_ask.checked_div(Decimal::ONE_HUNDRED)?)?;

        let profit = payout_if_yes.min(payout_if_no).checked_sub(stake)?;
        if !Self::within_loss_tolerance(profit, stake) {
            return None;
        }

        Some(StakeSplit {
            yes_stake,
            no_stake,
            payout_if_yes,
            payout_if_no,
            profit,
            profit_percentage: profit.checked_div(stake)?.checked_mul(Decimal::ONE_HUNDRED)?,
        })
    }

    /// Whether `profit` is strictly above `-LOSS_TOLERANCE * stake`.
    pub fn within_loss_tolerance(profit: Decimal, stake: Decimal) -> bool {
        stake
            .checked_mul(Self::LOSS_TOLERANCE)
            .is_some_and(|max_loss| profit > -max_loss)
    }

    /// Evaluate one direction: YES bought at `yes_ask` on one venue, NO
    /// bought at `no_ask` on the other.
    ///
    /// Returns `None` ("no opportunity") for missing or degenerate prices and
    /// when the combined cost is not below 100.
    pub fn evaluate(yes_ask: Option<Decimal>, no_ask: Option<Decimal>, stake: Decimal) -> Option<StakeSplit> {
        let (yes_ask, no_ask) = (yes_ask?, no_ask?);
        if !Self::has_arbitrage(yes_ask, no_ask) {
            return None;
        }
        Self::stake_split(yes_ask, no_ask, stake)
    }
}
