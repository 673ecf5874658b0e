//! Configuration types for the arbitrage scanner.

use crate::{error::ScanError, filter::SortBy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration for a scan.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Minimum fuzzy score (0-100) for two titles or labels to match
    pub similarity_threshold: u8,
    /// Minimum guaranteed profit to report, in currency units
    pub min_profit: Decimal,
    /// Only report events ending within this many days
    pub max_days_left: Option<i64>,
    /// Only report events ending at least this many days from now
    pub min_days_left: Option<i64>,
    /// Capital basis for the stake split
    pub stake: Decimal,
    /// Output ordering
    pub sort_by: SortBy,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 75,
            min_profit: Decimal::TWO,
            max_days_left: None,
            min_days_left: None,
            stake: Decimal::ONE_HUNDRED,
            sort_by: SortBy::None,
        }
    }
}

impl ScannerConfig {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.similarity_threshold > 100 {
            return Err(ScanError::Config(format!(
                "similarity_threshold {} exceeds 100",
                self.similarity_threshold
            )));
        }

        if self.stake <= Decimal::ZERO {
            return Err(ScanError::Config(format!("stake {} must be positive", self.stake)));
        }

        for (name, bound) in [("max_days_left", self.max_days_left), ("min_days_left", self.min_days_left)] {
            if let Some(days) = bound.filter(|days| *days < 0) {
                return Err(ScanError::Config(format!("{name} {days} must not be negative")));
            }
        }

        if let (Some(min), Some(max)) = (self.min_days_left, self.max_days_left) {
            if min > max {
                return Err(ScanError::Config(format!(
                    "min_days_left {min} exceeds max_days_left {max}"
                )));
            }
        }

        Ok(())
    }

    /// Create from environment variables.
    ///
    /// Reads, falling back to [`Default`] when unset or unparseable:
    /// - `SIMILARITY_THRESHOLD` (default: 75)
    /// - `MIN_PROFIT` (default: 2)
    /// - `MAX_DAYS_LEFT` / `MIN_DAYS_LEFT` (default: unbounded)
    /// - `STAKE` (default: 100)
    /// - `SORT_BY` = `none` | `similarity` | `profit` (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup, see [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            lookup(key).and_then(|value| value.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            similarity_threshold: parse(&lookup, "SIMILARITY_THRESHOLD").unwrap_or(defaults.similarity_threshold),
            min_profit: parse(&lookup, "MIN_PROFIT").unwrap_or(defaults.min_profit),
            max_days_left: parse(&lookup, "MAX_DAYS_LEFT").or(defaults.max_days_left),
            min_days_left: parse(&lookup, "MIN_DAYS_LEFT").or(defaults.min_days_left),
            stake: parse(&lookup, "STAKE").unwrap_or(defaults.stake),
            sort_by: parse(&lookup, "SORT_BY").unwrap_or(defaults.sort_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ScannerConfig::default();
        assert_eq!(config.similarity_threshold, 75);
        assert_eq!(config.min_profit, dec!(2));
        assert_eq!(config.stake, dec!(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let vars = HashMap::from([
            ("SIMILARITY_THRESHOLD", "80"),
            ("MIN_PROFIT", "3.5"),
            ("MIN_DAYS_LEFT", "1"),
            ("STAKE", "not-a-number"),
            ("SORT_BY", "Profit"),
        ]);

        let config = ScannerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.similarity_threshold, 80);
        assert_eq!(config.min_profit, dec!(3.5));
        assert_eq!(config.min_days_left, Some(1));
        assert_eq!(config.max_days_left, None);
        assert_eq!(config.stake, dec!(100));
        assert_eq!(config.sort_by, SortBy::Profit);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ScannerConfig =
            serde_json::from_str(r#"{"similarity_threshold": 90, "max_days_left": 30}"#).unwrap();

        assert_eq!(config.similarity_threshold, 90);
        assert_eq!(config.max_days_left, Some(30));
        assert_eq!(config.stake, dec!(100));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let invalid = [
            ScannerConfig { similarity_threshold: 101, ..Default::default() },
            ScannerConfig { stake: Decimal::ZERO, ..Default::default() },
            ScannerConfig { max_days_left: Some(-1), ..Default::default() },
            ScannerConfig { min_days_left: Some(10), max_days_left: Some(5), ..Default::default() },
        ];

        for config in invalid {
            assert!(matches!(config.validate(), Err(ScanError::Config(_))), "{config:?}");
        }
    }
}
