//! Cross-Venue Prediction Market Arbitrage Scanner for the Barter Trading Ecosystem
//!
//! This crate matches equivalent events and outcomes across two prediction
//! market venues by fuzzy title/label similarity, and computes the stake split
//! that guarantees a profit whichever way a matched YES/NO contract resolves.
//!
//! # Architecture
//!
//! A scan is a pure, single-pass batch computation over two immutable
//! [`VenueSnapshot`]s:
//!
//! ```text
//! VenueSnapshot x2 -> Matcher (events) -> Matcher (outcomes)
//!                  -> ArbitrageCalculator -> OpportunityFilter -> Vec<ArbitrageOpportunity>
//! ```
//!
//! # Key Components
//!
//! - [`ArbitrageScanner`]: Explicit entry point running the whole pipeline
//! - [`Matcher`]: Many-to-many event and outcome matching over a [`Similarity`]
//! - [`IndelRatio`]: Default case-insensitive normalized edit-distance ratio
//! - [`ArbitrageCalculator`]: Payout-equalizing stake split per direction
//! - [`OpportunityFilter`]: Similarity, profit and time-to-expiry thresholds
//! - [`ScannerConfig`]: Thresholds, stake and output ordering
//!
//! # Example
//!
//! ```rust,ignore
//! use barter_arb_scanner::{
//!     ArbitrageScanner, NormalizedEvent, Outcome, ScannerConfig, Venue, VenueSnapshot,
//! };
//! use rust_decimal_macros::dec;
//!
//! let kalshi = VenueSnapshot::new(
//!     Venue::kalshi(),
//!     vec![NormalizedEvent::new("Will it rain tomorrow", "", vec![Outcome::from_yes_ask("Yes", dec!(30))])],
//! );
//! let polymarket = VenueSnapshot::new(
//!     Venue::polymarket(),
//!     vec![NormalizedEvent::new("Will it rain tomorrow?", "", vec![Outcome::from_yes_ask("Yes", dec!(60))])],
//! );
//!
//! let scanner = ArbitrageScanner::new(ScannerConfig::default())?;
//! for opportunity in scanner.scan(&kalshi, &polymarket) {
//!     println!("{opportunity}");
//! }
//! ```
//!
//! # Price Model
//!
//! Prices are in percentage points and a winning contract pays 100:
//!
//! ```text
//! Buy YES on venue X + Buy NO on venue Y = guaranteed payout of 100
//! Arbitrage exists when yes_ask_X + no_ask_Y < 100
//! ```
//!
//! Both directions (YES on A / NO on B, and YES on B / NO on A) are checked
//! independently, each with its own pair of prices.

pub mod calculator;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod matcher;
pub mod opportunity;
pub mod report;
pub mod scanner;
pub mod similarity;

// Re-exports for convenience
pub use calculator::{ArbitrageCalculator, StakeSplit};
pub use config::ScannerConfig;
pub use error::{OutcomeError, ScanError, SchemaError};
pub use event::{NormalizedEvent, Outcome, Venue, VenueSnapshot};
pub use filter::{OpportunityFilter, SortBy};
pub use matcher::{MatchedEventPair, MatchedOutcomePair, Matcher};
pub use opportunity::{ArbitrageDirection, ArbitrageOpportunity, Quote};
pub use report::render_report;
pub use scanner::ArbitrageScanner;
pub use similarity::{IndelRatio, Similarity};
