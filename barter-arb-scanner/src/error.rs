//! Error types for the arbitrage scanner.
//!
//! Only schema and configuration problems are surfaced as errors. Unusable
//! outcomes, degenerate prices and non-viable directions are skipped locally
//! and never abort a scan.

use crate::event::Venue;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// An input collection does not have the shape of a normalized event list.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{venue} input is not a list of event records")]
    NotAList { venue: Venue },

    #[error("{venue} event #{index} is not an object")]
    NotAnObject { venue: Venue, index: usize },

    #[error("{venue} event #{index} is missing required field '{field}'")]
    MissingField {
        venue: Venue,
        index: usize,
        field: &'static str,
    },

    #[error("{venue} event #{index} is malformed: {source}")]
    Malformed {
        venue: Venue,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// An [`Outcome`](crate::event::Outcome) violating the YES/NO price model.
///
/// Returned by `Outcome::validate` so the normalizing caller can reject the
/// record before it reaches the scanner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutcomeError {
    #[error("ask price {0} is outside 0-100")]
    PriceOutOfRange(Decimal),

    #[error("yes_ask {yes_ask} + no_ask {no_ask} does not sum to 100")]
    PriceComplement { yes_ask: Decimal, no_ask: Decimal },
}
