//! Normalized event model shared by both venues.
//!
//! Venue-specific feeds are converted into [`NormalizedEvent`]s by the feed
//! collaborators. The scanner only ever reads them.

use crate::error::{OutcomeError, SchemaError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_more::{Display, From};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use smol_str::SmolStr;
use std::str::FromStr;

/// Fields every event record must carry, even when their value is null.
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "subtitle", "outcomes", "startDate", "endDate"];

/// Maximum deviation allowed between `yes_ask + no_ask` and 100.
pub const PRICE_COMPLEMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Human-readable label of a venue (e.g. "Kalshi").
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Display, From, Deserialize, Serialize)]
pub struct Venue(pub SmolStr);

impl Venue {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    pub fn kalshi() -> Self {
        Self::new("Kalshi")
    }

    pub fn polymarket() -> Self {
        Self::new("Polymarket")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One contract of an event, quoted in percentage points (0-100).
///
/// Prices are optional so that a record with a missing or non-numeric quote
/// can still be carried through and skipped by the scanner.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Outcome {
    /// Contract description (e.g. "At least 50 GWdc")
    #[serde(default)]
    pub label: Option<String>,
    /// Price to buy the YES side
    #[serde(default, deserialize_with = "de_lenient_decimal")]
    pub yes_ask: Option<Decimal>,
    /// Price to buy the NO side
    #[serde(default, deserialize_with = "de_lenient_decimal")]
    pub no_ask: Option<Decimal>,
}

impl Outcome {
    pub fn new(label: impl Into<String>, yes_ask: Option<Decimal>, no_ask: Option<Decimal>) -> Self {
        Self {
            label: Some(label.into()),
            yes_ask,
            no_ask,
        }
    }

    /// Create an outcome from its YES ask, deriving the NO ask as `100 - yes_ask`.
    pub fn from_yes_ask(label: impl Into<String>, yes_ask: Decimal) -> Self {
        Self::new(label, Some(yes_ask), Some(Decimal::ONE_HUNDRED - yes_ask))
    }

    /// The label, if present and not blank.
    pub fn label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    /// Check the YES/NO price model: each quoted price lies in 0-100 and,
    /// when both are quoted, they sum to 100 within [`PRICE_COMPLEMENT_TOLERANCE`].
    ///
    /// Missing prices are not a violation.
    pub fn validate(&self) -> Result<(), OutcomeError> {
        for price in [self.yes_ask, self.no_ask].into_iter().flatten() {
            if price < Decimal::ZERO || price > Decimal::ONE_HUNDRED {
                return Err(OutcomeError::PriceOutOfRange(price));
            }
        }

        if let (Some(yes_ask), Some(no_ask)) = (self.yes_ask, self.no_ask) {
            if (yes_ask + no_ask - Decimal::ONE_HUNDRED).abs() > PRICE_COMPLEMENT_TOLERANCE {
                return Err(OutcomeError::PriceComplement { yes_ask, no_ask });
            }
        }

        Ok(())
    }
}

/// A venue event in the common record shape.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct NormalizedEvent {
    pub title: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub subtitle: String,
    pub outcomes: Vec<Outcome>,
    #[serde(rename = "startDate", default, deserialize_with = "de_lenient_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", default, deserialize_with = "de_lenient_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
}

impl NormalizedEvent {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, outcomes: Vec<Outcome>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            outcomes,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_dates(mut self, start_date: Option<DateTime<Utc>>, end_date: Option<DateTime<Utc>>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Whole days until the event ends, if it has an end date.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.end_date.map(|end| (end - now).num_days())
    }
}

/// All normalized events fetched from one venue.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct VenueSnapshot {
    pub venue: Venue,
    pub events: Vec<NormalizedEvent>,
}

impl VenueSnapshot {
    pub fn new(venue: Venue, events: Vec<NormalizedEvent>) -> Self {
        Self { venue, events }
    }

    /// Build a snapshot from a JSON array of event records.
    ///
    /// Fails fast if the input is not an array of objects, or if any record
    /// lacks one of [`REQUIRED_FIELDS`].
    pub fn from_json(venue: Venue, records: &Value) -> Result<Self, SchemaError> {
        let records = records
            .as_array()
            .ok_or_else(|| SchemaError::NotAList { venue: venue.clone() })?;

        let events = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let object = record.as_object().ok_or_else(|| SchemaError::NotAnObject {
                    venue: venue.clone(),
                    index,
                })?;

                if let Some(field) = REQUIRED_FIELDS
                    .iter()
                    .find(|field| !object.contains_key(**field))
                {
                    return Err(SchemaError::MissingField {
                        venue: venue.clone(),
                        index,
                        field: *field,
                    });
                }

                NormalizedEvent::deserialize(record).map_err(|source| SchemaError::Malformed {
                    venue: venue.clone(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { venue, events })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (`2026-03-31T15:00:00Z`), naive date-times
/// (`2026-03-31T15:00:00`, read as UTC) and plain dates (`2025-06-30`, read as
/// midnight UTC). Anything else yields `None`.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::from_str(input) {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a price from its textual form (`"30"`, `"0.655"`, `"6.5e-1"`).
pub fn parse_price(input: &str) -> Option<Decimal> {
    let input = input.trim();
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}

/// Deserialize a price given as a number or a numeric string. Anything else
/// (null, bool, garbage text) becomes `None` rather than failing the record.
pub fn de_lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => parse_price(&number.to_string()),
        Some(Value::String(text)) => parse_price(&text),
        _ => None,
    })
}

fn de_lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => parse_timestamp(&text),
        _ => None,
    })
}

/// Deserialize a string field that may be null, mapping null to `""`.
pub fn de_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
