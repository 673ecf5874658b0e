use barter_arb_scanner::event::{de_null_as_empty, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Polymarket gamma `events` entry.
///
/// ### Payload Example
/// ```json
/// {
///   "title": "Fed decision in March?",
///   "description": "This market will resolve according to the FOMC statement...",
///   "startDate": "2025-01-21T18:48:14.091177Z",
///   "endDate": "2025-03-19T00:00:00Z",
///   "markets": [
///     {
///       "question": "Will the Fed cut rates by 25bps after the March meeting?",
///       "groupItemTitle": "25 bps decrease",
///       "outcomes": "[\"Yes\", \"No\"]",
///       "outcomePrices": "[\"0.655\", \"0.345\"]"
///     }
///   ]
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct GammaEvent {
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub description: String,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub markets: Vec<GammaMarket>,
}

impl GammaEvent {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_timestamp)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_date.as_deref().and_then(parse_timestamp)
    }
}

/// Polymarket market within an event. Outcome prices are fractions (0-1).
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct GammaMarket {
    #[serde(default)]
    pub question: Option<String>,
    /// Name of the outcome within a grouped (multi-outcome) event, eg/ "Ariana Grande"
    #[serde(rename = "groupItemTitle", default)]
    pub group_item_title: Option<String>,
    #[serde(default, deserialize_with = "de_string_list")]
    pub outcomes: Vec<String>,
    #[serde(rename = "outcomePrices", default, deserialize_with = "de_string_list")]
    pub outcome_prices: Vec<String>,
}

impl GammaMarket {
    /// The group item title, if present and not blank.
    pub fn group_item_title(&self) -> Option<&str> {
        self.group_item_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// Deserialize a list that may be sent either as a JSON array or as a string
/// containing a JSON-encoded array (eg/ `"[\"Yes\", \"No\"]"`).
///
/// Non-string items are kept in their JSON text form.
fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(Vec::new()),
        Some(Value::String(text)) => {
            serde_json::from_str::<Vec<Value>>(&text).map_err(de::Error::custom)?
        }
        Some(other) => {
            return Err(de::Error::custom(format!(
                "expected a list or a JSON-encoded list, found {other}"
            )));
        }
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => text,
            other => other.to_string(),
        })
        .collect())
}
