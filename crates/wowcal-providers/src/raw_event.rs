//! Raw record shapes returned by the Armory calendar endpoints.
//!
//! These structs mirror the JSON as closely as possible and keep loosely-typed
//! fields (flags that arrive as `0`/`1`, `true`, or strings) as raw
//! [`serde_json::Value`]s. The normalizer turns them into
//! [`wowcal_core::CalendarEvent`]s.
//!
//! Timestamps are kept in milliseconds exactly as sent; the `start` and `end`
//! fields accept integers, floats and numeric strings.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// An entry from a world calendar month list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorldEvent {
    /// Service calendar code; present on every record but otherwise unused.
    #[serde(default)]
    pub calendar_type: Option<String>,
    pub summary: String,
    #[serde(rename = "start", deserialize_with = "deserialize_millis")]
    pub start_ms: i64,
    #[serde(rename = "end", deserialize_with = "deserialize_millis")]
    pub end_ms: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// An entry from the user calendar month list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserEvent {
    #[serde(deserialize_with = "deserialize_integer")]
    pub id: i64,
    /// Raw category code (`raid`, `dungeon`, ...).
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub calendar_type: Option<String>,
    pub summary: String,
    #[serde(rename = "start", deserialize_with = "deserialize_millis")]
    pub start_ms: i64,
    pub owner: String,
    #[serde(default)]
    pub moderator: Option<Value>,
    /// `None` when the key is missing or `null`.
    #[serde(default)]
    pub inviter: Option<String>,
    pub status: String,
}

/// The detail payload fetched separately for each user event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEventDetail {
    #[serde(default)]
    pub locked: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    /// Invite records, normalized one by one so a bad entry names itself.
    #[serde(default)]
    pub invites: Option<Vec<Value>>,
}

/// One entry of a detail payload's invite list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInvitee {
    /// Character name.
    pub invitee: String,
    #[serde(default)]
    pub moderator: Option<Value>,
    pub status: String,
}

/// Reads a millisecond timestamp from a number or numeric string.
///
/// Fractional milliseconds are floored.
pub fn millis_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(float_to_millis)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(float_to_millis))
        }
        _ => None,
    }
}

/// Reads an integer from a number or numeric string.
pub fn integer_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn float_to_millis(value: f64) -> Option<i64> {
    let floored = value.floor();
    (floored.is_finite() && floored >= i64::MIN as f64 && floored < i64::MAX as f64)
        .then_some(floored as i64)
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    millis_from_value(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a millisecond timestamp, got {value}")))
}

fn deserialize_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    integer_from_value(&value)
        .ok_or_else(|| de::Error::custom(format!("expected an integer id, got {value}")))
}
