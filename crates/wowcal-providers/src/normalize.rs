//! Raw JSON to calendar event conversion.
//!
//! This module turns the loosely-typed records of the Armory calendar into
//! [`WorldEvent`], [`UserEvent`] and [`Invitee`] values. Every function is
//! pure; failures are reported as [`NormalizeError`] and are meant to be
//! recovered per event (or per requested category) by the caller.
//!
//! The normalization process:
//! 1. Decodes the JSON object into its raw record shape
//! 2. Floors millisecond timestamps to whole seconds
//! 3. Coerces flag fields with [`is_truthy`]
//! 4. Translates status codes through [`InviteStatus`]

use serde::de::DeserializeOwned;
use serde_json::Value;

use wowcal_core::time::{epoch_datetime, millis_to_epoch_seconds};
use wowcal_core::{InviteStatus, Invitee, UserCategory, UserEvent, WorldCategory, WorldEvent};

use crate::error::{CategoryScope, NormalizeError, NormalizeResult, RecordKind};
use crate::raw_event::{RawEventDetail, RawInvitee, RawUserEvent, RawWorldEvent};

/// Coerces a loosely-typed flag to a boolean.
///
/// | value                              | result  |
/// |------------------------------------|---------|
/// | absent, `null`                     | `false` |
/// | `false`                            | `false` |
/// | `0`, `0.0`                         | `false` |
/// | `""`, `"0"`                        | `false` |
/// | `[]`                               | `false` |
/// | anything else (incl. `{}`)         | `true`  |
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty() && text != "0",
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

/// Translates a raw status code.
///
/// # Errors
///
/// Returns [`NormalizeError::UnknownEnumCode`] carrying the code if it is not
/// in the status table.
pub fn lookup_status(code: &str) -> NormalizeResult<InviteStatus> {
    InviteStatus::from_code(code).ok_or_else(|| NormalizeError::UnknownEnumCode {
        code: code.to_string(),
    })
}

/// Converts a [`RawWorldEvent`] JSON object to a [`WorldEvent`].
///
/// `start` and `end` are floored to seconds independently; their order is not
/// checked.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedRecord`] if `summary`, `start` or `end`
/// is missing or mistyped, or if a timestamp is negative or past year 9999.
pub fn normalize_world_event(raw: &Value) -> NormalizeResult<WorldEvent> {
    let event: RawWorldEvent = decode(RecordKind::WorldEvent, raw)?;

    let start = epoch_seconds(RecordKind::WorldEvent, "start", event.start_ms)?;
    let end = epoch_seconds(RecordKind::WorldEvent, "end", event.end_ms)?;

    Ok(WorldEvent::new(event.summary, start, end)
        .with_description(event.description.unwrap_or_default()))
}

/// Builds a [`UserEvent`] from its month-list entry and its detail payload.
///
/// Either the whole event is built or an error is returned; there is no
/// partially-filled result.
///
/// # Errors
///
/// - [`NormalizeError::MalformedRecord`] if either record has the wrong shape
/// - [`NormalizeError::MissingDetail`] if `raw_detail` is `None` or not an object
/// - [`NormalizeError::UnknownEnumCode`] if the event's or an invitee's status
///   is not in the status table
pub fn normalize_user_event(
    raw_event: &Value,
    raw_detail: Option<&Value>,
) -> NormalizeResult<UserEvent> {
    let event: RawUserEvent = decode(RecordKind::UserEvent, raw_event)?;

    let detail: RawEventDetail = match raw_detail {
        Some(detail) if detail.is_object() => decode(RecordKind::EventDetail, detail)?,
        _ => return Err(NormalizeError::MissingDetail { event_id: event.id }),
    };

    let start = epoch_seconds(RecordKind::UserEvent, "start", event.start_ms)?;
    let status = lookup_status(&event.status)?;

    let invitees = detail
        .invites
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(normalize_invitee)
        .collect::<NormalizeResult<Vec<_>>>()?;

    Ok(UserEvent {
        id: event.id,
        category: event.category,
        summary: event.summary,
        start,
        description: detail.description.unwrap_or_default(),
        locked: is_truthy(detail.locked.as_ref()),
        owner: event.owner,
        moderator: is_truthy(event.moderator.as_ref()),
        inviter: event.inviter,
        status,
        invitees,
    })
}

/// Converts one invite-list entry to an [`Invitee`].
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedRecord`] for a mistyped record and
/// [`NormalizeError::UnknownEnumCode`] for an unknown status.
pub fn normalize_invitee(raw: &Value) -> NormalizeResult<Invitee> {
    let invitee: RawInvitee = decode(RecordKind::Invitee, raw)?;
    let status = lookup_status(&invitee.status)?;

    Ok(Invitee::new(invitee.invitee, status).with_moderator(is_truthy(invitee.moderator.as_ref())))
}

/// Selects the user-calendar entries whose `type` matches a requested category.
///
/// The requested key is lowercased before it is checked against the user
/// category set. Matching keeps source order.
///
/// # Errors
///
/// Returns [`NormalizeError::UnknownCategory`] if the key is not a user
/// category.
pub fn select_user_events<'a>(
    events: &'a [Value],
    requested: &str,
) -> NormalizeResult<Vec<&'a Value>> {
    let key = requested.to_lowercase();
    let category = UserCategory::from_key(&key).ok_or_else(|| NormalizeError::UnknownCategory {
        scope: CategoryScope::User,
        key: requested.to_string(),
    })?;

    Ok(events
        .iter()
        .filter(|event| event.get("type").and_then(Value::as_str) == Some(category.as_str()))
        .collect())
}

/// Resolves a requested world category key, ignoring case.
///
/// # Errors
///
/// Returns [`NormalizeError::UnknownCategory`] if the key is not a world
/// category.
pub fn resolve_world_category(requested: &str) -> NormalizeResult<WorldCategory> {
    WorldCategory::from_key(&requested.to_lowercase()).ok_or_else(|| {
        NormalizeError::UnknownCategory {
            scope: CategoryScope::World,
            key: requested.to_string(),
        }
    })
}

fn decode<T: DeserializeOwned>(kind: RecordKind, raw: &Value) -> NormalizeResult<T> {
    T::deserialize(raw).map_err(|e| NormalizeError::malformed(kind, e.to_string()))
}

/// 9999-12-31T23:59:59Z, the last instant with a four-digit year.
const MAX_EPOCH_SECONDS: i64 = 253_402_300_799;

fn epoch_seconds(kind: RecordKind, field: &str, millis: i64) -> NormalizeResult<i64> {
    if millis < 0 {
        return Err(NormalizeError::malformed(
            kind,
            format!("`{}` is negative ({})", field, millis),
        ));
    }

    let seconds = millis_to_epoch_seconds(millis);
    if seconds > MAX_EPOCH_SECONDS || epoch_datetime(seconds).is_none() {
        return Err(NormalizeError::malformed(
            kind,
            format!("`{}` is out of range ({})", field, millis),
        ));
    }

    Ok(seconds)
}
