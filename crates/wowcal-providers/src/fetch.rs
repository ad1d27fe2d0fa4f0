//! Export orchestration.
//!
//! [`fetch_calendar`] drives a [`CalendarSource`] through one export:
//!
//! ```text
//! login ──► user month ──► per user category: select ─► detail ─► normalize
//!       └─► per world category: resolve ─► world month ─► normalize
//! ```
//!
//! Requests are issued one at a time. Only a failed login aborts the run;
//! everything else is logged and skipped so the calendar still contains every
//! event that could be normalized.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{NormalizeError, ProviderResult};
use crate::normalize::{
    normalize_user_event, normalize_world_event, resolve_world_category, select_user_events,
};
use crate::provider::{BoxFuture, CalendarSource, FetchOptions, FetchResult};
use crate::raw_event::integer_from_value;

/// Fetches and normalizes every requested calendar.
///
/// # Errors
///
/// Returns the source's error if login fails. All other failures are
/// recorded in [`FetchResult::skipped`] or logged.
pub async fn fetch_calendar(
    source: &dyn CalendarSource,
    options: &FetchOptions,
) -> ProviderResult<FetchResult> {
    info!(provider = source.name(), "Logging in");
    if let Err(e) = source.login().await {
        warn!(error = %e, "Login failed");
        return Err(e);
    }
    info!("Login successful");

    let mut result = FetchResult::default();

    if !options.selection.user.is_empty() {
        fetch_user_events(source, options, &mut result).await;
    }
    if !options.selection.world.is_empty() {
        fetch_world_events(source, options, &mut result).await;
    }

    info!(
        events = result.events.len(),
        skipped = result.skipped.len(),
        "Calendar fetched"
    );
    Ok(result)
}

async fn fetch_user_events(
    source: &dyn CalendarSource,
    options: &FetchOptions,
    result: &mut FetchResult,
) {
    let month_events = month_events(source.user_month(options.month), "user").await;

    for requested in &options.selection.user {
        let selected = match select_user_events(&month_events, requested) {
            Ok(selected) => selected,
            Err(e) => {
                warn!(error = %e, "Invalid user calendar type selected");
                result.skipped.push(e);
                continue;
            }
        };

        info!(calendar = %requested, count = selected.len(), "Retrieving user calendar");

        for raw in selected {
            let detail = match raw.get("id").and_then(integer_from_value) {
                Some(event_id) => event_detail(source, event_id).await,
                None => None,
            };

            match normalize_user_event(raw, detail.as_ref()) {
                Ok(event) => {
                    debug!(id = event.id, summary = %event.summary, "User event normalized");
                    result.events.push(event.into());
                }
                Err(e) => skip(result, e),
            }
        }
    }
}

async fn fetch_world_events(
    source: &dyn CalendarSource,
    options: &FetchOptions,
    result: &mut FetchResult,
) {
    for requested in &options.selection.world {
        let category = match resolve_world_category(requested) {
            Ok(category) => category,
            Err(e) => {
                warn!(error = %e, "Invalid world calendar type selected");
                result.skipped.push(e);
                continue;
            }
        };

        info!(calendar = category.key(), "Retrieving world calendar");
        let events =
            month_events(source.world_month(category, options.month), category.key()).await;
        info!(calendar = category.key(), count = events.len(), "Found events");

        for raw in &events {
            match normalize_world_event(raw) {
                Ok(event) => {
                    debug!(summary = %event.summary, "World event normalized");
                    result.events.push(event.into());
                }
                Err(e) => skip(result, e),
            }
        }
    }
}

/// Awaits a month payload and extracts its `events` list.
///
/// Transport errors, undecodable payloads and missing lists all mean "no
/// events" for that calendar.
async fn month_events(
    fetch: BoxFuture<'_, ProviderResult<Option<Value>>>,
    calendar: &str,
) -> Vec<Value> {
    let payload = match fetch.await {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            warn!(calendar, "Invalid JSON received, continuing");
            return Vec::new();
        }
        Err(e) => {
            warn!(calendar, error = %e, "Calendar request failed, continuing");
            return Vec::new();
        }
    };

    match payload {
        Value::Object(mut object) => match object.remove("events") {
            Some(Value::Array(events)) if !events.is_empty() => events,
            _ => {
                info!(calendar, "No events found");
                Vec::new()
            }
        },
        _ => {
            warn!(calendar, "Calendar payload is not an object, continuing");
            Vec::new()
        }
    }
}

async fn event_detail(source: &dyn CalendarSource, event_id: i64) -> Option<Value> {
    match source.event_detail(event_id).await {
        Ok(detail) => detail,
        Err(e) => {
            warn!(event_id, error = %e, "Event detail request failed");
            None
        }
    }
}

fn skip(result: &mut FetchResult, error: NormalizeError) {
    warn!(error = %error, "Skipping event");
    result.skipped.push(error);
}
