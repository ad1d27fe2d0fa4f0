//! CalendarSource trait definition.
//!
//! This module defines [`CalendarSource`], the seam between the fetch
//! orchestrator and whatever talks to the calendar service, plus the request
//! and result types that travel across it.
//!
//! Sources are responsible for:
//! - Establishing an authenticated session
//! - Fetching the user month list, world month lists and event details
//! - Stripping transport envelopes and reporting undecodable payloads as
//!   `Ok(None)` rather than as errors

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use wowcal_core::{
    CalendarEvent, DEFAULT_USER_CATEGORIES, DEFAULT_WORLD_CATEGORIES, MonthRef, WorldCategory,
};

use crate::error::{NormalizeError, ProviderResult};

/// The user and world calendars requested for one export.
///
/// Keys are kept exactly as requested; validation and lowercasing happen when
/// the calendars are fetched, so one bad key only skips itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSelection {
    /// Requested user categories (`raid`, `dungeon`, ...), in order.
    pub user: Vec<String>,
    /// Requested world categories (`player`, `holiday`, ...), in order.
    pub world: Vec<String>,
}

impl Default for CalendarSelection {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            world: DEFAULT_WORLD_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CalendarSelection {
    /// Builds a selection from explicitly requested categories.
    ///
    /// With nothing requested both sides use their defaults. Requesting only
    /// one side exports only that side.
    pub fn from_requested(user: Option<Vec<String>>, world: Option<Vec<String>>) -> Self {
        match (user, world) {
            (None, None) => Self::default(),
            (user, world) => Self {
                user: user.unwrap_or_default(),
                world: world.unwrap_or_default(),
            },
        }
    }

    /// Returns true if no calendar is requested at all.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.world.is_empty()
    }
}

/// Options for one export run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// The month to export.
    pub month: MonthRef,
    /// The calendars to export.
    pub selection: CalendarSelection,
}

impl FetchOptions {
    /// Creates options for the given month with the default selection.
    pub fn new(month: MonthRef) -> Self {
        Self {
            month,
            selection: CalendarSelection::default(),
        }
    }

    /// Builder method to set the selection.
    pub fn with_selection(mut self, selection: CalendarSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// The outcome of an export run.
#[derive(Debug, Default)]
pub struct FetchResult {
    /// Normalized events: user events first, then world events, each in
    /// request and source order.
    pub events: Vec<CalendarEvent>,
    /// Events and categories that were skipped, in the order they were hit.
    pub skipped: Vec<NormalizeError>,
}

impl FetchResult {
    /// Returns true if nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of user events in the result.
    pub fn user_event_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_user_event()).count()
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the orchestrator can work with
/// `&dyn CalendarSource`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A session-authenticated source of raw calendar JSON.
///
/// Month and detail methods return `Ok(None)` when a response arrived but did
/// not decode to a JSON object. Transport failures are `Err`.
pub trait CalendarSource: Send + Sync {
    /// Returns the name of this source (e.g., "armory").
    fn name(&self) -> &str;

    /// Establishes the session used by every later request.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the service rejects the credentials.
    fn login(&self) -> BoxFuture<'_, ProviderResult<()>>;

    /// Fetches the user calendar for a month.
    fn user_month(&self, month: MonthRef) -> BoxFuture<'_, ProviderResult<Option<Value>>>;

    /// Fetches one world calendar for a month.
    fn world_month(
        &self,
        category: WorldCategory,
        month: MonthRef,
    ) -> BoxFuture<'_, ProviderResult<Option<Value>>>;

    /// Fetches the detail payload of one user event.
    fn event_detail(&self, event_id: i64) -> BoxFuture<'_, ProviderResult<Option<Value>>>;
}
