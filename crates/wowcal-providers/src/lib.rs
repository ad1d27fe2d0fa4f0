//! Calendar sources and the export pipeline.
//!
//! This crate turns raw calendar service JSON into [`wowcal_core`] events:
//!
//! - [`CalendarSource`] - The seam every calendar backend implements
//! - [`fetch_calendar`] - Drives a source through one export
//! - [`normalize`] - Raw record to event conversion
//! - [`ProviderError`] / [`NormalizeError`] - Transport and record errors
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Armory site    │
//! └────────┬────────┘
//!          │ envelope-wrapped JSON
//!          ▼
//! ┌─────────────────┐
//! │ ArmoryProvider  │
//! └────────┬────────┘
//!          │ CalendarSource
//!          ▼
//! ┌─────────────────┐
//! │ fetch_calendar  │──► skipped: Vec<NormalizeError>
//! └────────┬────────┘
//!          │ normalize_*()
//!          ▼
//! ┌──────────────────┐
//! │  CalendarEvent   │
//! └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use wowcal_core::{MonthRef, render_calendar};
//! use wowcal_providers::{CalendarSource, FetchOptions, fetch_calendar};
//!
//! async fn export(source: &dyn CalendarSource) -> ProviderResult<String> {
//!     let result = fetch_calendar(source, &FetchOptions::new(MonthRef::current())).await?;
//!     Ok(render_calendar(&result.events))
//! }
//! ```

#[cfg(feature = "armory")]
pub mod armory;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod provider;
pub mod raw_event;

// Re-export main types at crate root
pub use error::{
    CategoryScope, NormalizeError, NormalizeResult, ProviderError, ProviderErrorCode,
    ProviderResult, RecordKind,
};
pub use fetch::fetch_calendar;
pub use normalize::{
    is_truthy, normalize_invitee, normalize_user_event, normalize_world_event,
    resolve_world_category, select_user_events,
};
pub use provider::{BoxFuture, CalendarSelection, CalendarSource, FetchOptions, FetchResult};
pub use raw_event::{RawEventDetail, RawInvitee, RawUserEvent, RawWorldEvent};
