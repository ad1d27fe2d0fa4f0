//! Core types: category tables, events, time stamps, calendar rendering

pub mod event;
pub mod format;
pub mod tables;
pub mod time;
pub mod tracing;

pub use event::{CalendarEvent, Invitee, UserEvent, WorldEvent};
pub use format::{PRODID, render_calendar, render_calendar_in};
pub use tables::{
    DEFAULT_USER_CATEGORIES, DEFAULT_WORLD_CATEGORIES, InviteStatus, UserCategory, WorldCategory,
};
pub use time::{MonthRef, format_stamp, millis_to_epoch_seconds};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
