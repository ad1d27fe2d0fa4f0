//! Calendar document rendering.
//!
//! Events are written as a line-oriented VCALENDAR document in the legacy
//! shape calendar importers expect from this tool:
//!
//! ```text
//! BEGIN:VCALENDAR
//! VERSION:2.0
//! PRODID:-//Mozilla.org/NONSGML Mozilla Calendar V1.1//EN
//! BEGIN:VEVENT
//! SUMMARY:<summary>
//! DTSTART:<YYYYMMDD>T<HHMMSS>
//! DTEND:<YYYYMMDD>T<HHMMSS>
//! DESCRIPTION:<description>
//! END:VEVENT
//! END:VCALENDAR
//! ```
//!
//! Lines end with a bare `\n`. Inside `DESCRIPTION` values, line breaks are the
//! two-character token `\n` (backslash, `n`), so every value stays on one
//! physical line.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use wowcal_core::format::render_calendar_in;
//! use wowcal_core::{CalendarEvent, WorldEvent};
//!
//! let events = vec![CalendarEvent::from(WorldEvent::new("Brewfest", 0, 3600))];
//! let ical = render_calendar_in(&events, &Utc);
//! assert!(ical.contains("DTEND:19700101T010000\n"));
//! ```


use std::fmt;

use chrono::{Local, TimeZone};

use crate::event::{CalendarEvent, UserEvent};
use crate::time::format_stamp;

/// Product identifier written to every document.
pub const PRODID: &str = "-//Mozilla.org/NONSGML Mozilla Calendar V1.1//EN";

/// Line-break token used inside `DESCRIPTION` values.
const BREAK: &str = "\\n";

/// Renders `events` in input order, stamping times in the local timezone.
pub fn render_calendar(events: &[CalendarEvent]) -> String {
    render_calendar_in(events, &Local)
}

/// Renders `events` in input order, stamping times in `tz`.
///
/// This variant is useful for testing with a fixed timezone.
pub fn render_calendar_in<Tz>(events: &[CalendarEvent], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{PRODID}"));

    for event in events {
        let (end, description) = match event {
            CalendarEvent::World(world) => {
                (world.end, escape_world_description(&world.description))
            }
            CalendarEvent::User(user) => (user.start, user_description(user)),
        };

        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("SUMMARY:{}", event.summary()));
        push_line(&mut out, &format!("DTSTART:{}", format_stamp(event.start(), tz)));
        push_line(&mut out, &format!("DTEND:{}", format_stamp(end, tz)));
        push_line(&mut out, &format!("DESCRIPTION:{description}"));
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Escapes a world event description.
///
/// Every newline and every non-overlapping pair of spaces becomes the `\n`
/// token, scanning left to right. Three spaces therefore leave one space
/// behind the token. Backslashes are passed through untouched.
pub fn escape_world_description(text: &str) -> String {
    text.replace('\n', BREAK).replace("  ", BREAK)
}

/// Builds the description of a user event from its detail and invite list.
pub fn user_description(event: &UserEvent) -> String {
    let mut text = String::with_capacity(event.description.len() + 64);

    text.push_str(&event.description);
    text.push_str(BREAK);
    text.push_str(BREAK);

    text.push_str("Creator: ");
    text.push_str(&event.owner);
    text.push_str(BREAK);
    if let Some(ref inviter) = event.inviter {
        text.push_str("Inviter: ");
        text.push_str(inviter);
        text.push_str(BREAK);
    }

    if event.locked {
        text.push_str(BREAK);
        text.push_str("THIS EVENT IS LOCKED!");
        text.push_str(BREAK);
    }
    if event.moderator {
        text.push_str(BREAK);
        text.push_str("You are a moderator of this event.");
        text.push_str(BREAK);
    }
    text.push_str(BREAK);

    text.push_str("Your Status: ");
    text.push_str(event.status.display_name());
    text.push_str(BREAK);

    if !event.invitees.is_empty() {
        text.push_str("Other's Status:");
        text.push_str(BREAK);
        for invitee in &event.invitees {
            if invitee.moderator {
                text.push_str("Moderator - ");
            }
            text.push_str(&invitee.name);
            text.push_str(" - ");
            text.push_str(invitee.status.display_name());
            text.push_str(BREAK);
        }
    }

    text
}
