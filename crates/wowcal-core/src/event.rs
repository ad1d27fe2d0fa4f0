//! Event types for the exported calendar.
//!
//! This module provides the normalized records that the renderer consumes:
//! - [`WorldEvent`]: an entry from a shared calendar, with its own end time
//! - [`UserEvent`]: an event the character owns or is invited to
//! - [`Invitee`]: one participant of a user event
//! - [`CalendarEvent`]: the closed set of renderable events

use serde::{Deserialize, Serialize};

use crate::tables::InviteStatus;

/// An entry from a shared calendar (holidays, raid resets, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEvent {
    /// Short title.
    pub summary: String,
    /// Start, in seconds since the epoch.
    pub start: i64,
    /// End, in seconds since the epoch. Not guaranteed to be after `start`.
    pub end: i64,
    /// Free-form text, possibly empty.
    pub description: String,
}

impl WorldEvent {
    /// Creates a world event.
    pub fn new(summary: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            description: String::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A participant of a [`UserEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitee {
    /// Character name.
    pub name: String,
    /// Whether this invitee moderates the event.
    pub moderator: bool,
    /// Attendance status.
    pub status: InviteStatus,
}

impl Invitee {
    /// Creates an invitee who is not a moderator.
    pub fn new(name: impl Into<String>, status: InviteStatus) -> Self {
        Self {
            name: name.into(),
            moderator: false,
            status,
        }
    }

    /// Builder method to set the moderator flag.
    pub fn with_moderator(mut self, moderator: bool) -> Self {
        self.moderator = moderator;
        self
    }
}

/// An event the character owns or was invited to.
///
/// User events carry no end time; the calendar shows them as instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    /// Service identifier, used to fetch the event detail.
    pub id: i64,
    /// Raw category code (`raid`, `dungeon`, ...).
    pub category: String,
    /// Short title.
    pub summary: String,
    /// Start, in seconds since the epoch.
    pub start: i64,
    /// Free-form text from the event detail, possibly empty.
    pub description: String,
    /// Whether sign-ups are locked.
    pub locked: bool,
    /// Name of the character that created the event.
    pub owner: String,
    /// Whether the exporting character moderates the event.
    pub moderator: bool,
    /// Who invited the exporting character. `None` when the service omits it,
    /// which is distinct from an empty name.
    pub inviter: Option<String>,
    /// The exporting character's own status.
    pub status: InviteStatus,
    /// Everyone else on the invite list, in service order.
    pub invitees: Vec<Invitee>,
}

impl UserEvent {
    /// Creates a user event with no detail information attached yet.
    pub fn new(
        id: i64,
        category: impl Into<String>,
        summary: impl Into<String>,
        start: i64,
        owner: impl Into<String>,
        status: InviteStatus,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            summary: summary.into(),
            start,
            description: String::new(),
            locked: false,
            owner: owner.into(),
            moderator: false,
            inviter: None,
            status,
            invitees: Vec::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the locked flag.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Builder method to set the moderator flag.
    pub fn with_moderator(mut self, moderator: bool) -> Self {
        self.moderator = moderator;
        self
    }

    /// Builder method to set the inviter.
    pub fn with_inviter(mut self, inviter: impl Into<String>) -> Self {
        self.inviter = Some(inviter.into());
        self
    }

    /// Builder method to add an invitee.
    pub fn with_invitee(mut self, invitee: Invitee) -> Self {
        self.invitees.push(invitee);
        self
    }
}

/// Any event that can appear in the exported calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarEvent {
    World(WorldEvent),
    User(UserEvent),
}

impl CalendarEvent {
    /// Returns the event title.
    pub fn summary(&self) -> &str {
        match self {
            Self::World(event) => &event.summary,
            Self::User(event) => &event.summary,
        }
    }

    /// Returns the start, in seconds since the epoch.
    pub fn start(&self) -> i64 {
        match self {
            Self::World(event) => event.start,
            Self::User(event) => event.start,
        }
    }

    /// Returns the end, in seconds since the epoch.
    ///
    /// User events have no end of their own and report their start.
    pub fn end(&self) -> i64 {
        match self {
            Self::World(event) => event.end,
            Self::User(event) => event.start,
        }
    }

    /// Returns the raw description text.
    pub fn description(&self) -> &str {
        match self {
            Self::World(event) => &event.description,
            Self::User(event) => &event.description,
        }
    }

    /// Returns `true` for user events.
    pub fn is_user_event(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<WorldEvent> for CalendarEvent {
    fn from(event: WorldEvent) -> Self {
        Self::World(event)
    }
}

impl From<UserEvent> for CalendarEvent {
    fn from(event: UserEvent) -> Self {
        Self::User(event)
    }
}
