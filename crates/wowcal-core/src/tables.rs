//! Category and status tables for the Armory calendar.
//!
//! The service speaks in short wire codes (`signedUp`, `raidLockout`, ...).
//! This module maps them to the values used everywhere else:
//!
//! - [`InviteStatus`]: attendance status of the user or of an invitee
//! - [`WorldCategory`]: shared calendars, keyed by a user-facing lowercase key
//! - [`UserCategory`]: the kinds of events a character can be invited to
//!
//! All tables are fixed at compile time and have no mutation API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Attendance status reported for a user event or one of its invitees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InviteStatus {
    SignedUp,
    NotSignedUp,
    Confirmed,
    Invited,
    Available,
}

impl InviteStatus {
    /// Every known status, in table order.
    pub const ALL: [Self; 5] = [
        Self::SignedUp,
        Self::NotSignedUp,
        Self::Confirmed,
        Self::Invited,
        Self::Available,
    ];

    /// Looks up a raw status code. Codes are case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Returns the wire code used by the service.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SignedUp => "signedUp",
            Self::NotSignedUp => "notSignedUp",
            Self::Confirmed => "confirmed",
            Self::Invited => "invited",
            Self::Available => "available",
        }
    }

    /// Returns the string shown in the calendar description.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SignedUp => "Signed Up",
            Self::NotSignedUp => "Not Signed Up",
            Self::Confirmed => "Confirmed",
            Self::Invited => "Invited",
            Self::Available => "Available",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A shared ("world") calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldCategory {
    Player,
    Holiday,
    Bg,
    Darkmoon,
    RaidLockout,
    RaidReset,
    HolidayWeekly,
}

impl WorldCategory {
    /// Every world calendar, in table order.
    pub const ALL: [Self; 7] = [
        Self::Player,
        Self::Holiday,
        Self::Bg,
        Self::Darkmoon,
        Self::RaidLockout,
        Self::RaidReset,
        Self::HolidayWeekly,
    ];

    /// Looks up a lowercase category key such as `raid_lockout`.
    ///
    /// The match is exact; callers lowercase user input first.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }

    /// Returns the user-facing key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Holiday => "holiday",
            Self::Bg => "bg",
            Self::Darkmoon => "darkmoon",
            Self::RaidLockout => "raid_lockout",
            Self::RaidReset => "raid_reset",
            Self::HolidayWeekly => "holiday_weekly",
        }
    }

    /// Returns the category code sent to the service.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Holiday => "holiday",
            Self::Bg => "bg",
            Self::Darkmoon => "darkmoon",
            Self::RaidLockout => "raidLockout",
            Self::RaidReset => "raidReset",
            Self::HolidayWeekly => "holidayWeekly",
        }
    }
}

impl fmt::Display for WorldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A kind of user event. The key doubles as the raw `type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserCategory {
    Raid,
    Dungeon,
    Pvp,
    Meeting,
    Other,
}

impl UserCategory {
    /// Every user category, in table order.
    pub const ALL: [Self; 5] = [
        Self::Raid,
        Self::Dungeon,
        Self::Pvp,
        Self::Meeting,
        Self::Other,
    ];

    /// Looks up a lowercase category key such as `raid`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == key)
    }

    /// Returns the key, which is also the raw event `type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raid => "raid",
            Self::Dungeon => "dungeon",
            Self::Pvp => "pvp",
            Self::Meeting => "meeting",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for UserCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User calendars exported when none are requested.
pub const DEFAULT_USER_CATEGORIES: [&str; 5] = ["dungeon", "meeting", "other", "pvp", "raid"];

/// World calendars exported when none are requested.
pub const DEFAULT_WORLD_CATEGORIES: [&str; 1] = ["player"];
