//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// wowcal - Export your Armory calendar to an iCalendar file
#[derive(Debug, Parser)]
#[command(name = "wowcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, env = "WOWCAL_CONFIG")]
    pub config: Option<PathBuf>,

    // --- Account ---
    /// Account name used to log in
    #[arg(long, short = 'u', env = "WOWCAL_USERNAME")]
    pub username: Option<String>,

    /// Account password
    #[arg(long, short = 'p', env = "WOWCAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Character whose calendar is exported
    #[arg(long, short = 'c', env = "WOWCAL_CHARACTER")]
    pub character: Option<String>,

    /// Realm the character lives on
    #[arg(long, short = 'r', env = "WOWCAL_REALM")]
    pub realm: Option<String>,

    // --- Output ---
    /// File to write the calendar to [default: wowcal-<character>-<realm>.ical]
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Also write the run log to this file
    #[arg(long = "logfile", short = 'l')]
    pub logfile: Option<PathBuf>,

    // --- Selection ---
    /// Month to export (1-12) [default: current month]
    #[arg(long, short = 'm', value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year to export [default: current year]
    #[arg(long, short = 'y')]
    pub year: Option<i32>,

    /// User calendars to export: raid, dungeon, pvp, meeting, other
    #[arg(long = "user-type", short = 't', visible_alias = "ut", value_delimiter = ',')]
    pub user_types: Option<Vec<String>>,

    /// World calendars to export: player, holiday, bg, darkmoon, raid_lockout,
    /// raid_reset, holiday_weekly
    #[arg(long = "world-type", short = 'w', visible_alias = "wt", value_delimiter = ',')]
    pub world_types: Option<Vec<String>>,

    // --- Misc ---
    /// Show progress messages
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
}
