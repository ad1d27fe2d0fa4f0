//! Armory calendar source.
//!
//! This module provides an [`ArmoryProvider`] that logs into the account site
//! and fetches user calendars, world calendars and event details from the
//! Armory calendar vault.
//!
//! # Features
//!
//! - Cookie-based session shared by every request in a run
//! - Query-string POSTs with character and realm attached
//! - JSON envelope stripping
//! - TLS configuration (can be disabled for testing)
//!
//! # Example
//!
//! ```ignore
//! use wowcal_providers::armory::{ArmoryConfig, ArmoryProvider};
//! use wowcal_providers::{FetchOptions, fetch_calendar};
//!
//! let config = ArmoryConfig::new("account", "password", "Thrall", "Draenor")?;
//! let provider = ArmoryProvider::new(config)?;
//! let result = fetch_calendar(&provider, &FetchOptions::new(MonthRef::current())).await?;
//! ```

mod client;
mod config;
mod envelope;
mod provider;

pub use config::ArmoryConfig;
pub use envelope::decode_envelope;
pub use provider::ArmoryProvider;
