//! CLI, configuration, and calendar export
//!
//! This crate provides the `wowcal` command-line interface.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod secret;

pub use cli::Cli;
pub use config::{ClientConfig, ExportSettings};
pub use error::{ClientError, ClientResult};
pub use export::{ExportSummary, export};
