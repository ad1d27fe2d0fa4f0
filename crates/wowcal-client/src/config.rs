//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/wowcal/config.toml` by default. Command-line values override
//! file values.
//!
//! The account password supports secret references:
//! - `pass::path/in/store` resolved via `pass show`
//! - `env::VAR_NAME` resolved from the environment
//! - plain text used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use wowcal_core::{MonthRef, TracingConfig};
use wowcal_providers::CalendarSelection;
use wowcal_providers::armory::ArmoryConfig;

use crate::cli::Cli;
use crate::error::{ClientError, ClientResult};
use crate::export::default_file_name;

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the wowcal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Login settings.
    pub account: AccountSettings,

    /// Character settings.
    pub character: CharacterSettings,

    /// Which calendars to export.
    pub calendars: CalendarSettings,

    /// Output settings.
    pub output: OutputSettings,

    /// Service endpoint settings.
    pub service: ServiceSettings,
}

/// Login settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    /// Account name.
    pub username: Option<String>,

    /// Account password (supports `pass::` and `env::` prefixes).
    pub password: Option<String>,
}

/// Character settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSettings {
    /// Character name.
    pub name: Option<String>,

    /// Realm name.
    pub realm: Option<String>,
}

/// Calendar selection. A missing list means "not requested".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// User calendar types.
    pub user: Option<Vec<String>>,

    /// World calendar types.
    pub world: Option<Vec<String>>,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Calendar file path.
    pub file: Option<PathBuf>,

    /// Log file path.
    pub logfile: Option<PathBuf>,

    /// Show progress messages.
    pub verbose: bool,
}

/// Service endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Armory base URL.
    pub armory_url: Option<String>,

    /// Login base URL.
    pub login_url: Option<String>,

    /// Skip TLS certificate verification.
    pub insecure: bool,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Loads configuration from the default path, if it exists.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ClientError::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wowcal")
    }
}

// ---------------------------------------------------------------------------
// ExportSettings (CLI merged over config.toml)
// ---------------------------------------------------------------------------

/// Everything one export run needs.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Armory connection settings, credentials resolved.
    pub armory: ArmoryConfig,
    /// Month to export.
    pub month: MonthRef,
    /// Calendars to export.
    pub selection: CalendarSelection,
    /// Calendar file path.
    pub output: PathBuf,
    /// Log file path.
    pub log_file: Option<PathBuf>,
    /// Show progress messages.
    pub verbose: bool,
}

impl ExportSettings {
    /// Merges command-line options over the config file.
    ///
    /// `today` supplies the month and year when neither source sets them.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing required
    /// option, or the reason a URL or secret could not be used.
    pub fn resolve(cli: &Cli, config: &ClientConfig, today: MonthRef) -> ClientResult<Self> {
        let username = required(&cli.username, &config.account.username, "username")?;
        let password = required(&cli.password, &config.account.password, "password")?;
        let character = required(&cli.character, &config.character.name, "character")?;
        let realm = required(&cli.realm, &config.character.realm, "realm")?;
        let password = crate::secret::resolve(&password)?;

        let month_number = cli.month.unwrap_or(today.month);
        let year = cli.year.unwrap_or(today.year);
        let month = MonthRef::new(month_number, year)
            .ok_or_else(|| ClientError::config(format!("invalid month {}", month_number)))?;

        let selection = CalendarSelection::from_requested(
            cli.user_types.clone().or_else(|| config.calendars.user.clone()),
            cli.world_types.clone().or_else(|| config.calendars.world.clone()),
        );

        let output = cli
            .file
            .clone()
            .or_else(|| config.output.file.clone())
            .unwrap_or_else(|| default_file_name(&character, &realm));

        let mut armory = ArmoryConfig::new(username, password, character, realm)
            .map_err(|e| ClientError::config(format!("invalid default service URL: {}", e)))?;
        if let Some(ref url) = config.service.armory_url {
            armory = armory.with_armory_url(parse_url("armory_url", url)?);
        }
        if let Some(ref url) = config.service.login_url {
            armory = armory.with_login_url(parse_url("login_url", url)?);
        }
        if let Some(secs) = config.service.timeout {
            armory = armory.with_timeout(Duration::from_secs(secs));
        }
        if cli.insecure || config.service.insecure {
            armory = armory.with_insecure_tls();
        }

        Ok(Self {
            armory,
            month,
            selection,
            output,
            log_file: cli.logfile.clone().or_else(|| config.output.logfile.clone()),
            verbose: cli.verbose || config.output.verbose,
        })
    }

    /// Logging setup for this run.
    pub fn tracing_config(&self) -> TracingConfig {
        let config = if self.verbose {
            TracingConfig::verbose()
        } else {
            TracingConfig::default()
        };
        match self.log_file {
            Some(ref path) => config.with_log_file(path),
            None => config,
        }
    }
}

fn required(cli: &Option<String>, file: &Option<String>, name: &str) -> ClientResult<String> {
    cli.clone().or_else(|| file.clone()).ok_or_else(|| {
        ClientError::config(format!(
            "missing option `{}`: pass --{} or set it in {}",
            name,
            name,
            ClientConfig::default_path().display()
        ))
    })
}

fn parse_url(name: &str, value: &str) -> ClientResult<Url> {
    Url::parse(value)
        .map_err(|e| ClientError::config(format!("invalid {} `{}`: {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const FULL_CONFIG: &str = r#"
[account]
username = "account"
password = "secret"

[character]
name = "Thrall"
realm = "Draenor"

[calendars]
world = ["holiday"]

[output]
file = "/tmp/thrall.ical"
verbose = true

[service]
armory_url = "http://eu.wowarmory.com/"
timeout = 10
"#;

    fn today() -> MonthRef {
        MonthRef::new(6, 2010).unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wowcal").chain(args.iter().copied())).unwrap()
    }

    fn cli_with_account(extra: &[&str]) -> Cli {
        let mut args = vec!["-u", "account", "-p", "secret", "-c", "Thrall", "-r", "Draenor"];
        args.extend_from_slice(extra);
        cli(&args)
    }

    #[test]
    fn empty_toml_is_default() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert!(config.account.username.is_none());
        assert!(config.calendars.user.is_none());
        assert!(!config.service.insecure);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, FULL_CONFIG).unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.account.username.as_deref(), Some("account"));
        assert_eq!(config.character.realm.as_deref(), Some("Draenor"));
        assert_eq!(config.calendars.world, Some(vec!["holiday".to_string()]));
        assert_eq!(config.service.timeout, Some(10));
    }

    #[test]
    fn load_from_invalid_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[account\nusername = 1").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"), "{err}");

        let err = ClientConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"), "{err}");
    }

    #[test]
    fn cli_only_defaults() {
        let settings =
            ExportSettings::resolve(&cli_with_account(&[]), &ClientConfig::default(), today())
                .unwrap();

        assert_eq!(settings.month, today());
        assert_eq!(settings.selection, CalendarSelection::default());
        assert_eq!(settings.output, PathBuf::from("wowcal-Thrall-Draenor.ical"));
        assert!(settings.log_file.is_none());
        assert!(!settings.verbose);
        assert!(settings.armory.verify_tls);
        assert_eq!(settings.armory.username, "account");
        assert_eq!(settings.armory.character, "Thrall");
    }

    #[test]
    fn month_and_year_override_today() {
        let settings = ExportSettings::resolve(
            &cli_with_account(&["-m", "12", "-y", "2009"]),
            &ClientConfig::default(),
            today(),
        )
        .unwrap();
        assert_eq!(settings.month, MonthRef::new(12, 2009).unwrap());

        let settings = ExportSettings::resolve(
            &cli_with_account(&["-m", "2"]),
            &ClientConfig::default(),
            today(),
        )
        .unwrap();
        assert_eq!(settings.month, MonthRef::new(2, 2010).unwrap());
    }

    #[test]
    fn file_values_fill_gaps() {
        let config: ClientConfig = toml::from_str(FULL_CONFIG).unwrap();
        let settings = ExportSettings::resolve(&cli(&[]), &config, today()).unwrap();

        assert_eq!(settings.armory.password, "secret");
        assert_eq!(settings.output, PathBuf::from("/tmp/thrall.ical"));
        assert!(settings.verbose);
        assert!(settings.selection.user.is_empty());
        assert_eq!(settings.selection.world, vec!["holiday".to_string()]);
        assert_eq!(settings.armory.armory_url.as_str(), "http://eu.wowarmory.com/");
        assert_eq!(settings.armory.timeout, Duration::from_secs(10));
    }

    #[test]
    fn cli_overrides_file() {
        let config: ClientConfig = toml::from_str(FULL_CONFIG).unwrap();
        let settings = ExportSettings::resolve(
            &cli(&["-c", "Jaina", "-t", "raid", "-f", "jaina.ical", "--insecure"]),
            &config,
            today(),
        )
        .unwrap();

        assert_eq!(settings.armory.character, "Jaina");
        assert_eq!(settings.selection.user, vec!["raid".to_string()]);
        assert!(settings.selection.world.is_empty());
        assert_eq!(settings.output, PathBuf::from("jaina.ical"));
        assert!(!settings.armory.verify_tls);
    }

    #[test]
    fn missing_realm_is_named() {
        let err = ExportSettings::resolve(
            &cli(&["-u", "account", "-p", "secret", "-c", "Thrall"]),
            &ClientConfig::default(),
            today(),
        )
        .unwrap_err();

        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains("missing option `realm`"), "{err}");
    }

    #[test]
    fn password_secret_reference() {
        unsafe {
            std::env::set_var("_WOWCAL_CONFIG_TEST_PASSWORD", "from-env");
        }
        let config: ClientConfig = toml::from_str(
            r#"
[account]
password = "env::_WOWCAL_CONFIG_TEST_PASSWORD"
"#,
        )
        .unwrap();
        let settings = ExportSettings::resolve(
            &cli(&["-u", "account", "-c", "Thrall", "-r", "Draenor"]),
            &config,
            today(),
        )
        .unwrap();
        assert_eq!(settings.armory.password, "from-env");
        unsafe {
            std::env::remove_var("_WOWCAL_CONFIG_TEST_PASSWORD");
        }
    }

    #[test]
    fn invalid_service_url_errors() {
        let config: ClientConfig = toml::from_str(
            r#"
[service]
login_url = "not a url"
"#,
        )
        .unwrap();
        let err = ExportSettings::resolve(&cli_with_account(&[]), &config, today()).unwrap_err();
        assert!(err.to_string().contains("invalid login_url"), "{err}");
    }

    #[test]
    fn tracing_config_follows_flags() {
        let settings = ExportSettings::resolve(
            &cli_with_account(&["-v", "-l", "run.log"]),
            &ClientConfig::default(),
            today(),
        )
        .unwrap();
        let logging = settings.tracing_config();
        assert_eq!(logging.default_level, tracing::Level::INFO);
        assert_eq!(logging.log_file, Some(PathBuf::from("run.log")));
    }
}
