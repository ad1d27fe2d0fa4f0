//! Armory source configuration.

use std::time::Duration;
use url::Url;

/// Configuration for the Armory calendar source.
#[derive(Debug, Clone)]
pub struct ArmoryConfig {
    /// Base URL of the Armory site. Always ends with `/`.
    pub armory_url: Url,

    /// Base URL of the account login site. Always ends with `/`.
    pub login_url: Url,

    /// Account name used to log in.
    pub username: String,

    /// Account password.
    pub password: String,

    /// Character whose calendar is exported.
    pub character: String,

    /// Realm the character lives on.
    pub realm: String,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl ArmoryConfig {
    /// Default Armory site.
    pub const DEFAULT_ARMORY_URL: &'static str = "http://www.wowarmory.com/";

    /// Default login site.
    pub const DEFAULT_LOGIN_URL: &'static str = "https://us.battle.net/";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// The service only answers browsers it recognizes.
    pub const DEFAULT_USER_AGENT: &'static str = "Mozilla/5.0 Gecko/20070219 Firefox/2.0.0.2";

    /// Login form path, relative to [`Self::login_url`].
    pub const LOGIN_PATH: &'static str = "login/login.xml";

    /// User calendar path, relative to [`Self::armory_url`].
    pub const USER_MONTH_PATH: &'static str = "vault/calendar/month-user.json";

    /// World calendar path, relative to [`Self::armory_url`].
    pub const WORLD_MONTH_PATH: &'static str = "vault/calendar/month-world.json";

    /// Event detail path, relative to [`Self::armory_url`].
    pub const DETAIL_PATH: &'static str = "vault/calendar/detail.json";

    /// Creates a configuration for the default service URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if a default URL fails to parse.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        character: impl Into<String>,
        realm: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            armory_url: Url::parse(Self::DEFAULT_ARMORY_URL)?,
            login_url: Url::parse(Self::DEFAULT_LOGIN_URL)?,
            username: username.into(),
            password: password.into(),
            character: character.into(),
            realm: realm.into(),
            verify_tls: true,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Sets the Armory base URL.
    pub fn with_armory_url(mut self, url: Url) -> Self {
        self.armory_url = with_trailing_slash(url);
        self
    }

    /// Sets the login base URL.
    pub fn with_login_url(mut self, url: Url) -> Self {
        self.login_url = with_trailing_slash(url);
        self
    }

    /// Disables TLS verification (for testing only).
    pub fn with_insecure_tls(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The `ref` value sent with the login form.
    pub fn login_referrer(&self) -> String {
        format!("{}index.xml", self.armory_url)
    }

    /// Resolves a path against the login site.
    pub fn login_endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.login_url.join(path)
    }

    /// Resolves a path against the Armory site.
    pub fn armory_endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.armory_url.join(path)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ArmoryConfig {
        ArmoryConfig::new("account", "secret", "Thrall", "Draenor").unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = config();
        assert_eq!(config.armory_url.as_str(), "http://www.wowarmory.com/");
        assert_eq!(config.login_url.as_str(), "https://us.battle.net/");
        assert!(config.verify_tls);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.contains("Firefox/2.0.0.2"));
    }

    #[test]
    fn endpoints() {
        let config = config();
        assert_eq!(
            config.login_endpoint(ArmoryConfig::LOGIN_PATH).unwrap().as_str(),
            "https://us.battle.net/login/login.xml"
        );
        assert_eq!(
            config
                .armory_endpoint(ArmoryConfig::DETAIL_PATH)
                .unwrap()
                .as_str(),
            "http://www.wowarmory.com/vault/calendar/detail.json"
        );
        assert_eq!(
            config.login_referrer(),
            "http://www.wowarmory.com/index.xml"
        );
    }

    #[test]
    fn base_urls_gain_trailing_slash() {
        let config = config()
            .with_armory_url(Url::parse("http://eu.wowarmory.com/armory").unwrap())
            .with_login_url(Url::parse("https://eu.battle.net").unwrap());

        assert_eq!(config.armory_url.as_str(), "http://eu.wowarmory.com/armory/");
        assert_eq!(
            config
                .armory_endpoint(ArmoryConfig::USER_MONTH_PATH)
                .unwrap()
                .as_str(),
            "http://eu.wowarmory.com/armory/vault/calendar/month-user.json"
        );
        assert_eq!(config.login_url.as_str(), "https://eu.battle.net/");
    }

    #[test]
    fn config_builder_methods() {
        let config = config()
            .with_insecure_tls()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("wowcal-test");

        assert!(!config.verify_tls);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "wowcal-test");
    }
}
