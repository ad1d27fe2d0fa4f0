//! Armory calendar source implementation.

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use wowcal_core::{MonthRef, WorldCategory};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, CalendarSource};

use super::client::ArmoryClient;
use super::config::ArmoryConfig;
use super::envelope::decode_envelope;

/// Marker the login page carries when it re-renders the form with an error.
const LOGIN_FAILURE_MARKER: &str = "error.form.login";

/// Calendar source backed by the Armory web service.
pub struct ArmoryProvider {
    client: ArmoryClient,
    config: ArmoryConfig,
}

impl ArmoryProvider {
    /// Provider name used in logs and errors.
    pub const NAME: &'static str = "armory";

    /// Creates a new provider with a fresh session.
    pub fn new(config: ArmoryConfig) -> ProviderResult<Self> {
        let client = ArmoryClient::new(&config).map_err(|e| e.with_provider(Self::NAME))?;
        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ArmoryConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> ProviderResult<Url> {
        self.config.armory_endpoint(path).map_err(|e| {
            ProviderError::configuration(format!("Invalid Armory URL: {}", e))
                .with_provider(Self::NAME)
        })
    }

    async fn login_session(&self) -> ProviderResult<()> {
        let url = self
            .config
            .login_endpoint(ArmoryConfig::LOGIN_PATH)
            .map_err(|e| {
                ProviderError::configuration(format!("Invalid login URL: {}", e))
                    .with_provider(Self::NAME)
            })?;
        let referrer = self.config.login_referrer();

        debug!(account = %self.config.username, "Submitting login form");
        let body = self
            .client
            .post(
                url,
                &[
                    ("accountName", self.config.username.as_str()),
                    ("password", self.config.password.as_str()),
                    ("ref", referrer.as_str()),
                    ("app", "armory"),
                ],
            )
            .await
            .map_err(|e| e.with_provider(Self::NAME))?;

        if body.contains(LOGIN_FAILURE_MARKER) {
            return Err(
                ProviderError::authentication("Login failed: account name or password rejected")
                    .with_provider(Self::NAME),
            );
        }

        info!(
            character = %self.config.character,
            realm = %self.config.realm,
            "Session established"
        );
        Ok(())
    }

    async fn fetch_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> ProviderResult<Option<Value>> {
        let url = self.endpoint(path)?;
        let body = self
            .client
            .post(url, params)
            .await
            .map_err(|e| e.with_provider(Self::NAME))?;

        let payload = decode_envelope(&body);
        if payload.is_none() {
            debug!(path, bytes = body.len(), "Response did not decode to a JSON object");
        }
        Ok(payload)
    }
}

impl CalendarSource for ArmoryProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn login(&self) -> BoxFuture<'_, ProviderResult<()>> {
        Box::pin(self.login_session())
    }

    fn user_month(&self, month: MonthRef) -> BoxFuture<'_, ProviderResult<Option<Value>>> {
        Box::pin(async move {
            let (m, y) = (month.month.to_string(), month.year.to_string());
            self.fetch_json(
                ArmoryConfig::USER_MONTH_PATH,
                &[("month", m.as_str()), ("year", y.as_str())],
            )
            .await
        })
    }

    fn world_month(
        &self,
        category: WorldCategory,
        month: MonthRef,
    ) -> BoxFuture<'_, ProviderResult<Option<Value>>> {
        Box::pin(async move {
            let (m, y) = (month.month.to_string(), month.year.to_string());
            self.fetch_json(
                ArmoryConfig::WORLD_MONTH_PATH,
                &[
                    ("type", category.code()),
                    ("month", m.as_str()),
                    ("year", y.as_str()),
                ],
            )
            .await
        })
    }

    fn event_detail(&self, event_id: i64) -> BoxFuture<'_, ProviderResult<Option<Value>>> {
        Box::pin(async move {
            let id = event_id.to_string();
            self.fetch_json(ArmoryConfig::DETAIL_PATH, &[("e", id.as_str())]).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::armory::envelope::wrap_envelope;
    use crate::error::ProviderErrorCode;
    use crate::fetch::fetch_calendar;
    use crate::provider::{CalendarSelection, FetchOptions};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> ArmoryProvider {
        let base = Url::parse(&server.uri()).unwrap();
        let config = ArmoryConfig::new("account", "secret", "Thrall", "Draenor")
            .unwrap()
            .with_armory_url(base.clone())
            .with_login_url(base);
        ArmoryProvider::new(config).unwrap()
    }

    fn month() -> MonthRef {
        MonthRef::new(1, 2010).unwrap()
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/login/login.xml"))
            .and(query_param("accountName", "account"))
            .and(query_param("password", "secret"))
            .and(query_param("app", "armory"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "JSESSIONID=abc123; Path=/")
                    .set_body_string("<page>welcome</page>"),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn login_succeeds() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        let provider = provider_for(&server);
        provider.login().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap_or_default().to_string();
        assert!(query.starts_with("cn=Thrall&r=Draenor&accountName=account"), "{query}");
        assert!(query.contains("index.xml"), "{query}");
    }

    #[tokio::test]
    async fn login_form_error_is_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/login.xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<error key="error.form.login.invalid"/>"#),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).login().await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::AuthenticationFailed);
        assert_eq!(err.provider(), Some("armory"));
    }

    #[tokio::test]
    async fn session_cookie_is_reused() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/vault/calendar/month-user.json"))
            .and(header("cookie", "JSESSIONID=abc123"))
            .and(query_param("month", "1"))
            .and(query_param("year", "2010"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(wrap_envelope(r#"{"events":[]}"#)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        provider.login().await.unwrap();
        let payload = provider.user_month(month()).await.unwrap();
        assert_eq!(payload, Some(serde_json::json!({"events": []})));
    }

    #[tokio::test]
    async fn world_month_sends_wire_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vault/calendar/month-world.json"))
            .and(query_param("type", "raidLockout"))
            .respond_with(ResponseTemplate::new(200).set_body_string(wrap_envelope("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let payload = provider_for(&server)
            .world_month(WorldCategory::RaidLockout, month())
            .await
            .unwrap();
        assert_eq!(payload, Some(serde_json::json!({})));
    }

    #[tokio::test]
    async fn undecodable_detail_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vault/calendar/detail.json"))
            .and(query_param("e", "77"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let payload = provider_for(&server).event_detail(77).await.unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn server_error_carries_provider_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = provider_for(&server).event_detail(1).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ServerError);
        assert!(err.to_string().starts_with("[armory] server_error"));
    }

    #[tokio::test]
    async fn full_export_over_http() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/vault/calendar/month-user.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(wrap_envelope(
                r#"{"events":[{"id":5,"type":"raid","summary":"Naxxramas","start":1262304000000,"owner":"Alice","status":"signedUp"}]}"#,
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/vault/calendar/detail.json"))
            .and(query_param("e", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(wrap_envelope(
                r#"{"description":"Ten-man","invites":[]}"#,
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/vault/calendar/month-world.json"))
            .and(query_param("type", "player"))
            .respond_with(ResponseTemplate::new(200).set_body_string(wrap_envelope(
                r#"{"events":[{"calendarType":"player","summary":"Guild meeting","start":1262304000000,"end":1262307600000}]}"#,
            )))
            .mount(&server)
            .await;

        let options = FetchOptions::new(month()).with_selection(CalendarSelection::from_requested(
            Some(vec!["raid".into()]),
            Some(vec!["player".into()]),
        ));
        let result = fetch_calendar(&provider_for(&server), &options).await.unwrap();

        assert!(result.is_complete());
        let summaries: Vec<_> = result.events.iter().map(|e| e.summary()).collect();
        assert_eq!(summaries, vec!["Naxxramas", "Guild meeting"]);
    }
}
