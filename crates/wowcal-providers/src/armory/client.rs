//! HTTP client for Armory requests.
//!
//! Every request is a form-less POST with its parameters in the query string.
//! The session cookie set by the login site is kept in the client's cookie
//! store and sent with every later request.

use reqwest::{Client, Response, StatusCode};
use tracing::{trace, warn};
use url::Url;

use crate::error::{ProviderError, ProviderResult};

use super::config::ArmoryConfig;

/// HTTP client bound to one character and realm.
pub struct ArmoryClient {
    client: Client,
    character: String,
    realm: String,
}

impl ArmoryClient {
    /// Creates a new client with an empty cookie store.
    pub fn new(config: &ArmoryConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ProviderError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            character: config.character.clone(),
            realm: config.realm.clone(),
        })
    }

    /// POSTs to `url` and returns the response body.
    ///
    /// `cn` and `r` are always sent first, followed by `params`.
    pub async fn post(&self, mut url: Url, params: &[(&str, &str)]) -> ProviderResult<String> {
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("cn", &self.character);
            query.append_pair("r", &self.realm);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        trace!(url = %url.path(), "Sending request");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| ProviderError::network(format!("Request failed: {}", e)).with_source(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response and extracts the body.
    async fn handle_response(&self, response: Response) -> ProviderResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        match status {
            StatusCode::OK => response
                .text()
                .await
                .map_err(|e| ProviderError::network(format!("Failed to read response: {}", e))),
            StatusCode::UNAUTHORIZED => Err(ProviderError::authentication(
                "Authentication failed: session rejected",
            )),
            StatusCode::FORBIDDEN => Err(ProviderError::authorization("Access denied to calendar")),
            StatusCode::NOT_FOUND => Err(ProviderError::not_found("Calendar resource not found")),
            s if s.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::server(format!("Server error ({}): {}", s, body)))
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %s, "Unexpected response status");
                Err(ProviderError::invalid_response(format!(
                    "Unexpected status {}: {}",
                    s, body
                )))
            }
        }
    }
}
