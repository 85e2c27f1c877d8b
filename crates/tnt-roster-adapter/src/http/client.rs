/*
[INPUT]:  HTTP configuration (base URL, timeouts, bearer token)
[OUTPUT]: Configured reqwest client ready for roster API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::auth::TokenManager;
use crate::http::{Result, RosterError};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default roster API location (Spring Boot dev server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the roster API
#[derive(Debug, Clone)]
pub struct RosterClient {
    http_client: Client,
    base_url: Url,
    timeout: Duration,
    tokens: TokenManager,
}

impl RosterClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            timeout: config.timeout,
            tokens: TokenManager::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Shared token slot; clones of this client see the same token
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Send `Authorization: Bearer <token>` on every following request
    pub fn set_auth_token(&self, token: impl Into<String>) {
        self.tokens.set_token(token);
    }

    /// Stop sending an Authorization header
    pub fn clear_auth_token(&self) {
        self.tokens.clear();
    }

    /// Build full URL for an endpoint relative to the base URL
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for an endpoint, with the bearer token if set
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        let builder = self.http_client.request(method, url);
        Ok(match self.tokens.bearer() {
            Some(bearer) => builder.header(AUTHORIZATION, bearer),
            None => builder,
        })
    }

    /// Send a request and decode its JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(RosterError::InvalidResponse(
                "expected a JSON body, got an empty response".to_string(),
            ));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request whose response body carries nothing the caller needs
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                RosterError::Timeout {
                    duration: self.timeout.as_secs(),
                }
            } else {
                RosterError::Http(err)
            }
        })?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "roster api response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = RosterError::from_response(status, &body);
        warn!(status = status.as_u16(), error = %err, "roster api request failed");
        if err.is_auth_error() {
            match self.tokens.token_age() {
                Some(age) => warn!(token_age_secs = age.num_seconds(), "bearer token rejected"),
                None => warn!("request needs a bearer token"),
            }
        }
        Err(err)
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(RosterError::Config(format!(
            "base url {base_url} cannot carry a path"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
