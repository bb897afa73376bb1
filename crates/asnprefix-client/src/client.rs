//! Shared HTTP client for the upstream routing-data sources.

use crate::config::{ClientConfig, Endpoints};
use crate::sources::{BgpToolsTable, BgpViewSource, RipeStatSource};
use asnprefix_core::{PrefixError, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP client used by every source adapter
#[derive(Clone)]
pub struct PrefixClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    config: ClientConfig,
}

impl std::fmt::Debug for PrefixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl PrefixClient {
    /// Create a client with default endpoints and timeouts
    pub fn new() -> Result<Self> {
        PrefixClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> PrefixClientBuilder {
        PrefixClientBuilder::new()
    }

    /// Effective configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// BGPView prefix lookup adapter
    #[must_use]
    pub fn bgpview(&self) -> BgpViewSource {
        BgpViewSource::new(self.clone())
    }

    /// RIPEstat announced-prefixes adapter
    #[must_use]
    pub fn ripestat(&self) -> RipeStatSource {
        RipeStatSource::new(self.clone())
    }

    /// bgp.tools bulk table download, used as the fetcher of a
    /// [`BulkTableCache`](crate::BulkTableCache)
    #[must_use]
    pub fn bulk_table(&self) -> BgpToolsTable {
        BgpToolsTable::new(self.clone())
    }

    /// Join a base URL and a path, validating the result
    pub(crate) fn endpoint(base: &str, path: &str) -> Result<Url> {
        let raw = format!("{}{}", base.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| PrefixError::InvalidUrl(format!("{raw}: {e}")))
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.inner.config.endpoints
    }

    /// Perform a GET request and decode the JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self
            .get_text(url, self.inner.config.lookup_timeout, None)
            .await?;
        serde_json::from_str(&body).map_err(PrefixError::Json)
    }

    /// Perform a GET request and return the raw body
    pub(crate) async fn get_text(
        &self,
        url: Url,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<String> {
        debug!(url = %url, timeout_secs = timeout.as_secs(), "GET request");

        let mut request = self.inner.http.get(url).timeout(timeout);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        self.handle_response(response, timeout).await
    }

    /// Return the body of a successful response, or the matching error
    async fn handle_response(
        &self,
        response: reqwest::Response,
        timeout: Duration,
    ) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| transport_error(&e, timeout))
        } else {
            let code = status.as_u16();
            if code == 429 {
                warn!(url = %response.url(), "rate limited by upstream");
            }
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            Err(PrefixError::Api { code, message })
        }
    }
}

/// Map a reqwest failure onto the shared error taxonomy
fn transport_error(err: &reqwest::Error, timeout: Duration) -> PrefixError {
    if err.is_timeout() {
        PrefixError::Timeout(timeout.as_secs())
    } else if err.is_connect() {
        PrefixError::Connection(err.to_string())
    } else {
        PrefixError::Http(err.to_string())
    }
}

/// Builder for configuring a [`PrefixClient`]
#[derive(Debug, Clone, Default)]
pub struct PrefixClientBuilder {
    config: ClientConfig,
}

impl PrefixClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the upstream base URLs (useful for testing)
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Set the timeout of the lookup APIs
    #[must_use]
    pub const fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.config.lookup_timeout = timeout;
        self
    }

    /// Set the timeout of the bulk table download
    #[must_use]
    pub const fn bulk_timeout(mut self, timeout: Duration) -> Self {
        self.config.bulk_timeout = timeout;
        self
    }

    /// Set the User-Agent header sent to the lookup APIs
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PrefixClient> {
        let http = HttpClient::builder()
            .user_agent(&self.config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| PrefixError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(PrefixClient {
            inner: Arc::new(ClientInner {
                http,
                config: self.config,
            }),
        })
    }
}
