//! HTTP access to the Sveriges Radio open API
//!
//! [`Gateway`] is the seam between the menus and the network: it takes an
//! endpoint name and query parameters and returns the decoded JSON body.
//! [`SverigesRadioClient`] is the reqwest implementation; tests plug in
//! their own gateway.
//!
//! # Example
//!
//! ```no_run
//! use pmosverigesradio::{Gateway, SverigesRadioClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SverigesRadioClient::new().await?;
//!     let body = client
//!         .fetch("channels", &[("audioquality", "hi".to_string())])
//!         .await?;
//!     println!("{}", body["channels"].as_array().map_or(0, Vec::len));
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_CHARSET};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Default Sveriges Radio API base URL
pub const DEFAULT_BASE_URL: &str = "http://api.sr.se/api/v2";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "PMOSR/0.1 (pmosverigesradio)";

/// Parameters sent with every request
pub const COMMON_PARAMS: [(&str, &str); 2] = [("format", "json"), ("pagination", "false")];

/// Source of decoded API responses
#[async_trait]
pub trait Gateway: Send + Sync {
    /// GET `endpoint` with `params` added to the common parameters
    ///
    /// Fails with [`Error::Transport`] when no successful response arrives
    /// and with [`Error::Parse`] when the body is not JSON.
    async fn fetch(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value>;
}

/// Sveriges Radio HTTP client
///
/// The client is stateless and does not cache responses; caching is done
/// by [`crate::api::SverigesRadioApi`].
#[derive(Debug, Clone)]
pub struct SverigesRadioClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl SverigesRadioClient {
    /// Create a new client with default settings
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL of an endpoint, common parameters included
    pub fn request_url(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ))?;

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in COMMON_PARAMS {
                query.append_pair(key, value);
            }
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Gateway for SverigesRadioClient {
    async fn fetch(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value> {
        let url = self.request_url(endpoint, params)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(ACCEPT_CHARSET, "utf-8")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(
                url.as_str(),
                format!("API returned status: {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(url.as_str(), e))?;

        serde_json::from_slice(&body).map_err(|e| Error::parse(format!("{} response", endpoint), e))
    }
}

/// Builder for configuring a SverigesRadioClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<SverigesRadioClient> {
        Url::parse(&self.base_url)?;

        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::InvalidSetting(format!("proxy {}: {}", proxy_url, e)))?;
                builder = builder.proxy(proxy);
            }

            builder
                .build()
                .map_err(|e| Error::transport(&self.base_url, e))?
        };

        Ok(SverigesRadioClient {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::default();
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            builder.timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert!(builder.proxy.is_none());
    }

    #[test]
    fn test_request_url_has_common_parameters() {
        let client = SverigesRadioClient::with_client(Client::new());
        let url = client
            .request_url("episodes", &[("programid", "4540".to_string())])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://api.sr.se/api/v2/episodes?format=json&pagination=false&programid=4540"
        );
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_base_url() {
        let result = SverigesRadioClient::builder()
            .base_url("not a url")
            .build()
            .await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    /// Run with: cargo test -p pmosverigesradio -- --ignored
    #[tokio::test]
    #[ignore = "Integration test - calls real Sveriges Radio API"]
    async fn test_live_channels() {
        let client = SverigesRadioClient::new().await.unwrap();
        let body = client
            .fetch(
                "channels",
                &[
                    ("audioquality", "normal".to_string()),
                    ("liveaudiotemplateid", "5".to_string()),
                ],
            )
            .await
            .unwrap();

        let channels = body["channels"].as_array().unwrap();
        assert!(!channels.is_empty());
        println!("Found {} channels", channels.len());
    }
}
