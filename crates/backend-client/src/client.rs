//! The configured HTTP client.

use std::sync::{Arc, OnceLock};

use reqwest::{Method, RequestBuilder};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// HTTP client bound to a backend base address.
///
/// Relative request paths are resolved against the base address; everything
/// else (headers, pooling, status handling, body decoding) is plain
/// `reqwest`. Clones share the configuration and the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base address.
    ///
    /// Performs no I/O and cannot fail.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a client from an explicit configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    /// Create a client that issues requests through an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        debug!(base_url = %config.base_url(), "API client configured");
        Self {
            config: Arc::new(config),
            http,
        }
    }

    /// The base address, exactly as configured.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// The configuration shared by this client and its clones.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve a request path against the base address.
    ///
    /// Protocol-relative paths (`//host/...`) take the base address's scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the resolved address does not parse.
    pub fn url(&self, path: &str) -> Result<Url> {
        let joined = join_url(self.base_url(), path);
        let parsed = if joined.starts_with("//") {
            Url::parse(self.base_url()).and_then(|base| base.join(&joined))
        } else {
            Url::parse(&joined)
        };

        parsed.map_err(|source| ApiError::InvalidUrl {
            url: joined,
            source,
        })
    }

    /// Start a request for `path` with the given method.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the resolved address does not parse.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!(method = %method, url = %url, "Building request");
        Ok(self.http.request(method, url))
    }

    /// Start a `GET` request. See [`ApiClient::request`].
    pub fn get(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, path)
    }

    /// Start a `POST` request. See [`ApiClient::request`].
    pub fn post(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::POST, path)
    }

    /// Start a `PUT` request. See [`ApiClient::request`].
    pub fn put(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::PUT, path)
    }

    /// Start a `PATCH` request. See [`ApiClient::request`].
    pub fn patch(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::PATCH, path)
    }

    /// Start a `DELETE` request. See [`ApiClient::request`].
    pub fn delete(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::DELETE, path)
    }

    /// Start a `HEAD` request. See [`ApiClient::request`].
    pub fn head(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::HEAD, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Process-wide client instance.
static SHARED_CLIENT: OnceLock<ApiClient> = OnceLock::new();

/// Get the process-wide client, configured from the environment on first use.
#[must_use]
pub fn shared() -> &'static ApiClient {
    SHARED_CLIENT.get_or_init(ApiClient::from_env)
}

/// Join a base address and a request path.
///
/// Absolute paths (`scheme://…` or `//host…`) are returned unchanged and an
/// empty path yields the base. Otherwise exactly one `/` separates the two.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    if path.is_empty() {
        return base.to_string();
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_absolute_url(path: &str) -> bool {
    if path.starts_with("//") {
        return true;
    }

    let Some((scheme, _)) = path.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
