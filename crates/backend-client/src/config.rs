//! Client configuration.
//!
//! The base address is read from `API_BASE_URL` and falls back to the local
//! development backend when the variable is unset or blank.

use tracing::debug;
use url::Url;

use crate::error::{ApiError, Result};

/// Default backend address (local development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the backend address.
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address prefixed to every relative request path, kept verbatim
    base_url: String,
}

impl ClientConfig {
    /// Create a configuration for the given base address.
    ///
    /// The address is stored exactly as given. Nothing is parsed here; a
    /// malformed address only surfaces once a request URL is built.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Create a configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(ENV_API_BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            Some(base_url) => {
                debug!(base_url = %base_url, "Using base URL from API_BASE_URL");
                Self::new(base_url)
            }
            None => {
                debug!(
                    base_url = DEFAULT_BASE_URL,
                    "API_BASE_URL not set, using default base URL"
                );
                Self::default()
            }
        }
    }

    /// Use an explicitly supplied base address, or fall back to [`ClientConfig::from_env`]
    /// when none was given or it is blank.
    #[must_use]
    pub fn resolve(explicit: Option<&str>) -> Self {
        match explicit.filter(|v| !v.trim().is_empty()) {
            Some(base_url) => Self::new(base_url),
            None => Self::from_env(),
        }
    }

    /// The configured base address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Eagerly check that the base address is an absolute `http(s)` URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the address does not parse, cannot
    /// act as a base, or uses a scheme other than `http`/`https`.
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::Config(format!("invalid base URL `{}`: {e}", self.base_url))
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL `{}` must be an absolute http(s) URL",
                self.base_url
            )));
        }

        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_new_keeps_address_verbatim() {
        let config = ClientConfig::new("http://example.test:8080/api/");
        assert_eq!(config.base_url(), "http://example.test:8080/api/");
    }

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_API_BASE_URL, "https://staging.example.test");
        }
        let config = ClientConfig::from_env();
        unsafe {
            std::env::remove_var(ENV_API_BASE_URL);
        }

        assert_eq!(config.base_url(), "https://staging.example.test");
    }

    #[test]
    #[serial]
    fn test_from_env_blank_falls_back_to_default() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_API_BASE_URL, "   ");
        }
        let config = ClientConfig::from_env();
        unsafe {
            std::env::remove_var(ENV_API_BASE_URL);
        }

        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_unset_uses_default() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::remove_var(ENV_API_BASE_URL);
        }
        assert_eq!(ClientConfig::from_env().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_resolve_prefers_explicit_address() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_API_BASE_URL, "https://staging.example.test");
        }
        let config = ClientConfig::resolve(Some("http://10.0.0.5:5000"));
        unsafe {
            std::env::remove_var(ENV_API_BASE_URL);
        }

        assert_eq!(config.base_url(), "http://10.0.0.5:5000");
    }

    #[test]
    #[serial]
    fn test_resolve_blank_explicit_falls_back_to_default() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_API_BASE_URL, "   ");
        }
        let blank = ClientConfig::resolve(Some("   "));
        let empty = ClientConfig::resolve(Some(""));
        let missing = ClientConfig::resolve(None);
        unsafe {
            std::env::remove_var(ENV_API_BASE_URL);
        }

        for config in [blank, empty, missing] {
            assert_eq!(config.base_url(), DEFAULT_BASE_URL);
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    #[serial]
    fn test_resolve_blank_explicit_uses_env() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_API_BASE_URL, "https://staging.example.test");
        }
        let config = ClientConfig::resolve(Some(" "));
        unsafe {
            std::env::remove_var(ENV_API_BASE_URL);
        }

        assert_eq!(config.base_url(), "https://staging.example.test");
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::new("https://example.test/api").validate().is_ok());

        assert!(matches!(
            ClientConfig::new("not a url").validate(),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.test").validate(),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("mailto:ops@example.test").validate(),
            Err(ApiError::Config(_))
        ));
    }
}
