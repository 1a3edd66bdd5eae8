//! Client configuration.
//!
//! Options are built once, either from explicit values or from the process
//! environment, and handed to [`SeePlacesClient::new`](crate::SeePlacesClient::new).
//! Nothing in the crate reads the environment after that.

use std::time::Duration;

use reqwest::Url;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default namespace prepended to every cache key.
pub const DEFAULT_CACHE_PREFIX: &str = "seeplaces";

/// Environment variable holding the API base URL.
pub const BASE_URL_KEY: &str = "BASE_URL";

/// Environment variable holding the API version.
pub const API_VERSION_KEY: &str = "API_VERSION";

/// Environment variable holding the scope id (optional).
pub const SCOPE_ID_KEY: &str = "SCOPE_ID";

/// Errors raised while building [`SeePlacesOptions`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required configuration value is absent.
    #[error("missing configuration key: {0}")]
    MissingKey(&'static str),

    /// The base URL is not an absolute URL usable as a base.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Configuration for the SeePlaces client.
#[derive(Debug, Clone)]
pub struct SeePlacesOptions {
    base_url: Url,
    api_version: String,
    scope_id: Option<String>,
    timeout: Duration,
    cache_prefix: String,
}

impl SeePlacesOptions {
    /// Create options from explicit values.
    ///
    /// Endpoint paths are joined onto `base_url` with standard relative URL
    /// resolution, so the trailing slash matters: `https://host/v1/` keeps
    /// the `v1` segment, `https://host/v1` replaces it.
    pub fn new(base_url: &str, api_version: impl Into<String>) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            base_url: parsed,
            api_version: api_version.into(),
            scope_id: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
        })
    }

    /// Read options from the process environment.
    ///
    /// `BASE_URL` and `API_VERSION` are required, `SCOPE_ID` is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read options through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_KEY).ok_or(ConfigError::MissingKey(BASE_URL_KEY))?;
        let api_version =
            lookup(API_VERSION_KEY).ok_or(ConfigError::MissingKey(API_VERSION_KEY))?;

        let options = Self::new(&base_url, api_version)?;
        Ok(match lookup(SCOPE_ID_KEY) {
            Some(scope_id) => options.with_scope_id(scope_id),
            None => options,
        })
    }

    /// Set the scope id sent as the `x-scope-id` header.
    pub fn with_scope_id(mut self, scope_id: impl Into<String>) -> Self {
        self.scope_id = Some(scope_id.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the namespace prepended to cache keys.
    pub fn with_cache_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cache_prefix = prefix.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn scope_id(&self) -> Option<&str> {
        self.scope_id.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn cache_prefix(&self) -> &str {
        &self.cache_prefix
    }
}
