//! Gateway configuration with builder pattern.

use std::time::Duration;

use snafu::ensure;
use url::Url;

use crate::error::{ConfigSnafu, Result};

/// Default request timeout (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection establishment timeout (5 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default API origin.
const DEFAULT_BASE_URL: &str = "https://apis.roblox.com";

/// Configuration for [`StoreClient`](crate::StoreClient).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
    pub(crate) universe_id: String,
    pub(crate) timeout: Duration,
    pub(crate) connect_timeout: Duration,
}

impl GatewayConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Returns the API origin.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the target universe identifier.
    #[must_use]
    pub fn universe_id(&self) -> &str {
        &self.universe_id
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connection timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Builder for [`GatewayConfig`].
#[derive(Debug, Default)]
pub struct GatewayConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    universe_id: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl GatewayConfigBuilder {
    /// Overrides the API origin (useful for tests against a mock server).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API key sent in the `x-api-key` header. Required.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the target universe identifier. Required.
    #[must_use]
    pub fn universe_id(mut self, id: impl Into<String>) -> Self {
        self.universe_id = Some(id.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection establishment timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`](crate::GatewayError::Config) if the
    /// API key or universe id is missing or empty, the base URL does not
    /// parse, or a timeout is zero.
    pub fn build(self) -> Result<GatewayConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| ConfigSnafu { message: "api_key is required" }.build())?;
        ensure!(!api_key.trim().is_empty(), ConfigSnafu { message: "api_key cannot be empty" });

        let universe_id = self
            .universe_id
            .ok_or_else(|| ConfigSnafu { message: "universe_id is required" }.build())?;
        ensure!(
            !universe_id.trim().is_empty(),
            ConfigSnafu { message: "universe_id cannot be empty" }
        );

        let raw_base = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(&raw_base).map_err(|e| {
            ConfigSnafu { message: format!("invalid base_url '{raw_base}': {e}") }.build()
        })?;
        ensure!(
            matches!(base_url.scheme(), "http" | "https"),
            ConfigSnafu { message: format!("base_url must be http(s), got '{raw_base}'") }
        );

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        ensure!(!timeout.is_zero(), ConfigSnafu { message: "timeout cannot be zero" });

        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        ensure!(
            !connect_timeout.is_zero(),
            ConfigSnafu { message: "connect_timeout cannot be zero" }
        );

        Ok(GatewayConfig { base_url, api_key, universe_id, timeout, connect_timeout })
    }
}
