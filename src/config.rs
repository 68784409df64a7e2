//! Client configuration.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use reefstars_client::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://api.reefstars.org/api")
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.reefstars.org/api");
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "REEFSTARS_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "REEFSTARS_API_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_LOGIN_PATH: &str = "/login";

/// Configuration of the [`ReefStars`](crate::ReefStars) client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
    login_path: String,
    notify_server_on_logout: bool,
    logout_on_transient_verify_failure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            notify_server_on_logout: true,
            logout_on_transient_verify_failure: false,
        }
    }
}

impl ClientConfig {
    /// Creates a new builder, starting from the defaults.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Builds a configuration from `REEFSTARS_API_URL` and
    /// `REEFSTARS_API_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let seconds: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(format!("{TIMEOUT_ENV}={raw}")))?;
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        builder.build()
    }

    /// Base URL of the API, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Maximum duration of a request, connection included.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Maximum duration of the connection phase.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Where the UI is sent when the session expires.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Whether `logout` tells the server, in the background.
    #[must_use]
    pub const fn notify_server_on_logout(&self) -> bool {
        self.notify_server_on_logout
    }

    /// Whether a network failure during startup verification logs the user out.
    #[must_use]
    pub const fn logout_on_transient_verify_failure(&self) -> bool {
        self.logout_on_transient_verify_failure
    }

    /// Origin serving uploaded files: the base URL without its `/api` suffix.
    #[must_use]
    pub fn uploads_origin(&self) -> &str {
        self.base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Sets the API base URL. Must start with `http://` or `https://`.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Sets the login route handed to the notifier on session expiry.
    #[must_use]
    pub fn login_path(mut self, login_path: impl Into<String>) -> Self {
        self.config.login_path = login_path.into();
        self
    }

    /// Enables or disables the background `POST /auth/logout` on logout.
    #[must_use]
    pub const fn notify_server_on_logout(mut self, enabled: bool) -> Self {
        self.config.notify_server_on_logout = enabled;
        self
    }

    /// When enabled, any verification failure logs out, not only definitive ones.
    #[must_use]
    pub const fn logout_on_transient_verify_failure(mut self, enabled: bool) -> Self {
        self.config.logout_on_transient_verify_failure = enabled;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let mut config = self.config;

        let trimmed = config.base_url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(config.base_url));
        }
        config.base_url = trimmed;

        if config.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("timeout must be non-zero".into()));
        }

        Ok(config)
    }
}
