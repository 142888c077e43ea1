//! Client configuration.
//!
//! Mirrors the settings a caller can hand to the library up front: the PWA
//! site URL, an optional bearer token, headers applied to every request and
//! the request timeout.

use std::env;
use std::time::Duration;

use crate::error::{ProjectError, Result};

/// Environment variable holding the PWA site URL.
pub const ENV_URL: &str = "PROJECT_SERVER_URL";
/// Environment variable holding a pre-acquired bearer token.
pub const ENV_TOKEN: &str = "PROJECT_SERVER_TOKEN";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "PROJECT_SERVER_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings used to build a [`ProjectClient`](crate::ProjectClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use projectserver::ProjectConfig;
///
/// let config = ProjectConfig::new("https://contoso.sharepoint.com/sites/pwa")
///     .with_token("eyJ0eXAi...")
///     .with_header("X-Correlation", "nightly-sync")
///     .with_timeout(Duration::from_secs(60));
/// assert_eq!(config.headers.len(), 1);
/// ```
#[derive(Clone)]
pub struct ProjectConfig {
    /// The PWA site URL, e.g. `https://contoso.sharepoint.com/sites/pwa`.
    pub base_url: String,
    /// Bearer token sent as `Authorization` on every request.
    pub token: Option<String>,
    /// Extra headers applied to every request.
    pub headers: Vec<(String, String)>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for ProjectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("ProjectConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("headers", &header_names)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProjectConfig {
    /// Create a configuration for the given site URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::ConfigMissing`] if `PROJECT_SERVER_URL` is not
    /// set and [`ProjectError::ConfigInvalid`] if the timeout is not a number.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(ENV_URL).map_err(|_| {
            ProjectError::ConfigMissing(format!("{ENV_URL} environment variable not set"))
        })?;

        let mut config = Self::new(base_url);
        config.token = env::var(ENV_TOKEN).ok().filter(|t| !t.is_empty());

        if let Ok(raw) = env::var(ENV_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ProjectError::ConfigInvalid(format!("{ENV_TIMEOUT} must be a number, got '{raw}'"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a header applied to every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
