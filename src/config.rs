//! Store configuration.

use std::time::Duration;

/// Environment variable naming the store endpoint.
const ENDPOINT_VAR: &str = "TAMSCOPE_ENDPOINT";
/// Environment variable carrying a bearer token.
const TOKEN_VAR: &str = "TAMSCOPE_TOKEN";
/// Environment variable overriding the request timeout, in seconds.
const TIMEOUT_VAR: &str = "TAMSCOPE_TIMEOUT_SECS";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for one TAMS store.
///
/// How the token got here is the caller's business (credential storage and
/// token acquisition live outside this crate); it is sent as a bearer
/// header when present.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store API endpoint, e.g. `https://store.example/x-cloudfit/squirrelmediastore/v5.1`.
    pub endpoint: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration for an endpoint with defaults.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads the configuration from `TAMSCOPE_*` environment variables.
    ///
    /// Returns `None` when no endpoint is set. A malformed timeout value
    /// falls back to the default.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var(ENDPOINT_VAR).ok()?;
        let mut config = Self::new(endpoint);
        if let Ok(token) = std::env::var(TOKEN_VAR) {
            config.token = Some(token);
        }
        if let Some(seconds) = std::env::var(TIMEOUT_VAR)
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(seconds);
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_token_and_timeout() {
        let config = StoreConfig::new("https://store.example/v1")
            .with_token("secret")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.endpoint, "https://store.example/v1");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn defaults_carry_no_token() {
        let config = StoreConfig::new("https://store.example/v1");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
