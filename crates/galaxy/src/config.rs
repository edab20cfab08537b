//! Client configuration for a Galaxy instance.

use std::time::Duration;

/// Configuration for [`GalaxyClient`](crate::GalaxyClient).
#[derive(Debug, Clone)]
pub struct GalaxyConfig {
    /// Base URL of the Galaxy instance (e.g., "https://usegalaxy.example.org")
    pub base_url: String,
    /// API key for the instance (reads from env if not set)
    pub api_key: Option<String>,
    /// API key environment variable name (default: `GALAXY_API_KEY`)
    pub api_key_env: String,
    /// Per-request timeout. Installs are slow; the default is generous.
    pub timeout: Duration,
}

impl GalaxyConfig {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Creates a new configuration for the given Galaxy base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            api_key_env: "GALAXY_API_KEY".to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the API key directly.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key environment variable name.
    #[must_use]
    pub fn with_api_key_env(mut self, env_var: impl Into<String>) -> Self {
        self.api_key_env = env_var.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Gets the API key, either from config or environment.
    #[must_use]
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
