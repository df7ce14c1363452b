//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (e.g. `BACKEND__API_KEY`,
//! `SESSION__SECURE_COOKIES`, `NAVIGATION__READY_TIMEOUT_MS`).
//!
//! See [`BackendConfig`](bankdash_platform_access::BackendConfig) for the
//! hosted backend settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration composed from library configs.
#[cfg(feature = "ssr")]
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Hosted backend project.
    pub backend: bankdash_platform_access::BackendConfig,

    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Client-side navigation settings.
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on the session cookie lifetime, in minutes.
    /// The cookie never outlives the identity token it carries.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_session_duration_minutes() -> i64 {
    60
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_session_duration_minutes(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

/// Navigation settings shipped to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Bound on waiting for the sign-in state before each navigation, in
    /// milliseconds. Zero waits indefinitely.
    #[serde(default = "default_ready_timeout_ms")]
    pub ready_timeout_ms: u64,
}

fn default_ready_timeout_ms() -> u64 {
    10_000
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            ready_timeout_ms: default_ready_timeout_ms(),
        }
    }
}

impl NavigationConfig {
    /// The readiness bound, or `None` for an unbounded wait.
    #[must_use]
    pub fn ready_timeout(&self) -> Option<Duration> {
        (self.ready_timeout_ms > 0).then(|| Duration::from_millis(self.ready_timeout_ms))
    }
}

#[cfg(feature = "ssr")]
impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::default().separator("__").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.duration_minutes, 60);
        assert!(config.secure_cookies);
    }

    #[test]
    fn navigation_timeout_defaults_to_ten_seconds() {
        let config = NavigationConfig::default();
        assert_eq!(config.ready_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn zero_timeout_waits_indefinitely() {
        let config = NavigationConfig { ready_timeout_ms: 0 };
        assert_eq!(config.ready_timeout(), None);
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn loads_nested_environment_keys() {
        use std::collections::HashMap;

        let env: HashMap<String, String> = [
            ("BACKEND__API_KEY", "key-123"),
            ("BACKEND__PROJECT_ID", "bankdash-dev"),
            ("SESSION__SECURE_COOKIES", "false"),
            ("NAVIGATION__READY_TIMEOUT_MS", "2500"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let source = config::Environment::default()
            .separator("__")
            .try_parsing(true)
            .source(Some(env));
        let config = ServerConfig::from_source(source).expect("config loads");

        assert_eq!(config.backend.api_key(), "key-123");
        assert_eq!(config.backend.project_id(), "bankdash-dev");
        assert!(!config.session.secure_cookies);
        assert_eq!(config.session.duration_minutes, 60);
        assert_eq!(config.navigation.ready_timeout_ms, 2500);
    }
}
