//! Client configuration for the backend origin, session persistence, and the
//! scanner poll interval. Values come from built-in defaults, then environment
//! variables, then explicit overrides (CLI flags). Configuration values are
//! public; do not store credentials here.

use crate::errors::AppError;
use std::{env, path::PathBuf, time::Duration};
use url::Url;

pub const ENV_API_URL: &str = "TICKETDESK_API_URL";
pub const ENV_SESSION_FILE: &str = "TICKETDESK_SESSION_FILE";
pub const ENV_SCAN_INTERVAL_MS: &str = "TICKETDESK_SCAN_INTERVAL_MS";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 250;

/// Resolved client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub scan_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: default_session_file(),
            scan_interval: Duration::from_millis(DEFAULT_SCAN_INTERVAL_MS),
        }
    }
}

impl AppConfig {
    /// Loads defaults and applies environment overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        apply_overrides(&mut config, Overrides::from_env());
        config
    }

    /// Ensures the API origin is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the base URL cannot be used.
    pub fn validate(&self) -> Result<Url, AppError> {
        let url = Url::parse(self.api_base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AppError::Config(format!(
                "Unsupported API URL scheme: {scheme}"
            ))),
        }
    }
}

/// Optional values layered on top of the defaults.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub session_file: Option<String>,
    pub scan_interval_ms: Option<u64>,
}

impl Overrides {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_base_url: read_env(ENV_API_URL),
            session_file: read_env(ENV_SESSION_FILE),
            scan_interval_ms: read_env(ENV_SCAN_INTERVAL_MS).and_then(|v| v.parse().ok()),
        }
    }
}

pub fn apply_overrides(config: &mut AppConfig, overrides: Overrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
        config.api_base_url = value;
    }
    if let Some(value) = overrides.session_file.as_deref().and_then(normalize_value) {
        config.session_file = PathBuf::from(value);
    }
    if let Some(ms) = overrides.scan_interval_ms.filter(|ms| *ms > 0) {
        config.scan_interval = Duration::from_millis(ms);
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().as_deref().and_then(normalize_value)
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn default_session_file() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || env::temp_dir().join("ticketdesk-session.json"),
        |home| PathBuf::from(home).join(".ticketdesk").join("session.json"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://api.ticketdesk.dev "),
            Some("https://api.ticketdesk.dev".to_string())
        );
    }

    #[test]
    fn apply_overrides_ignores_empty_values() {
        let mut config = AppConfig {
            api_base_url: "https://api.default".to_string(),
            session_file: PathBuf::from("/tmp/default.json"),
            scan_interval: Duration::from_millis(100),
        };
        let overrides = Overrides {
            api_base_url: Some("  ".to_string()),
            session_file: Some(String::new()),
            scan_interval_ms: Some(0),
        };

        apply_overrides(&mut config, overrides);

        assert_eq!(config.api_base_url, "https://api.default");
        assert_eq!(config.session_file, PathBuf::from("/tmp/default.json"));
        assert_eq!(config.scan_interval, Duration::from_millis(100));
    }

    #[test]
    fn load_reads_environment() {
        temp_env::with_vars(
            [
                (ENV_API_URL, Some("https://tickets.example/api")),
                (ENV_SESSION_FILE, Some("/tmp/ticketdesk-test.json")),
                (ENV_SCAN_INTERVAL_MS, Some("500")),
            ],
            || {
                let config = AppConfig::load();
                assert_eq!(config.api_base_url, "https://tickets.example/api");
                assert_eq!(
                    config.session_file,
                    PathBuf::from("/tmp/ticketdesk-test.json")
                );
                assert_eq!(config.scan_interval, Duration::from_millis(500));
            },
        );
    }

    #[test]
    fn load_falls_back_to_defaults() {
        temp_env::with_vars(
            [
                (ENV_API_URL, None::<&str>),
                (ENV_SESSION_FILE, None),
                (ENV_SCAN_INTERVAL_MS, Some("not-a-number")),
                ("HOME", Some("/home/desk")),
            ],
            || {
                let config = AppConfig::load();
                assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
                assert_eq!(
                    config.session_file,
                    PathBuf::from("/home/desk/.ticketdesk/session.json")
                );
                assert_eq!(
                    config.scan_interval,
                    Duration::from_millis(DEFAULT_SCAN_INTERVAL_MS)
                );
            },
        );
    }

    #[test]
    fn validate_rejects_non_http_origins() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.api_base_url = "ftp://files.example".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.api_base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
