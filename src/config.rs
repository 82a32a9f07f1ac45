//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! HTTP cache TTLs, default paths, and logging. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::i18n::Language;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Page responses vary on the session cookie (language preference), so they are
// only cacheable by the browser itself. Static assets are immutable.

/// Content pages - browser-private cache, responses depend on the session cookie
pub const HTTP_CACHE_PAGE_MAX_AGE: u32 = 60;

/// Static assets (CSS, JS) - long cache with immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 86400;

// Pre-formatted Cache-Control header values (compile-time string concatenation)
pub const CACHE_CONTROL_PAGE: &str = formatcp!("private, max-age={}", HTTP_CACHE_PAGE_MAX_AGE);

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}, immutable", HTTP_CACHE_STATIC_MAX_AGE);

/// Language switch responses set cookies and must never be cached
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Glob pattern for template files
pub const TEMPLATE_GLOB: &str = "templates/**/*";

/// Directory for static files
pub const STATIC_DIR: &str = "static";

/// Default path of the translation table file
pub const DEFAULT_TRANSLATIONS_PATH: &str = "locales/translations.json";

/// Default site name shown in templates and the health payload
pub const DEFAULT_SITE_NAME: &str = "Jom Sihat";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "jom_sihat=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Log format value selecting JSON output
pub const LOG_FORMAT_JSON: &str = "json";

/// Environment variable overriding the session secret from the config file
pub const SECRET_KEY_ENV: &str = "JOM_SIHAT_SECRET_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Session cookie settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Translation table settings
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret the cookie key is derived from. Prefer setting the
    /// JOM_SIHAT_SECRET_KEY environment variable over this field.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Session cookie lifetime in days
    #[serde(default = "SessionConfig::default_max_age_days")]
    pub max_age_days: i64,
    /// Marks the session cookie Secure; enable when serving over HTTPS
    #[serde(default)]
    pub production: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            max_age_days: Self::default_max_age_days(),
            production: false,
        }
    }
}

impl SessionConfig {
    fn default_max_age_days() -> i64 {
        30
    }
}

/// Translation table configuration
#[derive(Debug, Clone, Deserialize)]
pub struct I18nConfig {
    /// Path of the JSON translation table
    #[serde(default = "I18nConfig::default_translations_path")]
    pub translations_path: String,
    /// Language used when a client has no stored preference
    #[serde(default)]
    pub default_language: Language,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            translations_path: Self::default_translations_path(),
            default_language: Language::default(),
        }
    }
}

impl I18nConfig {
    fn default_translations_path() -> String {
        DEFAULT_TRANSLATIONS_PATH.to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Site title shown in the header, page titles, and health payload
    #[serde(default = "UiConfig::default_site_name")]
    pub site_name: String,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "UiConfig::default_version")]
    pub version: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            site_name: Self::default_site_name(),
            version: Self::default_version(),
        }
    }
}

impl UiConfig {
    fn default_site_name() -> String {
        DEFAULT_SITE_NAME.to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        // The environment always wins for secrets so deployments never have
        // to write key material into the config file.
        if let Ok(secret) = std::env::var(SECRET_KEY_ENV) {
            if !secret.is_empty() {
                config.session.secret_key = Some(secret);
            }
        }

        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;

        if config.session.max_age_days < 1 {
            return Err(ConfigError::Validation(
                "session.max_age_days must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
