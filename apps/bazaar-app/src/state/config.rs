//! # Configuration State
//!
//! Application configuration resolved once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BAZAAR_ENV=staging                                                 │
//! │     BAZAAR_API_URL=https://...                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config / BAZAAR_CONFIG, else the platform config dir:            │
//! │     ~/.config/bazaar/bazaar.toml (Linux)                               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     development, endpoints derived from the environment, USD           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! environment = "staging"
//!
//! [api]
//! base_url = "https://staging.api.bazaar.example"
//! # graphql_url defaults to "<base_url>/graphql"
//!
//! [locale]
//! language = "en"
//! currency_code = "USD"
//! currency_symbol = "$"
//! currency_decimals = 2
//!
//! [catalog]
//! path = "/opt/bazaar/catalog.json"
//! ```
//!
//! Configuration is read-only after startup, so no lock is needed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use ts_rs::TS;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid URL for {key}: '{url}' (must start with http:// or https://)")]
    InvalidUrl { key: String, url: String },
}

// =============================================================================
// Environment
// =============================================================================

/// Deployment environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Default API base URL for this environment.
    pub fn default_api_base_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:4000",
            Environment::Staging => "https://staging.api.bazaar.example",
            Environment::Production => "https://api.bazaar.example",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidValue {
                key: "environment".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Config File
// =============================================================================

/// Raw contents of `bazaar.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub locale: LocaleSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub graphql_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSettings {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for LocaleSettings {
    fn default() -> Self {
        LocaleSettings {
            language: default_language(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file with the product list; built-in demo data when unset.
    pub path: Option<PathBuf>,
}

impl ConfigFile {
    /// Parses a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `BAZAAR_*` overrides using `lookup` to read variables.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("BAZAAR_ENV") {
            debug!(environment = %env, "Overriding environment from BAZAAR_ENV");
            self.environment = env.parse()?;
        }

        if let Some(url) = lookup("BAZAAR_API_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = Some(url);
        }

        if let Some(url) = lookup("BAZAAR_GRAPHQL_URL") {
            self.api.graphql_url = Some(url);
        }

        if let Some(language) = lookup("BAZAAR_LOCALE") {
            self.locale.language = language;
        }

        if let Some(code) = lookup("BAZAAR_CURRENCY") {
            self.locale.currency_code = code.to_uppercase();
        }

        if let Some(path) = lookup("BAZAAR_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(path));
        }

        Ok(())
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Resolved application configuration, as handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub environment: Environment,

    /// REST base URL.
    pub api_base_url: String,

    /// GraphQL endpoint.
    pub graphql_url: String,

    /// UI language tag (e.g. "en", "ar").
    pub locale: String,

    /// ISO 4217 currency code.
    pub currency_code: String,

    /// Symbol used when formatting money.
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    pub currency_decimals: u8,

    /// Product catalog seed file.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::resolve(ConfigFile::default())
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default if present)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// platform default is not.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`ConfigState::load`] with a custom variable lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                info!(?path, "Loading config from file");
                ConfigFile::from_path(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading config from file");
                    ConfigFile::from_path(&path)?
                }
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    ConfigFile::default()
                }
            },
        };

        file.apply_overrides(lookup)?;

        let config = Self::resolve(file);
        config.validate()?;

        Ok(config)
    }

    /// Builds the final config, filling endpoints from the environment.
    pub fn resolve(file: ConfigFile) -> Self {
        let api_base_url = file
            .api
            .base_url
            .unwrap_or_else(|| file.environment.default_api_base_url().to_string());
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let graphql_url = file
            .api
            .graphql_url
            .unwrap_or_else(|| format!("{}/graphql", api_base_url));

        ConfigState {
            environment: file.environment,
            api_base_url,
            graphql_url,
            locale: file.locale.language,
            currency_code: file.locale.currency_code,
            currency_symbol: file.locale.currency_symbol,
            currency_decimals: file.locale.currency_decimals,
            catalog_path: file.catalog.path,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("api.base_url", &self.api_base_url),
            ("api.graphql_url", &self.graphql_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl {
                    key: key.to_string(),
                    url: url.clone(),
                });
            }
        }

        if self.environment == Environment::Production && self.api_base_url.starts_with("http://")
        {
            warn!(url = %self.api_base_url, "Production API configured without TLS");
        }

        if self.currency_code.len() != 3 || !self.currency_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue {
                key: "locale.currency_code".to_string(),
                value: self.currency_code.clone(),
            });
        }

        if self.locale.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "locale.language".to_string(),
                value: self.locale.clone(),
            });
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "bazaar", "bazaar")
            .map(|dirs| dirs.config_dir().join("bazaar.toml"))
    }
}
