//! Configuration management for the heritage explorer
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ExplorerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Place dataset and geocoding configuration
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Ranking and paging settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Place source configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// URL of the curated place dataset; the bundled dataset is used when unset
    #[serde(default)]
    pub dataset_url: Option<String>,
    /// Base URL of the Nominatim-compatible geocoder
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,
    /// Value of the `Accept-Language` header sent to the geocoder
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// Maximum number of geocoding results per search
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Places revealed per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_search_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_accept_language() -> String {
    "en".to_string()
}

fn default_search_limit() -> u32 {
    20
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("HeritageExplorer/{}", crate::VERSION)
}

fn default_page_size() -> usize {
    crate::ranking::DEFAULT_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dataset_url: None,
            search_base_url: default_search_base_url(),
            accept_language: default_accept_language(),
            search_limit: default_search_limit(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from file and environment variables. Without an
    /// explicit path the per-user config file is used if present.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // EXPLORER_SOURCES__DATASET_URL, EXPLORER_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("EXPLORER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ExplorerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("heritage-explorer").join("config.toml"))
    }

    /// Apply default values to empty or zeroed fields
    pub fn apply_defaults(&mut self) {
        if self.sources.search_base_url.is_empty() {
            self.sources.search_base_url = default_search_base_url();
        }
        if self.sources.accept_language.is_empty() {
            self.sources.accept_language = default_accept_language();
        }
        if self.sources.search_limit == 0 {
            self.sources.search_limit = default_search_limit();
        }
        if self.sources.timeout_seconds == 0 {
            self.sources.timeout_seconds = default_timeout();
        }
        if self.sources.user_agent.is_empty() {
            self.sources.user_agent = default_user_agent();
        }
        if self.discovery.page_size == 0 {
            self.discovery.page_size = default_page_size();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.sources.timeout_seconds > 300 {
            return Err(
                ExplorerError::config("Source request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.sources.search_limit > 50 {
            return Err(ExplorerError::config("Search limit cannot exceed 50 results").into());
        }

        if self.discovery.page_size > 100 {
            return Err(ExplorerError::config("Page size cannot exceed 100").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !is_http_url(&self.sources.search_base_url) {
            return Err(
                ExplorerError::config("Geocoder base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if let Some(url) = &self.sources.dataset_url
            && !url.is_empty()
            && !is_http_url(url)
        {
            return Err(
                ExplorerError::config("Dataset URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
