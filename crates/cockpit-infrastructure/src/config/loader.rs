//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values.

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use cockpit_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use reqwest::Url;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, else discovered)
    /// 3. Environment variables with prefix, nested keys split on `__`
    ///    (e.g., `COCKPIT_REFRESH__INTERVAL_MS`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the conventional locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(LOCAL_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_backend_config(config)?;
    validate_refresh_config(config)?;
    validate_classification_config(config)?;
    validate_history_config(config)?;
    validate_event_bus_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_backend_config(config: &AppConfig) -> Result<()> {
    let url = config.backend.url.trim();
    if url.is_empty() {
        return Err(Error::configuration("Backend URL cannot be empty"));
    }
    Url::parse(url).config_context(format!("Invalid backend URL '{url}'"))?;
    if config.backend.request_timeout_ms == 0 {
        return Err(Error::configuration("Backend request timeout cannot be 0"));
    }
    Ok(())
}

fn validate_refresh_config(config: &AppConfig) -> Result<()> {
    if config.refresh.interval_ms == 0 {
        return Err(Error::configuration("Refresh interval cannot be 0"));
    }
    if config.refresh.fetch_timeout_ms == 0 {
        return Err(Error::configuration("Fetch timeout cannot be 0"));
    }
    if config.refresh.snapshot_capacity == 0 {
        return Err(Error::configuration("Snapshot capacity cannot be 0"));
    }
    Ok(())
}

fn validate_classification_config(config: &AppConfig) -> Result<()> {
    // Building the settings checks names, finiteness and threshold order
    config.classification.unit_settings().map(|_| ())
}

fn validate_history_config(config: &AppConfig) -> Result<()> {
    if config.history.range_secs == 0 {
        return Err(Error::configuration("History range cannot be 0"));
    }
    if config.history.precision_secs == 0 {
        return Err(Error::configuration("History precision cannot be 0"));
    }
    Ok(())
}

fn validate_event_bus_config(config: &AppConfig) -> Result<()> {
    if config.event_bus.capacity == 0 {
        return Err(Error::configuration("Event bus capacity cannot be 0"));
    }
    Ok(())
}
