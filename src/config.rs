//! Configuration management for the site service.
//!
//! This module handles loading, validating, and saving service configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::APP_CONFIG_DIR_NAME;

/// Where the estimator's pricing document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Path to the pricing JSON (the site's `assets/config.json`)
    pub path: PathBuf,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/config.json"),
        }
    }
}

/// Lead delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadConfig {
    /// Address lead emails are addressed to (empty disables the mail link)
    #[serde(default)]
    pub recipient: String,
    /// Subject prefix; the visitor's location is appended
    #[serde(default = "default_lead_subject")]
    pub subject: String,
    /// Directory holding the saved lead list
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
}

/// Default lead subject prefix.
fn default_lead_subject() -> String {
    "Countertop Estimate Request".to_string()
}

/// Default lead directory, next to the config file.
fn default_store_dir() -> PathBuf {
    Config::config_dir()
        .map(|dir| dir.join("leads"))
        .unwrap_or_else(|_| PathBuf::from(".leads"))
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            subject: default_lead_subject(),
            store_dir: default_store_dir(),
        }
    }
}

/// Image-edit service settings for the redesign proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedesignConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Image model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Output image size (`WIDTHxHEIGHT`)
    #[serde(default = "default_size")]
    pub size: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-image-1".to_string()
}

fn default_size() -> String {
    "1536x1024".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for RedesignConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            size: default_size(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl RedesignConfig {
    /// Reads the API key from the configured environment variable.
    ///
    /// Returns `None` if the variable is unset or empty.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Service configuration.
///
/// # File Location
///
/// - Linux: `~/.config/CountertopSite/config.toml`
/// - macOS: `~/Library/Application Support/CountertopSite/config.toml`
/// - Windows: `%APPDATA%\CountertopSite\config.toml`
///
/// # Validation
///
/// - `leads.recipient`, if set, must look like an email address
/// - `redesign.api_base` must be an http(s) URL
/// - `redesign.size` must be `WIDTHxHEIGHT`
/// - `redesign.model` and `redesign.api_key_env` must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Pricing document location
    #[serde(default)]
    pub pricing: PricingSettings,
    /// Lead delivery
    #[serde(default)]
    pub leads: LeadConfig,
    /// Redesign proxy
    #[serde(default)]
    pub redesign: RedesignConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let recipient = &self.leads.recipient;
        if !recipient.is_empty() && !recipient.contains('@') {
            anyhow::bail!("Lead recipient '{recipient}' is not an email address");
        }

        let api_base = &self.redesign.api_base;
        if !api_base.starts_with("https://") && !api_base.starts_with("http://") {
            anyhow::bail!("Redesign api_base '{api_base}' must be an http(s) URL");
        }

        let size_ok = self
            .redesign
            .size
            .split_once('x')
            .is_some_and(|(w, h)| {
                !w.is_empty()
                    && !h.is_empty()
                    && w.bytes().all(|b| b.is_ascii_digit())
                    && h.bytes().all(|b| b.is_ascii_digit())
            });
        if !size_ok {
            anyhow::bail!(
                "Redesign size '{}' must be WIDTHxHEIGHT (e.g. 1536x1024)",
                self.redesign.size
            );
        }

        if self.redesign.model.trim().is_empty() {
            anyhow::bail!("Redesign model cannot be empty");
        }

        if self.redesign.api_key_env.trim().is_empty() {
            anyhow::bail!("Redesign api_key_env cannot be empty");
        }

        Ok(())
    }
}
