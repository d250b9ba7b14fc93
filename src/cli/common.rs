//! Shared CLI plumbing: error type and process exit codes.

use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::models::PricingConfig;

/// Process exit codes used by CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input or configuration was rejected
    ValidationError = 1,
    /// A file could not be read or written
    IoError = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// CLI command failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Message printed to stderr
    pub message: String,
    /// Exit code the process ends with
    pub exit_code: ExitCode,
}

impl CliError {
    /// Rejected input or configuration.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// File system or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the service config, from `path` if given.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let result = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    result.map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Loads the pricing document named by the config, or `override_path`.
pub fn load_pricing(config: &Config, override_path: Option<&Path>) -> CliResult<PricingConfig> {
    let path = override_path.unwrap_or(&config.pricing.path);
    PricingConfig::load(path).map_err(|e| {
        CliError::io(format!(
            "Failed to load pricing from {}: {e:#}",
            path.display()
        ))
    })
}
