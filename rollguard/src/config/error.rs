use std::path::PathBuf;
use thiserror::Error;

use rollguard_core::ValidationErrors;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0}. Run 'rollguard init' first.")]
    Missing(PathBuf),

    #[error("Failed to read file {0}: {1}")]
    FileRead(PathBuf, std::io::Error),

    #[error("Failed to write file {0}: {1}")]
    FileWrite(PathBuf, std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Environment '{0}' not found")]
    EnvironmentNotFound(String),

    #[error("Invalid health check timing for environment '{env}':\n{source}")]
    InvalidTiming {
        env: String,
        #[source]
        source: ValidationErrors,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
