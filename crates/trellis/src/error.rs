//! Error types for the widget crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::widget::widgets::ComboBoxError;

/// Top-level error for widget operations.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("combo box error: {0}")]
    ComboBox(#[from] ComboBoxError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors produced while loading widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid TOML for the expected shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for widget operations.
pub type Result<T> = std::result::Result<T, WidgetError>;
