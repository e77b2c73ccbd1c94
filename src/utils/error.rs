use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObfuscateError {
    #[error("Cannot read input directory {}: {source}", .path.display())]
    InputDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Script transform failed: {message}")]
    TransformError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ObfuscateError {
    pub fn transform(message: impl Into<String>) -> Self {
        Self::TransformError {
            message: message.into(),
        }
    }

    /// Everything except a per-region transform failure stops the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::TransformError { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InputDirError { path, .. } => format!(
                "Input directory '{}' is missing or unreadable: {}",
                path.display(),
                self
            ),
            Self::OutputDirError { path, .. } => format!(
                "Output directory '{}' could not be created: {}",
                path.display(),
                self
            ),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Check your configuration: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ObfuscateError>;
