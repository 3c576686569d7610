//! Error types for iconkit-core

use thiserror::Error;

/// Result type alias for iconkit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in iconkit-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[source] serde_yaml::Error),

    /// Failed to serialize configuration
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[source] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Icon metadata file could not be found
    #[error("icon metadata not found: {path}")]
    MetadataNotFound {
        /// Path that was searched
        path: String,
    },

    /// Icon metadata file has an extension we do not know how to read
    #[error("unsupported metadata format '{extension}' (expected .json, .yaml or .yml)")]
    UnsupportedMetadataFormat {
        /// The offending extension
        extension: String,
    },

    /// Failed to parse YAML metadata
    #[error("failed to parse icon metadata: {0}")]
    MetadataYaml(#[source] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
