//! Error types for code generation

use thiserror::Error;

use crate::bundler::BundleTarget;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load metadata or configuration
    #[error(transparent)]
    Core(#[from] iconkit_core::Error),

    /// Failed to render a source template
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    /// The bundler ran but reported a failure
    #[error("{target} bundle failed: {message}")]
    Bundle {
        /// Output target being produced
        target: BundleTarget,
        /// Error message
        message: String,
        /// Bundler stderr output
        stderr: Option<String>,
    },

    /// The bundler executable could not be launched
    #[error("bundler toolchain error: {message}. Ensure node and rollup are installed.")]
    Toolchain {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
