//! CLI command implementations

pub mod build;
pub mod generate;
pub mod init;

use anyhow::{Context, Result};
use iconkit_core::{Config, IconMetadata};

/// Load the project configuration (defaults if absent) and the metadata set
pub(crate) fn load_inputs(config_path: &str, metadata_path: &str) -> Result<(Config, IconMetadata)> {
    tracing::debug!("Loading configuration from {}", config_path);
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;

    tracing::info!("Reading icon metadata from {}", metadata_path);
    let metadata = IconMetadata::load(metadata_path)
        .with_context(|| format!("Failed to load icon metadata from {}", metadata_path))?;

    Ok((config, metadata))
}
