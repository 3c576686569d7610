//! Generate component sources without bundling

use anyhow::{Context, Result};
use iconkit_codegen::IconBuilder;
use std::path::Path;

/// Run the generate command
pub async fn run(config_path: &str, metadata_path: &str, output: &str) -> Result<()> {
    let (config, metadata) = super::load_inputs(config_path, metadata_path)?;

    let builder = IconBuilder::from_config(&config).context("Failed to prepare generator")?;
    let assembled = builder
        .write_sources(&metadata, Path::new(output))
        .context("Failed to generate sources")?;

    for module in &assembled.modules {
        let marker = if module.deprecated { " (deprecated)" } else { "" };
        tracing::debug!("  ✓ {} → {}{}", module.module_name, module.filepath, marker);
    }

    tracing::info!(
        "Generated {} components into {}",
        assembled.modules.len(),
        output
    );
    Ok(())
}
