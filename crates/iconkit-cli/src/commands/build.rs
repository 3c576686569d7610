//! Build the bundled icon package

use anyhow::{Context, Result};
use iconkit_codegen::{BuildOptions, Error, IconBuilder};

/// Run the build command
pub async fn run(config_path: &str, metadata_path: &str, output: &str, concurrent: bool) -> Result<()> {
    let (config, metadata) = super::load_inputs(config_path, metadata_path)?;

    let mut builder = IconBuilder::from_config(&config).context("Failed to prepare builder")?;
    if concurrent {
        builder = builder.with_options(BuildOptions {
            concurrent: true,
            ..Default::default()
        });
    }

    let report = match builder.build(&metadata, output).await {
        Ok(report) => report,
        Err(Error::Bundle {
            target,
            message,
            stderr: Some(stderr),
        }) => {
            tracing::error!("{}", stderr.trim_end());
            anyhow::bail!("{} bundle failed: {}", target, message);
        }
        Err(e) => return Err(e).context("Build failed"),
    };

    for bundle in &report.outputs {
        tracing::info!("  ✓ {} ({})", bundle.target, bundle.path.display());
    }
    tracing::info!("Built {} components", report.modules);

    Ok(())
}
