//! Initialize an iconkit project

use anyhow::{Context, Result};
use iconkit_core::ProjectConfig;
use iconkit_core::config::CONFIG_FILE_NAME;
use std::fs;
use std::path::Path;

/// Run the init command
pub async fn run(path: &str) -> Result<()> {
    let project_dir = Path::new(path);

    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!(
            "Directory '{}' already contains an {}",
            project_dir.display(),
            CONFIG_FILE_NAME
        );
    }

    let abs_path = project_dir.canonicalize()?;
    let mut project = ProjectConfig::default();
    if let Some(name) = abs_path.file_name().and_then(|n| n.to_str()) {
        project.name = name.to_string();
    }

    let yaml = project
        .to_yaml()
        .context("Failed to serialize default configuration")?;
    fs::write(&config_path, format!("# iconkit project configuration\n{yaml}"))?;

    tracing::info!("Created {}", config_path.display());
    tracing::info!("Next steps:");
    tracing::info!("  npm install --save-dev rollup @rollup/plugin-babel @babel/core \\");
    tracing::info!("    @babel/preset-env @babel/preset-react \\");
    tracing::info!("    @babel/plugin-transform-react-constant-elements babel-plugin-dev-expression");
    tracing::info!("  iconkit build --metadata metadata.json --output .");

    Ok(())
}
