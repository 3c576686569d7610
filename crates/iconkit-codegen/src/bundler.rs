//! Bundler invocation
//!
//! Bundling is delegated to an external tool. A [`Bundler`] receives the
//! assembled virtual file set, the shared `Icon.js` primitive and the list
//! of externals, and writes one output target under the package root.
//!
//! [`RollupBundler`] stages the sources in a scratch directory inside the
//! project (so `node_modules` resolution works), renders a rollup config for
//! the requested target and runs rollup as a child process.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use iconkit_core::{BundlerConfig, External, ProjectConfig};
use indexmap::IndexMap;
use minijinja::context;
use tokio::process::Command;

use crate::assembler::{AssembledModules, ICON_MODULE, INDEX_MODULE, VirtualFileSet};
use crate::error::{Error, Result};
use crate::templates;

/// File name of the rendered rollup config inside the staging directory
const CONFIG_FILE: &str = "rollup.config.mjs";

/// One physical output produced from the virtual inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleTarget {
    /// ES module tree under `es/`
    Esm,
    /// CommonJS tree under `lib/`
    CommonJs,
    /// Single universal bundle at `umd/index.js`
    Umd,
}

impl BundleTarget {
    /// Every target, in build order
    pub const ALL: [BundleTarget; 3] = [Self::Esm, Self::CommonJs, Self::Umd];

    /// Rollup output format
    pub fn format(self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::CommonJs => "cjs",
            Self::Umd => "umd",
        }
    }

    /// Whether the target is one file rooted at the index module
    pub fn is_single_file(self) -> bool {
        matches!(self, Self::Umd)
    }

    /// Output directory (or file, for UMD) under `root`
    pub fn output_path(self, root: &Path) -> PathBuf {
        match self {
            Self::Esm => root.join("es"),
            Self::CommonJs => root.join("lib"),
            Self::Umd => root.join("umd").join(INDEX_MODULE),
        }
    }
}

impl fmt::Display for BundleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Esm => "ES module",
            Self::CommonJs => "CommonJS",
            Self::Umd => "UMD",
        };
        f.write_str(name)
    }
}

/// Everything a bundler needs, shared by all targets of one build
#[derive(Debug, Clone)]
pub struct BundleInput {
    /// Generated module sources
    pub files: VirtualFileSet,

    /// Bundler input key → filepath
    pub inputs: IndexMap<String, String>,

    /// Source of the shared `Icon.js` primitive
    pub icon_source: String,

    /// Packages left as imports, with their UMD globals
    pub externals: Vec<External>,

    /// Banner prepended to every output file
    pub banner: String,

    /// Global name exposed by the UMD bundle
    pub umd_name: String,
}

impl BundleInput {
    /// Combine assembled modules with project settings
    pub fn new(
        assembled: AssembledModules,
        icon_source: impl Into<String>,
        project: &ProjectConfig,
    ) -> Self {
        Self {
            files: assembled.files,
            inputs: assembled.inputs,
            icon_source: icon_source.into(),
            externals: project.externals.clone(),
            banner: project.banner.clone(),
            umd_name: project.umd_name.clone(),
        }
    }

    /// External package names
    pub fn external_packages(&self) -> Vec<&str> {
        self.externals.iter().map(|e| e.package.as_str()).collect()
    }

    /// External package → global mapping (UMD only)
    pub fn globals(&self) -> IndexMap<&str, &str> {
        self.externals
            .iter()
            .map(|e| (e.package.as_str(), e.global.as_str()))
            .collect()
    }

    /// Write sources and the `Icon.js` primitive under `dir`
    pub fn stage(&self, dir: &Path) -> Result<()> {
        self.files.write_to(dir)?;
        std::fs::write(dir.join(ICON_MODULE), &self.icon_source)?;
        Ok(())
    }
}

/// What a bundler produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    /// Target that was built
    pub target: BundleTarget,
    /// Directory or file written
    pub path: PathBuf,
}

/// External bundler/transpiler
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Produce `target` under `output_root`
    async fn bundle(
        &self,
        input: &BundleInput,
        target: BundleTarget,
        output_root: &Path,
    ) -> Result<BundleOutput>;
}

/// Runs rollup with babel as a child process
#[derive(Debug, Clone)]
pub struct RollupBundler {
    command: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl RollupBundler {
    /// Create a bundler that runs `config.command` from `working_dir`.
    ///
    /// `working_dir` must be where rollup, babel and their plugins resolve.
    pub fn new(config: &BundlerConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            working_dir: working_dir.into(),
        }
    }

    /// Render the rollup config for one target.
    ///
    /// `staging` holds the staged sources, `output_root` is the package root.
    pub fn render_config(
        input: &BundleInput,
        target: BundleTarget,
        staging: &Path,
        output_root: &Path,
    ) -> Result<String> {
        let env = templates::environment()?;
        let template = env.get_template(templates::ROLLUP_CONFIG)?;

        let output_path = target.output_path(output_root).display().to_string();
        let rendered = if target.is_single_file() {
            template.render(context! {
                input => staging.join(INDEX_MODULE).display().to_string(),
                externals => input.external_packages(),
                single_file => true,
                output_path => output_path,
                umd_name => &input.umd_name,
                globals => input.globals(),
                format => target.format(),
                banner => &input.banner,
            })?
        } else {
            let entries: IndexMap<&str, String> = input
                .inputs
                .iter()
                .map(|(key, filepath)| (key.as_str(), staging.join(filepath).display().to_string()))
                .collect();

            template.render(context! {
                input => entries,
                externals => input.external_packages(),
                single_file => false,
                output_path => output_path,
                format => target.format(),
                banner => &input.banner,
            })?
        };

        Ok(rendered)
    }
}

#[async_trait]
impl Bundler for RollupBundler {
    async fn bundle(
        &self,
        input: &BundleInput,
        target: BundleTarget,
        output_root: &Path,
    ) -> Result<BundleOutput> {
        let output_root = std::path::absolute(output_root)?;
        let staging = tempfile::Builder::new()
            .prefix(".iconkit-")
            .tempdir_in(&self.working_dir)?;

        input.stage(staging.path())?;

        let config = Self::render_config(input, target, staging.path(), &output_root)?;
        let config_path = staging.path().join(CONFIG_FILE);
        std::fs::write(&config_path, config)?;

        tracing::info!("Bundling {} output", target);
        tracing::debug!(
            "Running {} {} --config {}",
            self.command,
            self.args.join(" "),
            config_path.display()
        );

        let output = Command::new(&self.command)
            .args(&self.args)
            .arg("--config")
            .arg(&config_path)
            .current_dir(&self.working_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::Toolchain {
                message: format!("failed to run '{}': {}", self.command, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Bundle {
                target,
                message: format!("{} exited with {}", self.command, output.status),
                stderr: Some(stderr.to_string()),
            });
        }

        let path = target.output_path(&output_root);
        tracing::info!("✓ {} → {}", target, path.display());

        Ok(BundleOutput { target, path })
    }
}
