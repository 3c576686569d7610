//! Build pipeline
//!
//! metadata → component modules → virtual file set → bundler (×3 targets)

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use iconkit_core::{Config, IconMetadata, ProjectConfig};

use crate::assembler::{AssembledModules, ICON_MODULE, ModuleAssembler};
use crate::bundler::{BundleInput, BundleOutput, BundleTarget, Bundler, RollupBundler};
use crate::error::Result;
use crate::templates::ICON_PRIMITIVE;

/// Options for a build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Targets to produce, in order
    pub targets: Vec<BundleTarget>,

    /// Run the bundler passes concurrently
    pub concurrent: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            targets: BundleTarget::ALL.to_vec(),
            concurrent: false,
        }
    }
}

/// Summary of a finished build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Number of generated component modules
    pub modules: usize,

    /// Bundler outputs, in target order
    pub outputs: Vec<BundleOutput>,
}

/// Icon package builder
pub struct IconBuilder<B = RollupBundler> {
    project: ProjectConfig,
    assembler: ModuleAssembler,
    bundler: B,
    icon_source: String,
    options: BuildOptions,
}

impl IconBuilder<RollupBundler> {
    /// Builder for a loaded project, running rollup from the project root
    pub fn from_config(config: &Config) -> Result<Self> {
        let bundler = RollupBundler::new(&config.project.bundler, &config.base_path);
        let mut builder = Self::new(config.project.clone(), bundler);

        if let Some(source) = config.load_icon_template()? {
            tracing::debug!("Using Icon.js override from project configuration");
            builder = builder.with_icon_source(source);
        }

        Ok(builder)
    }
}

impl<B: Bundler> IconBuilder<B> {
    /// Create a builder with a custom bundler
    pub fn new(project: ProjectConfig, bundler: B) -> Self {
        let options = BuildOptions {
            concurrent: project.concurrent,
            ..Default::default()
        };
        Self {
            assembler: ModuleAssembler::from_config(&project),
            project,
            bundler,
            icon_source: ICON_PRIMITIVE.to_string(),
            options,
        }
    }

    /// Replace the shared `Icon.js` primitive
    pub fn with_icon_source(mut self, source: impl Into<String>) -> Self {
        self.icon_source = source.into();
        self
    }

    /// Replace the build options
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate module sources without bundling
    pub fn generate(&self, metadata: &IconMetadata) -> Result<AssembledModules> {
        self.assembler.assemble(metadata)
    }

    /// Generate module sources and write them, with `Icon.js`, under `dir`
    pub fn write_sources(&self, metadata: &IconMetadata, dir: &Path) -> Result<AssembledModules> {
        let assembled = self.generate(metadata)?;

        std::fs::create_dir_all(dir)?;
        assembled.files.write_to(dir)?;
        std::fs::write(dir.join(ICON_MODULE), &self.icon_source)?;

        tracing::info!(
            "Wrote {} files to {}",
            assembled.files.len() + 1,
            dir.display()
        );

        Ok(assembled)
    }

    /// Run the full pipeline into `output_dir`.
    ///
    /// The first failing pass aborts the build. Outputs already written by
    /// earlier passes are left in place.
    pub async fn build(
        &self,
        metadata: &IconMetadata,
        output_dir: impl AsRef<Path>,
    ) -> Result<BuildReport> {
        let output_dir: PathBuf = output_dir.as_ref().to_path_buf();
        tracing::info!("Building icon package into {}", output_dir.display());

        let assembled = self.generate(metadata)?;
        let modules = assembled.modules.len();
        let input = BundleInput::new(assembled, self.icon_source.clone(), &self.project);

        let outputs = if self.options.concurrent {
            try_join_all(
                self.options
                    .targets
                    .iter()
                    .map(|target| self.bundler.bundle(&input, *target, &output_dir)),
            )
            .await?
        } else {
            let mut outputs = Vec::with_capacity(self.options.targets.len());
            for target in &self.options.targets {
                outputs.push(self.bundler.bundle(&input, *target, &output_dir).await?);
            }
            outputs
        };

        tracing::info!(
            "Build complete: {} components, {} outputs",
            modules,
            outputs.len()
        );

        Ok(BuildReport { modules, outputs })
    }
}
