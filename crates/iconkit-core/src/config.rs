//! Configuration parsing
//!
//! An `iconkit.yaml` file at the project root tunes the generated package:
//! banner text, externals, the UMD global name and the bundler command.
//! Every field has a default, so a project without the file still builds
//! the standard `es/`, `lib/`, `umd/` package.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up when a directory is given to [`Config::load`]
pub const CONFIG_FILE_NAME: &str = "iconkit.yaml";

/// Banner prepended to every generated and bundled file
pub const DEFAULT_BANNER: &str = "/**
 * This source code is licensed under the Apache-2.0 license found in the
 * LICENSE file in the root directory of this source tree.
 *
 * Code generated by iconkit. DO NOT EDIT.
 */";

/// Root project configuration from `iconkit.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,

    /// Package name mentioned in deprecation warnings
    #[serde(default = "default_package")]
    pub package: String,

    /// Banner comment for every output file
    #[serde(default = "default_banner")]
    pub banner: String,

    /// Global variable exposed by the UMD bundle
    #[serde(default = "default_umd_name")]
    pub umd_name: String,

    /// Packages that are never bundled
    #[serde(default = "default_externals")]
    pub externals: Vec<External>,

    /// Optional override for the shared `Icon.js` rendering primitive
    #[serde(default)]
    pub icon_template: Option<PathBuf>,

    /// External bundler command
    #[serde(default)]
    pub bundler: BundlerConfig,

    /// Run the three bundle passes concurrently
    #[serde(default)]
    pub concurrent: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            package: default_package(),
            banner: default_banner(),
            umd_name: default_umd_name(),
            externals: default_externals(),
            icon_template: None,
            bundler: BundlerConfig::default(),
            concurrent: false,
        }
    }
}

fn default_name() -> String {
    "icons".to_string()
}

fn default_package() -> String {
    "@carbon/icons-react".to_string()
}

fn default_banner() -> String {
    DEFAULT_BANNER.to_string()
}

fn default_umd_name() -> String {
    "CarbonIconsReact".to_string()
}

fn default_externals() -> Vec<External> {
    vec![
        External::new("@carbon/icon-helpers", "CarbonIconHelpers"),
        External::new("react", "React"),
        External::new("prop-types", "PropTypes"),
    ]
}

/// A dependency resolved by the consumer at install time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct External {
    /// Package specifier as imported by generated code
    pub package: String,

    /// Global variable name used by the UMD bundle
    pub global: String,
}

impl External {
    /// Create an external mapping
    pub fn new(package: impl Into<String>, global: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            global: global.into(),
        }
    }
}

/// How to launch the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// Executable to run
    #[serde(default = "default_bundler_command")]
    pub command: String,

    /// Arguments placed before `--config <file>`
    #[serde(default = "default_bundler_args")]
    pub args: Vec<String>,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            command: default_bundler_command(),
            args: default_bundler_args(),
        }
    }
}

fn default_bundler_command() -> String {
    "npx".to_string()
}

fn default_bundler_args() -> Vec<String> {
    vec!["--no-install".to_string(), "rollup".to_string()]
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory or an `iconkit.yaml` path
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./icons")?;
    /// println!("UMD global: {}", config.project.umd_name);
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (config_path, base_path) = Self::split_path(path);

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = serde_yaml::from_str(&contents).map_err(Error::ConfigParse)?;
        project.validate()?;

        tracing::debug!("Loaded configuration from {}", config_path.display());

        Ok(Self { project, base_path })
    }

    /// Like [`Config::load`], but falls back to defaults when no file exists
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (config_path, base_path) = Self::split_path(path);

        if config_path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                config_path.display()
            );
            Ok(Self {
                project: ProjectConfig::default(),
                base_path,
            })
        }
    }

    /// Resolve the `Icon.js` override relative to the project root
    pub fn icon_template_path(&self) -> Option<PathBuf> {
        self.project
            .icon_template
            .as_ref()
            .map(|p| self.base_path.join(p))
    }

    /// Read the `Icon.js` override, if one is configured
    pub fn load_icon_template(&self) -> Result<Option<String>> {
        match self.icon_template_path() {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigInvalid {
                        message: format!("icon_template '{}' does not exist", path.display()),
                    });
                }
                Ok(Some(std::fs::read_to_string(path)?))
            }
            None => Ok(None),
        }
    }

    fn split_path(path: &Path) -> (PathBuf, PathBuf) {
        if path.is_dir() {
            (path.join(CONFIG_FILE_NAME), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."))
                    .to_path_buf(),
            )
        }
    }
}

impl ProjectConfig {
    /// Serialize as `iconkit.yaml` contents
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Error::ConfigSerialize)
    }

    fn validate(&self) -> Result<()> {
        if self.umd_name.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                message: "umd_name must not be empty".to_string(),
            });
        }
        if self.bundler.command.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                message: "bundler.command must not be empty".to_string(),
            });
        }
        if let Some(external) = self.externals.iter().find(|e| e.package.is_empty()) {
            return Err(Error::ConfigInvalid {
                message: format!("external with global '{}' has no package", external.global),
            });
        }
        Ok(())
    }
}
