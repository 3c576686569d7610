//! iconkit Code Generation
//!
//! This crate turns icon metadata into a React icon package.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌──────────┐     ┌──────────────┐
//! │ Metadata │────▶│ Component │────▶│ Virtual  │────▶│   Bundler    │
//! │  (JSON)  │     │  (JSX)    │     │  files   │     │ es/ lib/ umd/│
//! └──────────┘     └───────────┘     └──────────┘     └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use iconkit_codegen::IconBuilder;
//! use iconkit_core::{Config, IconMetadata};
//!
//! let config = Config::load_or_default(".")?;
//! let metadata = IconMetadata::load("build/metadata.json")?;
//! let report = IconBuilder::from_config(&config)?.build(&metadata, "dist").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assembler;
pub mod attributes;
pub mod builder;
pub mod bundler;
pub mod component;
pub mod error;
pub mod templates;

pub use assembler::{AssembledModules, ModuleAssembler, VirtualFileSet, filepath_conflict};
pub use builder::{BuildOptions, BuildReport, IconBuilder};
pub use bundler::{BundleInput, BundleOutput, BundleTarget, Bundler, RollupBundler};
pub use component::{ComponentTemplate, synthesize_component};
pub use error::{Error, Result};
