//! iconkit Core Library
//!
//! This crate provides the shared model for iconkit:
//! - Icon metadata (descriptors, nodes, size outputs)
//! - Project configuration (`iconkit.yaml`)
//!
//! # Example
//!
//! ```rust,ignore
//! use iconkit_core::{Config, IconMetadata};
//!
//! let config = Config::load_or_default(".")?;
//! let metadata = IconMetadata::load("build/metadata.json")?;
//! println!("{} components to generate", metadata.output_count());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod metadata;

pub use config::{BundlerConfig, Config, External, ProjectConfig};
pub use error::{Error, Result};
pub use metadata::{Attributes, Icon, IconDescriptor, IconMetadata, IconOutput, Node};
